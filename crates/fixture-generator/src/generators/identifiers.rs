//! Identifier generators: UUIDs, object ids, network addresses.

use rand::Rng;
use uuid::Uuid;

const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";

/// Generate a random UUID v4 using the provided RNG.
pub fn uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    // Generate 16 random bytes
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// `len` random lowercase hex characters.
pub fn hex_string<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| HEX_LOWER[rng.random_range(0..16)] as char)
        .collect()
}

/// `len` random digits, the first never zero.
pub fn random_digits<R: Rng>(rng: &mut R, len: usize) -> String {
    let mut result = String::with_capacity(len);
    for i in 0..len {
        let digit = if i == 0 {
            rng.random_range(1..10u8)
        } else {
            rng.random_range(0..10u8)
        };
        result.push(char::from(b'0' + digit));
    }
    result
}

/// Document-store style object id: 24 lowercase hex characters.
pub fn object_id<R: Rng>(rng: &mut R) -> String {
    hex_string(rng, 24)
}

/// Dotted IPv4 address whose first and last octets are never 0 or 255.
pub fn ipv4<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.random_range(1..=254u8),
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random_range(1..=254u8)
    )
}

/// Upper-case colon-separated MAC address.
pub fn mac<R: Rng>(rng: &mut R) -> String {
    let bytes: [u8; 6] = rng.random();
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}
