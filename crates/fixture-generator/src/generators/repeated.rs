//! Repeated-group expansion.

use rand::Rng;

/// Draw an item count uniformly in `[min, max]`.
///
/// An inverted range yields `min`; templates reject it during validation.
pub fn repeat_count<R: Rng>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}

/// Draw a count in `[min, max]` and invoke `build` that many times.
///
/// `build` receives the item index; the first error aborts the group.
pub fn repeat_group<R, T, E, F>(rng: &mut R, min: u32, max: u32, mut build: F) -> Result<Vec<T>, E>
where
    R: Rng,
    F: FnMut(&mut R, u64) -> Result<T, E>,
{
    let count = repeat_count(rng, min, max);
    let mut items = Vec::with_capacity(count as usize);
    for i in 0..u64::from(count) {
        items.push(build(rng, i)?);
    }
    Ok(items)
}
