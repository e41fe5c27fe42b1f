//! Timestamp value generators.

use crate::generator::GeneratorError;
use chrono::{DateTime, Duration, Utc};
use fixture_core::{TimestampFormat, Value};
use rand::Rng;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// `now - uniform(0, 1) * days`.
///
/// The offset is signed: a negative `days` produces an instant up to that
/// many days in the future. An instant chrono cannot represent is an error.
pub fn generate_days_ago<R: Rng>(
    field: &str,
    rng: &mut R,
    now: DateTime<Utc>,
    days: f64,
    format: TimestampFormat,
) -> Result<Value, GeneratorError> {
    let offset = rng.random::<f64>() * days * MILLIS_PER_DAY;
    let instant = Duration::try_milliseconds(offset as i64)
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or_else(|| GeneratorError::TimestampOutOfRange {
            field: field.to_string(),
            days,
        })?;
    Ok(render_instant(instant, format))
}

/// Render an instant in the requested format.
pub fn render_instant(instant: DateTime<Utc>, format: TimestampFormat) -> Value {
    match format {
        TimestampFormat::Iso => Value::Timestamp(instant),
        TimestampFormat::Date => Value::String(instant.format("%Y-%m-%d").to_string()),
        TimestampFormat::Http => {
            Value::String(instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_days_ago_stays_in_the_past() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = fixed_now();

        for _ in 0..100 {
            match generate_days_ago("t", &mut rng, now, 30.0, TimestampFormat::Iso).unwrap() {
                Value::Timestamp(dt) => {
                    assert!(dt <= now);
                    assert!(dt >= now - Duration::days(30));
                }
                other => panic!("Expected timestamp, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_negative_days_reach_into_the_future() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = fixed_now();

        let mut saw_future = false;
        for _ in 0..100 {
            if let Value::Timestamp(dt) =
                generate_days_ago("t", &mut rng, now, -90.0, TimestampFormat::Iso).unwrap()
            {
                assert!(dt >= now);
                assert!(dt <= now + Duration::days(90));
                saw_future |= dt > now;
            }
        }
        assert!(saw_future);
    }

    #[test]
    fn test_unrepresentable_instant_is_an_error() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = generate_days_ago("seen", &mut rng, fixed_now(), 1.0e12, TimestampFormat::Iso)
            .unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::TimestampOutOfRange { ref field, .. } if field == "seen"
        ));
    }

    #[test]
    fn test_render_formats() {
        let now = fixed_now();
        assert_eq!(
            render_instant(now, TimestampFormat::Date),
            Value::string("2024-06-15")
        );
        assert_eq!(
            render_instant(now, TimestampFormat::Http),
            Value::string("Sat, 15 Jun 2024 12:00:00 GMT")
        );
        assert_eq!(render_instant(now, TimestampFormat::Iso), Value::Timestamp(now));
    }
}
