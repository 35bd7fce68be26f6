//! Duration literals
//!
//! Parses literals such as `"45m"`, `"1h30m"`, `"1.5h"` or `"-250ms"`: an
//! optional sign followed by one or more decimal numbers, each with a unit
//! suffix. Valid units are `ns`, `us` (`µs`), `ms`, `s`, `m` and `h`.
//! The bare literal `"0"` needs no unit.

use chrono::Duration;

use crate::error::ActivityError;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Parse a duration literal into a signed duration.
///
/// Zero and negative durations are valid literals; callers that need a
/// positive span must check for themselves.
pub fn parse_duration(literal: &str) -> Result<Duration, ActivityError> {
    let fail = |reason: String| ActivityError::DurationParse {
        literal: literal.to_string(),
        reason,
    };

    let (negative, mut rest) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(fail("empty duration".to_string()));
    }

    let mut total: u64 = 0;

    while !rest.is_empty() {
        // Integer part
        let int_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let int_digits = &rest[..int_end];
        rest = &rest[int_end..];

        // Fractional part
        let mut frac_digits = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_end = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            frac_digits = &after_dot[..frac_end];
            rest = &after_dot[frac_end..];
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(fail("expected a number".to_string()));
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        if unit.is_empty() {
            return Err(fail("missing unit".to_string()));
        }
        let unit_nanos = unit_in_nanos(unit).ok_or_else(|| fail(format!("unknown unit {unit:?}")))?;

        let whole: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits
                .parse()
                .map_err(|_| fail("value out of range".to_string()))?
        };

        let component = whole
            .checked_mul(unit_nanos)
            .and_then(|v| v.checked_add(fraction_nanos(frac_digits, unit_nanos)))
            .ok_or_else(|| fail("value out of range".to_string()))?;

        total = total
            .checked_add(component)
            .ok_or_else(|| fail("value out of range".to_string()))?;
    }

    let nanos = i64::try_from(total).map_err(|_| fail("value out of range".to_string()))?;

    Ok(Duration::nanoseconds(if negative { -nanos } else { nanos }))
}

fn unit_in_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Nanoseconds contributed by the digits after the decimal point.
/// Digits beyond the precision of the accumulator are dropped.
fn fraction_nanos(digits: &str, unit_nanos: u64) -> u64 {
    let mut value: u64 = 0;
    let mut scale: f64 = 1.0;

    for b in digits.bytes() {
        let digit = u64::from(b - b'0');
        match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => break,
        }
    }

    (value as f64 * (unit_nanos as f64 / scale)) as u64
}

fn total_seconds(duration: Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as f64 / NANOS_PER_SECOND,
        None => duration.num_milliseconds() as f64 / 1_000.0,
    }
}

/// Duration as fractional hours
pub fn hours(duration: Duration) -> f64 {
    total_seconds(duration) / SECONDS_PER_HOUR
}

/// Duration as fractional minutes
pub fn minutes(duration: Duration) -> f64 {
    total_seconds(duration) / SECONDS_PER_MINUTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_units() {
        assert_eq!(parse_duration("45m").unwrap(), Duration::minutes(45));
        assert_eq!(parse_duration("2h").unwrap(), Duration::hours(2));
        assert_eq!(parse_duration("30s").unwrap(), Duration::seconds(30));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::milliseconds(250));
        assert_eq!(parse_duration("7us").unwrap(), Duration::microseconds(7));
        assert_eq!(parse_duration("7µs").unwrap(), Duration::microseconds(7));
        assert_eq!(parse_duration("12ns").unwrap(), Duration::nanoseconds(12));
    }

    #[test]
    fn test_parse_compound_and_fractional() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::seconds(30));
        assert_eq!(parse_duration("1.m").unwrap(), Duration::minutes(1));
        assert_eq!(
            parse_duration("2h45m30s").unwrap(),
            Duration::seconds(2 * 3600 + 45 * 60 + 30)
        );
    }

    #[test]
    fn test_parse_signs_and_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::zero());
        assert_eq!(parse_duration("-0").unwrap(), Duration::zero());
        assert_eq!(parse_duration("0s").unwrap(), Duration::zero());
        assert_eq!(parse_duration("-45m").unwrap(), Duration::minutes(-45));
        assert_eq!(parse_duration("+45m").unwrap(), Duration::minutes(45));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for literal in ["", "-", "notaduration", "45", "45x", "h", ".m", "1h30", "4 5m", "45m "] {
            let err = parse_duration(literal).unwrap_err();
            assert!(
                matches!(err, ActivityError::DurationParse { .. }),
                "{literal:?} should fail to parse, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_duration("9999999999999999999h").is_err());
        assert!(parse_duration("3000000h").is_err());
    }

    #[test]
    fn test_error_message_names_reason() {
        let err = parse_duration("45").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Time parsing failed for \"45\": missing unit"
        );
    }

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(hours(Duration::minutes(45)), 0.75);
        assert_eq!(minutes(Duration::minutes(45)), 45.0);
        assert_eq!(hours(Duration::minutes(90)), 1.5);
        assert_eq!(minutes(Duration::seconds(30)), 0.5);
        assert_eq!(hours(Duration::zero()), 0.0);
    }
}
