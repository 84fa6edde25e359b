//! Compact duration grammar (`1h30m`, `250ms`, `-1.5s`)
//!
//! A duration is an optional sign followed by one or more `number unit` pairs.
//! Numbers may carry a decimal fraction. Valid units are `ns`, `us` (or `µs`/`μs`),
//! `ms`, `s`, `m` and `h`. The bare string `0` is accepted without a unit.
//! The result is a signed count of nanoseconds that must fit in an `i64`.

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude of `i64::MIN`; the largest accumulated value before the sign is applied.
const LIMIT: u64 = 1 << 63;

/// Errors produced by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    /// The value is valid but below zero, and the field cannot hold a negative span.
    #[error("negative duration {0:?}")]
    Negative(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a duration string into signed nanoseconds.
pub fn parse(input: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_whole) = leading_int(rest).ok_or_else(invalid)?;
        let has_whole = after_whole.len() != rest.len();
        rest = after_whole;

        let mut fraction: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, digits_scale, after_fraction) = leading_fraction(after_dot);
            has_fraction = after_fraction.len() != after_dot.len();
            fraction = digits;
            scale = digits_scale;
            rest = after_fraction;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];
        let per_unit = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        if whole > LIMIT / per_unit {
            return Err(invalid());
        }
        let mut value = whole * per_unit;
        if fraction > 0 {
            // Truncates towards zero; sub-nanosecond remainders are dropped.
            value += (fraction as f64 * (per_unit as f64 / scale)) as u64;
            if value > LIMIT {
                return Err(invalid());
            }
        }

        total = total.checked_add(value).ok_or_else(invalid)?;
        if total > LIMIT {
            return Err(invalid());
        }
    }

    if negative {
        // `total` is at most 2^63 here, so the wrapping negation is exact.
        return Ok((total as i64).wrapping_neg());
    }
    i64::try_from(total).map_err(|_| invalid())
}

/// Consume leading ASCII digits. Returns `None` on overflow past 2^63.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        if value > LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(digit - b'0');
        if value > LIMIT {
            return None;
        }
    }
    Some((value, &s[end..]))
}

/// Consume leading fraction digits, returning the digits as an integer together
/// with the power of ten they are scaled by. Digits past `i64` precision are
/// consumed but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    for digit in s[..end].bytes() {
        if overflow {
            continue;
        }
        if value > (LIMIT - 1) / 10 {
            overflow = true;
            continue;
        }
        let next = value * 10 + u64::from(digit - b'0');
        if next > LIMIT {
            overflow = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, &s[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_units() {
        assert_eq!(parse("0"), Ok(0));
        assert_eq!(parse("5s"), Ok(5 * SECOND as i64));
        assert_eq!(parse("30m"), Ok(30 * MINUTE as i64));
        assert_eq!(parse("250ms"), Ok(250 * MILLISECOND as i64));
        assert_eq!(parse("12ns"), Ok(12));
        assert_eq!(parse("7us"), Ok(7_000));
        assert_eq!(parse("7µs"), Ok(7_000));
        assert_eq!(parse("7μs"), Ok(7_000));
    }

    #[test]
    fn test_composite_and_signed() {
        assert_eq!(parse("1h30m"), Ok((HOUR + 30 * MINUTE) as i64));
        assert_eq!(
            parse("2h45m30.5s"),
            Ok((2 * HOUR + 45 * MINUTE + 30 * SECOND + 500 * MILLISECOND) as i64)
        );
        assert_eq!(parse("-1.5h"), Ok(-((HOUR + 30 * MINUTE) as i64)));
        assert_eq!(parse("+10s"), Ok(10 * SECOND as i64));
        assert_eq!(parse("-0"), Ok(0));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(parse("1.5s"), Ok(1_500_000_000));
        assert_eq!(parse(".5s"), Ok(500_000_000));
        assert_eq!(parse("1.s"), Ok(SECOND as i64));
        assert_eq!(parse("0.000000001s"), Ok(1));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(parse("9223372036854775807ns"), Ok(i64::MAX));
        assert_eq!(parse("-9223372036854775808ns"), Ok(i64::MIN));
        assert_eq!(
            parse("9223372036854775808ns"),
            Err(DurationError::Invalid("9223372036854775808ns".to_string()))
        );
        assert!(parse("3000000h").is_err());
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse(""), Err(DurationError::Invalid(String::new())));
        assert_eq!(parse("-"), Err(DurationError::Invalid("-".to_string())));
        assert_eq!(parse("s"), Err(DurationError::Invalid("s".to_string())));
        assert_eq!(parse(".s"), Err(DurationError::Invalid(".s".to_string())));
        assert_eq!(parse("1"), Err(DurationError::MissingUnit("1".to_string())));
        assert_eq!(parse("1h30"), Err(DurationError::MissingUnit("1h30".to_string())));
        assert_eq!(
            parse("3d"),
            Err(DurationError::UnknownUnit {
                unit: "d".to_string(),
                input: "3d".to_string()
            })
        );
    }
}
