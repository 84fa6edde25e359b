//! Conversion functions for environment variable values

use std::env;

/// Read an environment variable, treating unset and empty values alike.
///
/// Non-UTF-8 values are converted lossily rather than rejected.
pub fn get_env_value(env_name: &str) -> Option<String> {
    if env_name.is_empty() || env_name.contains(['=', '\0']) {
        return None;
    }
    let value = env::var_os(env_name)?;
    let value = value
        .into_string()
        .unwrap_or_else(|raw| raw.to_string_lossy().into_owned());
    (!value.is_empty()).then_some(value)
}

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their `false` counterparts.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse a signed integer with base autodetection, range-checked for `T`.
pub fn parse_signed<T: TryFrom<i128>>(value: &str) -> Option<T> {
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let magnitude = i128::try_from(parse_magnitude(digits)?).ok()?;
    let signed = if negative { -magnitude } else { magnitude };
    T::try_from(signed).ok()
}

/// Parse an unsigned integer with base autodetection, range-checked for `T`.
///
/// No sign is accepted, not even `+`.
pub fn parse_unsigned<T: TryFrom<u128>>(value: &str) -> Option<T> {
    T::try_from(parse_magnitude(value)?).ok()
}

/// Parse the unsigned part of an integer literal.
///
/// The base comes from the prefix: `0x` hexadecimal, `0o` or a bare leading `0`
/// octal, `0b` binary, decimal otherwise. Underscores may separate digits.
fn parse_magnitude(literal: &str) -> Option<u128> {
    let bytes = literal.as_bytes();
    let (radix, digits, prefixed) = match bytes {
        [b'0', b'x' | b'X', ..] => (16, &literal[2..], true),
        [b'0', b'o' | b'O', ..] => (8, &literal[2..], true),
        [b'0', b'b' | b'B', ..] => (2, &literal[2..], true),
        [b'0', _, ..] => (8, &literal[1..], true),
        _ => (10, literal, false),
    };
    if !separators_ok(digits, prefixed) {
        return None;
    }
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    u128::from_str_radix(&cleaned, radix).ok()
}

/// Underscores must sit between digits or directly after a base prefix.
fn separators_ok(digits: &str, prefixed: bool) -> bool {
    let mut after_digit = prefixed;
    let mut after_underscore = false;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return false;
            }
            after_digit = false;
            after_underscore = true;
        } else {
            after_digit = true;
            after_underscore = false;
        }
    }
    !after_underscore
}

/// Float types the binder can fill.
pub trait ParseFloat: std::str::FromStr + Copy {
    fn is_infinite(self) -> bool;
}

impl ParseFloat for f32 {
    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl ParseFloat for f64 {
    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}

/// Parse a float at the precision of `T`.
///
/// Decimal and exponent notation only; hexadecimal mantissas such as `0x1p-2`
/// are rejected. Finite literals too large for `T` are rejected instead of
/// becoming infinity.
pub fn parse_float<T: ParseFloat>(value: &str) -> Option<T> {
    let parsed = value.parse::<T>().ok()?;
    if parsed.is_infinite() && !is_infinity_literal(value) {
        return None;
    }
    Some(parsed)
}

fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value
        .strip_prefix(['+', '-'])
        .unwrap_or(value)
        .to_ascii_lowercase();
    unsigned == "inf" || unsigned == "infinity"
}
