//! Text form of play durations, e.g. `1h2m3.5s`, `90s`, `250ms`.

use std::fmt::Write;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,
    #[error("invalid duration '{0}'")]
    InvalidNumber(String),
    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),
    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { unit: String, input: String },
    #[error("duration '{0}' is out of range")]
    OutOfRange(String),
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3600 * 1_000_000_000,
        _ => return None,
    };
    Some(nanos)
}

/// Nanoseconds for one `number` of `scale`. The whole part is exact; only
/// the fraction goes through floating point.
fn component_nanos(number: &str, scale: u128, input: &str) -> Result<u128, DurationParseError> {
    let invalid = || DurationParseError::InvalidNumber(input.to_string());
    let out_of_range = || DurationParseError::OutOfRange(input.to_string());

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(invalid());
    }

    // only digits remain, so a failed parse is an overflow
    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| out_of_range())?
    };
    let fraction_nanos = if fraction.is_empty() {
        0
    } else {
        let fraction: f64 = format!("0.{fraction}").parse().map_err(|_| invalid())?;
        (fraction * scale as f64).round() as u128
    };

    whole
        .checked_mul(scale)
        .and_then(|nanos| nanos.checked_add(fraction_nanos))
        .ok_or_else(out_of_range)
}

/// Parses a sequence of decimal numbers each followed by a unit
/// (`ns`, `us`, `ms`, `s`, `m`, `h`). A bare `0` is also accepted.
/// Signs are not.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_nanos: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        if number.is_empty() {
            return Err(DurationParseError::InvalidNumber(input.to_string()));
        }

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        total_nanos = total_nanos
            .checked_add(component_nanos(number, scale, input)?)
            .ok_or_else(|| DurationParseError::OutOfRange(input.to_string()))?;
        rest = tail;
    }

    let total_nanos = u64::try_from(total_nanos)
        .map_err(|_| DurationParseError::OutOfRange(input.to_string()))?;
    Ok(Duration::from_nanos(total_nanos))
}

/// Formats a duration at millisecond precision in the form
/// [`parse_duration`] reads back.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms == 0 {
        return "0s".to_string();
    }
    if total_ms < 1000 {
        return format!("{total_ms}ms");
    }

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    if millis == 0 {
        let _ = write!(out, "{seconds}s");
    } else {
        let fraction = format!("{millis:03}");
        let _ = write!(out, "{seconds}.{}s", fraction.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Duration::ZERO)]
    #[case("0s", Duration::ZERO)]
    #[case("90s", Duration::from_secs(90))]
    #[case("1m30s", Duration::from_secs(90))]
    #[case("1h2m3s", Duration::from_secs(3723))]
    #[case("1.5s", Duration::from_millis(1500))]
    #[case("250ms", Duration::from_millis(250))]
    #[case("100us", Duration::from_micros(100))]
    #[case("100µs", Duration::from_micros(100))]
    #[case(" 2m ", Duration::from_secs(120))]
    #[case(".5s", Duration::from_millis(500))]
    #[case("9007199254740993ns", Duration::from_nanos(9_007_199_254_740_993))]
    #[case("18446744073709551615ns", Duration::from_nanos(u64::MAX))]
    fn test_parse_duration(#[case] input: &str, #[case] expected: Duration) {
        assert_eq!(parse_duration(input), Ok(expected));
    }

    #[rstest]
    #[case("", DurationParseError::Empty)]
    #[case("abc", DurationParseError::InvalidNumber("abc".to_string()))]
    #[case("-1s", DurationParseError::InvalidNumber("-1s".to_string()))]
    #[case("5", DurationParseError::MissingUnit("5".to_string()))]
    #[case(".s", DurationParseError::InvalidNumber(".s".to_string()))]
    #[case("1.2.3s", DurationParseError::InvalidNumber("1.2.3s".to_string()))]
    #[case(
        "18446744073709551616ns",
        DurationParseError::OutOfRange("18446744073709551616ns".to_string())
    )]
    #[case(
        "99999999999999999999999999999999999999999h",
        DurationParseError::OutOfRange("99999999999999999999999999999999999999999h".to_string())
    )]
    #[case(
        "5d",
        DurationParseError::UnknownUnit { unit: "d".to_string(), input: "5d".to_string() }
    )]
    fn test_parse_duration_rejects(#[case] input: &str, #[case] expected: DurationParseError) {
        assert_eq!(parse_duration(input), Err(expected));
    }

    #[rstest]
    #[case(Duration::ZERO, "0s")]
    #[case(Duration::from_millis(250), "250ms")]
    #[case(Duration::from_secs(45), "45s")]
    #[case(Duration::from_millis(90_500), "1m30.5s")]
    #[case(Duration::from_secs(3600), "1h0m0s")]
    #[case(Duration::from_millis(3_723_120), "1h2m3.12s")]
    fn test_format_duration(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(format_duration(duration), expected);
        assert_eq!(parse_duration(expected), Ok(duration));
    }
}
