//! Value formatting for report cells.

use crate::domain::model::MetadataValue;

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;
const BILLION: u64 = 1_000_000_000;
const TRILLION: u64 = 1_000_000_000_000;

/// Format a count with a K/M/B/T suffix (e.g. 133_700_000 -> "133.70M").
///
/// Whole billions and millions drop the fraction; everything at or above a
/// thousand is scaled, smaller counts are printed as-is.
pub fn human_number(count: u64) -> String {
    match count {
        c if c >= TRILLION => format!("{:.1}T", c as f64 / TRILLION as f64),
        c if c >= BILLION => {
            let scaled = c as f64 / BILLION as f64;
            if scaled.fract() == 0.0 {
                format!("{:.0}B", scaled)
            } else {
                format!("{:.1}B", scaled)
            }
        }
        c if c >= MILLION => {
            let scaled = c as f64 / MILLION as f64;
            if scaled.fract() == 0.0 {
                format!("{:.0}M", scaled)
            } else {
                format!("{:.2}M", scaled)
            }
        }
        c if c >= THOUSAND => format!("{:.0}K", c as f64 / THOUSAND as f64),
        c => c.to_string(),
    }
}

/// Scaled-suffix form of a float parameter count. Negative and NaN counts
/// clamp to zero.
pub fn human_count(count: f64) -> String {
    human_number(count as u64)
}

/// Shortest decimal form, never in exponent notation ("1000", "0", "0.5").
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    format!("{}", value)
}

/// Shortest round-trippable form that switches to exponent notation when the
/// decimal exponent is below -4 or at least 6 ("8e+09", "11434", "1e-05").
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    if value == 0.0 {
        return format_plain(value);
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return format_plain(value),
        },
        None => return format_plain(value),
    };

    if exponent < -4 || exponent >= 6 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        format_plain(value)
    }
}

fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_positive() {
        "+Inf".to_string()
    } else {
        "-Inf".to_string()
    }
}

/// Render a metadata value for the Metadata table.
pub fn format_value(value: &MetadataValue) -> String {
    match value {
        MetadataValue::Bool(b) => b.to_string(),
        MetadataValue::Number(n) => format_general(*n),
        MetadataValue::String(s) => s.clone(),
        MetadataValue::Array(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(" "))
        }
    }
}

/// Render a length-like value for the summary tables, where numbers stay in
/// plain decimal.
pub fn format_length(value: &MetadataValue) -> String {
    match value {
        MetadataValue::Number(n) => format_plain(*n),
        other => format_value(other),
    }
}

/// Render a tensor shape as `[d0 d1 ...]`.
pub fn format_shape(shape: &[u64]) -> String {
    let dims: Vec<String> = shape.iter().map(u64::to_string).collect();
    format!("[{}]", dims.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_number() {
        assert_eq!(human_number(0), "0");
        assert_eq!(human_number(999), "999");
        assert_eq!(human_number(1_000), "1K");
        assert_eq!(human_number(12_400), "12K");
        assert_eq!(human_number(1_000_000), "1M");
        assert_eq!(human_number(133_700_000), "133.70M");
        assert_eq!(human_number(7_000_000_000), "7B");
        assert_eq!(human_number(1_500_000_000), "1.5B");
        assert_eq!(human_number(8_030_261_248), "8.0B");
        assert_eq!(human_number(2_000_000_000_000), "2.0T");
    }

    #[test]
    fn test_human_count_clamps_negative() {
        assert_eq!(human_count(-5.0), "0");
        assert_eq!(human_count(133_700_000.0), "133.70M");
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(8e9), "8e+09");
        assert_eq!(format_general(1000.0), "1000");
        assert_eq!(format_general(11434.0), "11434");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(0.5), "0.5");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(1234567.0), "1.234567e+06");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(-2.5e-7), "-2.5e-07");
        assert_eq!(format_general(1e100), "1e+100");
        assert_eq!(format_general(f64::INFINITY), "+Inf");
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(0.0), "0");
        assert_eq!(format_plain(131072.0), "131072");
        assert_eq!(format_plain(8e9), "8000000000");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&MetadataValue::Bool(true)), "true");
        assert_eq!(format_value(&MetadataValue::Bool(false)), "false");
        assert_eq!(format_value(&MetadataValue::from("llama")), "llama");
        assert_eq!(
            format_value(&MetadataValue::Array(vec![
                MetadataValue::from("<s>"),
                MetadataValue::Number(2.0),
                MetadataValue::Bool(true),
            ])),
            "[<s> 2 true]"
        );
    }

    #[test]
    fn test_format_shape() {
        assert_eq!(format_shape(&[42, 3117]), "[42 3117]");
        assert_eq!(format_shape(&[]), "[]");
    }
}
