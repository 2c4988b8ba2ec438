//! Number formatting for the materials table.

/// Shown in place of a value the pricing service did not provide.
pub const MISSING: &str = "—";

/// Groups thousands with commas and keeps at most `max_decimals` fraction
/// digits, dropping trailing zeros (`1234.5` -> `1,234.5`).
pub fn group_thousands(value: f64, max_decimals: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let fixed = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// ISK amounts: at most two decimals.
pub fn format_isk(value: f64) -> String {
    group_thousands(value, 2)
}

pub fn format_quantity(value: f64) -> String {
    group_thousands(value, 3)
}

/// Absent costs render as a dash so they never read as zero.
pub fn format_optional_isk(value: Option<f64>) -> String {
    value
        .map(format_isk)
        .unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_and_trims() {
        assert_eq!(format_isk(22500.0), "22,500");
        assert_eq!(format_isk(1234567.891), "1,234,567.89");
        assert_eq!(format_isk(4.5), "4.5");
        assert_eq!(format_isk(0.0), "0");
        assert_eq!(format_isk(999.999), "1,000");
        assert_eq!(format_isk(-1500.25), "-1,500.25");
        assert_eq!(format_quantity(5000.0), "5,000");
    }

    #[test]
    fn absent_cost_is_a_dash_not_zero() {
        assert_eq!(format_optional_isk(None), MISSING);
        assert_eq!(format_optional_isk(Some(0.0)), "0");
    }
}
