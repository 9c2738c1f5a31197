/// Currency prefix shown before listing prices.
pub const CURRENCY: &str = "MAD";

/// Format a number with `,` thousands separators and at most three
/// fraction digits, trailing zeros dropped ("4,000", "1,234.5").
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// "MAD4,000"
pub fn format_price(value: f64) -> String {
    format!("{CURRENCY}{}", format_number(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers_ungrouped() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
    }

    #[test]
    fn test_thousands_grouped() {
        assert_eq!(format_number(4000.0), "4,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(100000.0), "100,000");
    }

    #[test]
    fn test_fraction_trimmed() {
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(10.25), "10.25");
        assert_eq!(format_number(1.23456), "1.235");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_number(-2500.0), "-2,500");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_price_prefix() {
        assert_eq!(format_price(4000.0), "MAD4,000");
    }
}
