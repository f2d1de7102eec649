use num_format::{Locale, ToFormattedString};

/// Fraction digits shown in value labels before trailing zeros are trimmed.
const VALUE_LABEL_PRECISION: usize = 3;

/// Formats a value the way bar labels and value-axis ticks show it:
/// `,` thousands grouping, at most three fraction digits, trailing zeros trimmed.
#[must_use]
pub fn format_value_label(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{:.VALUE_LABEL_PRECISION$}", value.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    // Beyond u128 there is nothing sensible to group; show the digits as is.
    let grouped = integer
        .parse::<u128>()
        .map(|whole| whole.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| integer.to_owned());
    let is_zero = grouped == "0" && fraction.is_empty();

    let mut out = String::with_capacity(grouped.len() + fraction.len() + 2);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_value_label;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_value_label(0.0), "0");
        assert_eq!(format_value_label(999.0), "999");
        assert_eq!(format_value_label(1000.0), "1,000");
        assert_eq!(format_value_label(1_234_567.0), "1,234,567");
        assert_eq!(format_value_label(1e21), "1,000,000,000,000,000,000,000");
    }

    #[test]
    fn trims_fraction_digits() {
        assert_eq!(format_value_label(12.5), "12.5");
        assert_eq!(format_value_label(1234.56789), "1,234.568");
        assert_eq!(format_value_label(-0.0001), "0");
        assert_eq!(format_value_label(-2500.25), "-2,500.25");
    }
}
