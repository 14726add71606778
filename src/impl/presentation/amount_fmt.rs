use num_format::{Locale, ToFormattedString as _};

/// Format a cash amount with thousands separators and two decimal places.
///
/// For consistency, uses en locale ('.' as decimal mark, i.e. 1,000.00)
/// regardless of user's locale. The ledger is single-currency; no symbol is
/// printed.
pub(crate) fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as i64;
    let integer_part = (cents / 100).to_formatted_string(&Locale::en);
    format!("{}{}.{:02}", sign, integer_part, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_thousands_and_pads_cents() {
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(160.0), "160.00");
        assert_eq!(format_amount(0.004), "0.00");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_amount(-36.67), "-36.67");
    }
}
