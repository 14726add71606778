use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::errors::InvalidPaymentAmount;

/// Cash amount in accounting notation: thousands separators allowed,
/// parentheses mean negative ("(1,234.56)").
#[derive(Debug)]
pub(crate) struct CashAmountModel(pub f64);

impl FromStr for CashAmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.replace(',', "");
        let trimmed = raw.trim();
        let is_negative = trimmed.starts_with('(') && trimmed.ends_with(')');
        let numeric_part = trimmed.trim_matches(|c| c == '(' || c == ')');
        let amount = numeric_part
            .parse::<f64>()
            .map_err(|_| InvalidPaymentAmount::new(numeric_part))?;
        if !amount.is_finite() {
            return Err(InvalidPaymentAmount::new(numeric_part));
        }
        Ok(CashAmountModel(if is_negative { -amount } else { amount }))
    }
}

impl From<CashAmountModel> for f64 {
    fn from(model: CashAmountModel) -> f64 {
        model.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_separated_amounts() {
        assert_eq!(CashAmountModel::from_str("160").unwrap().0, 160.0);
        assert_eq!(CashAmountModel::from_str("1,234.56").unwrap().0, 1234.56);
    }

    #[test]
    fn parentheses_mean_negative() {
        assert_eq!(CashAmountModel::from_str("(36.67)").unwrap().0, -36.67);
    }

    #[test]
    fn rejects_garbage() {
        assert!(CashAmountModel::from_str("abc").is_err());
        assert!(CashAmountModel::from_str("NaN").is_err());
    }
}
