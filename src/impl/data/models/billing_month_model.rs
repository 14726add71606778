use std::str::FromStr;
use std::sync::LazyLock;

use fractic_server_error::ServerError;
use regex::Regex;
use serde::Deserialize;

use crate::entities::BillingMonth;
use crate::errors::InvalidBillingMonth;

static BILLING_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("static regex always compiles"));

/// `YYYY-MM` billing month. Month must be 01..=12; anything else (including a
/// full date) is rejected here so the domain never sees a bad month.
#[derive(Debug)]
pub(crate) struct BillingMonthModel(pub BillingMonth);

impl FromStr for BillingMonthModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = BILLING_MONTH_RE
            .captures(s.trim())
            .ok_or_else(|| InvalidBillingMonth::new(s))?;
        let year: i32 = captures[1]
            .parse()
            .map_err(|_| InvalidBillingMonth::new(s))?;
        let month: u32 = captures[2]
            .parse()
            .map_err(|_| InvalidBillingMonth::new(s))?;
        if !(1..=12).contains(&month) {
            return Err(InvalidBillingMonth::new(s));
        }
        Ok(BillingMonthModel(BillingMonth::new(year, month)))
    }
}

impl<'de> Deserialize<'de> for BillingMonthModel {
    fn deserialize<D>(deserializer: D) -> Result<BillingMonthModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BillingMonthModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<BillingMonthModel> for BillingMonth {
    fn from(model: BillingMonthModel) -> BillingMonth {
        model.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_months() {
        assert_eq!(
            BillingMonthModel::from_str("2024-06").unwrap().0,
            BillingMonth::new(2024, 6)
        );
        assert_eq!(
            BillingMonthModel::from_str("2025-12").unwrap().0,
            BillingMonth::new(2025, 12)
        );
    }

    #[test]
    fn rejects_out_of_range_and_full_dates() {
        assert!(BillingMonthModel::from_str("2024-13").is_err());
        assert!(BillingMonthModel::from_str("2024-00").is_err());
        assert!(BillingMonthModel::from_str("2024-06-01").is_err());
        assert!(BillingMonthModel::from_str("junk").is_err());
    }
}
