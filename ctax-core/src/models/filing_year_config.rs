use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::BusinessCategory;

/// First Gregorian year of the Reiwa era is Reiwa 1.
const REIWA_OFFSET: i32 = 2018;

/// Rates and category for one filing year.
///
/// Every constant the return depends on lives here so that another year or
/// category is a matter of configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingYearConfig {
    pub filing_year: i32,
    /// Standard consumption tax rate, national and local combined (e.g. 0.10).
    pub standard_rate: Decimal,
    /// National share of the standard rate (e.g. 0.078).
    pub national_rate: Decimal,
    /// Local tax is net national tax × numerator / denominator.
    pub local_ratio_numerator: Decimal,
    pub local_ratio_denominator: Decimal,
    pub business_category: BusinessCategory,
    pub deemed_purchase_rate: Decimal,
}

impl FilingYearConfig {
    /// Configuration for the 2025 (Reiwa 7) return of a category 5 business.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ctax_core::{BusinessCategory, FilingYearConfig};
    ///
    /// let config = FilingYearConfig::standard_2025();
    ///
    /// assert_eq!(config.national_rate, dec!(0.078));
    /// assert_eq!(config.business_category, BusinessCategory::Fifth);
    /// assert_eq!(config.era_year(), 7);
    /// ```
    pub fn standard_2025() -> Self {
        Self {
            filing_year: 2025,
            standard_rate: dec!(0.10),
            national_rate: dec!(0.078),
            local_ratio_numerator: dec!(22),
            local_ratio_denominator: dec!(78),
            business_category: BusinessCategory::Fifth,
            deemed_purchase_rate: dec!(0.50),
        }
    }

    /// Reiwa era year of the filing year.
    pub fn era_year(&self) -> i32 {
        self.filing_year - REIWA_OFFSET
    }

    /// First and last day of the taxable period (the calendar year).
    ///
    /// Returns `None` if the filing year is outside chrono's date range.
    pub fn taxable_period(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(self.filing_year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(self.filing_year, 12, 31)?;
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn era_year_counts_from_2019() {
        let config = FilingYearConfig {
            filing_year: 2019,
            ..FilingYearConfig::standard_2025()
        };

        assert_eq!(config.era_year(), 1);
    }

    #[test]
    fn taxable_period_spans_calendar_year() {
        let config = FilingYearConfig::standard_2025();

        let period = config.taxable_period();

        assert_eq!(
            period,
            Some((
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            ))
        );
    }

    #[test]
    fn taxable_period_is_none_for_out_of_range_year() {
        let config = FilingYearConfig {
            filing_year: i32::MAX,
            ..FilingYearConfig::standard_2025()
        };

        assert_eq!(config.taxable_period(), None);
    }
}
