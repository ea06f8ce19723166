use bigdecimal::BigDecimal;
use serde::Serialize;
use thiserror::Error;

use crate::calculations::common::{floor_to_whole, to_amount};

/// An input amount that cannot be used for the return.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: BigDecimal },

    #[error("{field} must be a whole number of yen, got {value}")]
    Fractional { field: &'static str, value: BigDecimal },
}

/// The four amounts a return is computed from, all in whole yen.
///
/// Amounts have no upper bound. Only constructible through
/// [`PeriodInputs::new`], so a value of this type is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodInputs {
    gross_sales: BigDecimal,
    reference_period_sales: BigDecimal,
    interim_national_paid: BigDecimal,
    interim_local_paid: BigDecimal,
}

impl PeriodInputs {
    /// Validates and stores the period amounts.
    ///
    /// # Arguments
    ///
    /// * `gross_sales` - Tax-inclusive revenue for the period
    /// * `reference_period_sales` - Tax-exclusive taxable sales of the reference period
    /// * `interim_national_paid` - Interim national tax installments paid
    /// * `interim_local_paid` - Interim local tax installments paid
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] for the first amount that is negative or
    /// fractional.
    ///
    /// # Example
    ///
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use ctax_core::{InvalidInput, PeriodInputs};
    ///
    /// let yen = |value: i64| BigDecimal::from(value);
    ///
    /// let inputs = PeriodInputs::new(yen(12101430), yen(0), yen(0), yen(0)).unwrap();
    /// assert_eq!(inputs.gross_sales(), &yen(12101430));
    ///
    /// let err = PeriodInputs::new(yen(-1), yen(0), yen(0), yen(0)).unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     InvalidInput::Negative { field: "gross_sales", value: yen(-1) }
    /// );
    /// ```
    pub fn new(
        gross_sales: BigDecimal,
        reference_period_sales: BigDecimal,
        interim_national_paid: BigDecimal,
        interim_local_paid: BigDecimal,
    ) -> Result<Self, InvalidInput> {
        Ok(Self {
            gross_sales: Self::validate_amount("gross_sales", gross_sales)?,
            reference_period_sales: Self::validate_amount(
                "reference_period_sales",
                reference_period_sales,
            )?,
            interim_national_paid: Self::validate_amount(
                "interim_national_paid",
                interim_national_paid,
            )?,
            interim_local_paid: Self::validate_amount("interim_local_paid", interim_local_paid)?,
        })
    }

    /// Checks a single amount and returns it with its scale normalized to zero.
    pub fn validate_amount(
        field: &'static str,
        value: BigDecimal,
    ) -> Result<BigDecimal, InvalidInput> {
        if value < BigDecimal::from(0) {
            return Err(InvalidInput::Negative { field, value });
        }
        if !value.is_integer() {
            return Err(InvalidInput::Fractional { field, value });
        }
        Ok(to_amount(floor_to_whole(&value)))
    }

    pub fn gross_sales(&self) -> &BigDecimal {
        &self.gross_sales
    }

    pub fn reference_period_sales(&self) -> &BigDecimal {
        &self.reference_period_sales
    }

    pub fn interim_national_paid(&self) -> &BigDecimal {
        &self.interim_national_paid
    }

    pub fn interim_local_paid(&self) -> &BigDecimal {
        &self.interim_local_paid
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn yen(value: i64) -> BigDecimal {
        BigDecimal::from(value)
    }

    #[test]
    fn new_accepts_zero_amounts() {
        let inputs = PeriodInputs::new(yen(0), yen(0), yen(0), yen(0)).unwrap();

        assert_eq!(inputs.gross_sales(), &yen(0));
        assert_eq!(inputs.interim_local_paid(), &yen(0));
    }

    #[test]
    fn new_reports_the_offending_field() {
        let result = PeriodInputs::new(yen(100), yen(0), yen(0), yen(-5));

        assert_eq!(
            result,
            Err(InvalidInput::Negative {
                field: "interim_local_paid",
                value: yen(-5),
            })
        );
    }

    #[test]
    fn validate_amount_rejects_fractional_yen() {
        let value = BigDecimal::from_str("100.5").unwrap();

        let result = PeriodInputs::validate_amount("gross_sales", value.clone());

        assert_eq!(
            result,
            Err(InvalidInput::Fractional {
                field: "gross_sales",
                value,
            })
        );
    }

    #[test]
    fn validate_amount_accepts_trailing_zero_scale() {
        let value = BigDecimal::from_str("100.00").unwrap();

        let result = PeriodInputs::validate_amount("gross_sales", value).unwrap();

        assert_eq!(result, yen(100));
        assert_eq!(result.as_bigint_and_exponent().1, 0);
    }

    #[test]
    fn validate_amount_accepts_amounts_beyond_machine_integers() {
        let text = format!("1{}", "0".repeat(60));
        let value = BigDecimal::from_str(&text).unwrap();

        let result = PeriodInputs::validate_amount("gross_sales", value).unwrap();

        assert_eq!(result.as_bigint_and_exponent().0.to_string(), text);
    }
}
