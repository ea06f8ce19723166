//! Truncation rules and exact rate arithmetic shared by the return
//! calculations.
//!
//! Every figure on the return is floored, never rounded to nearest. The
//! granularity depends on the line: whole yen for computed tax amounts,
//! thousands of yen for the taxable base, hundreds of yen for net and
//! payable amounts.
//!
//! Amounts are whole yen of unbounded size, so the arithmetic runs on
//! [`BigInt`]. Rates are applied as exact integer ratios, which makes every
//! floor exact no matter how large the amount is.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Truncation granularity applied after a derivation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Truncation {
    /// The stage is exact and is not truncated.
    None,
    /// Floor to whole yen.
    Unit,
    /// Floor to a multiple of 100 yen.
    Hundred,
    /// Floor to a multiple of 1,000 yen.
    Thousand,
}

impl Truncation {
    /// Step size in yen, or `None` when no truncation applies.
    pub fn granularity(&self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Unit => Some(1),
            Self::Hundred => Some(100),
            Self::Thousand => Some(1000),
        }
    }

    /// Returns `true` if `value` is a whole multiple of the granularity.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    ///
    /// use bigdecimal::BigDecimal;
    /// use ctax_core::calculations::common::Truncation;
    ///
    /// let value = BigDecimal::from_str("120900").unwrap();
    /// assert!(Truncation::Hundred.is_aligned(&value));
    /// assert!(!Truncation::Thousand.is_aligned(&value));
    /// assert!(!Truncation::Unit.is_aligned(&BigDecimal::from_str("0.5").unwrap()));
    /// ```
    pub fn is_aligned(
        &self,
        value: &BigDecimal,
    ) -> bool {
        match self.granularity() {
            Some(_) if !value.is_integer() => false,
            Some(_) => self.divides(&floor_to_whole(value)),
            None => true,
        }
    }

    /// Returns `true` if the whole amount `value` is a multiple of the granularity.
    pub(crate) fn divides(
        &self,
        value: &BigInt,
    ) -> bool {
        match self.granularity() {
            Some(step) => value.is_multiple_of(&BigInt::from(step)),
            None => true,
        }
    }
}

/// An exact non-negative rate, held as an integer ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactRate {
    numerator: BigInt,
    denominator: BigInt,
}

impl ExactRate {
    /// Converts a decimal rate without loss, e.g. `0.078` becomes `78 / 1000`.
    pub fn from_decimal(rate: Decimal) -> Self {
        Self {
            numerator: BigInt::from(rate.mantissa()),
            denominator: pow10(u64::from(rate.scale())),
        }
    }

    /// The ratio `numerator / denominator` of two decimals.
    pub fn ratio(
        numerator: Decimal,
        denominator: Decimal,
    ) -> Self {
        let numerator = Self::from_decimal(numerator);
        let denominator = Self::from_decimal(denominator);
        Self {
            numerator: numerator.numerator * denominator.denominator,
            denominator: numerator.denominator * denominator.numerator,
        }
    }

    /// `1 + self`.
    pub fn one_plus(&self) -> Self {
        Self {
            numerator: &self.denominator + &self.numerator,
            denominator: self.denominator.clone(),
        }
    }

    /// `1 / self`.
    pub fn reciprocal(&self) -> Self {
        Self {
            numerator: self.denominator.clone(),
            denominator: self.numerator.clone(),
        }
    }

    /// `amount × self`, floored to whole yen.
    ///
    /// # Examples
    ///
    /// ```
    /// use num_bigint::BigInt;
    /// use rust_decimal_macros::dec;
    /// use ctax_core::calculations::common::ExactRate;
    ///
    /// let national = ExactRate::from_decimal(dec!(0.078));
    /// assert_eq!(national.floor_applied(&BigInt::from(11_001_000)), BigInt::from(858_078));
    ///
    /// let exclusive = ExactRate::from_decimal(dec!(0.10)).one_plus().reciprocal();
    /// assert_eq!(exclusive.floor_applied(&BigInt::from(1_000_000)), BigInt::from(909_090));
    /// ```
    pub fn floor_applied(
        &self,
        amount: &BigInt,
    ) -> BigInt {
        (amount * &self.numerator).div_floor(&self.denominator)
    }

    /// `amount × self`, floored to `scale` decimal places.
    pub fn floor_applied_scaled(
        &self,
        amount: &BigInt,
        scale: u32,
    ) -> BigDecimal {
        let shifted = (amount * pow10(u64::from(scale)) * &self.numerator).div_floor(&self.denominator);
        BigDecimal::new(shifted, i64::from(scale))
    }
}

/// `10^exponent`.
fn pow10(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

/// Converts a whole yen amount into a [`BigDecimal`] with scale zero.
pub fn to_amount(value: BigInt) -> BigDecimal {
    BigDecimal::new(value, 0)
}

/// Floors an amount to whole yen.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use num_bigint::BigInt;
/// use ctax_core::calculations::common::floor_to_whole;
///
/// let value = BigDecimal::from_str("120999.9999").unwrap();
/// assert_eq!(floor_to_whole(&value), BigInt::from(120999));
/// assert_eq!(floor_to_whole(&BigDecimal::from_str("-0.5").unwrap()), BigInt::from(-1));
/// ```
pub fn floor_to_whole(value: &BigDecimal) -> BigInt {
    let (digits, scale) = value.as_bigint_and_exponent();
    let factor = pow10(scale.unsigned_abs());
    if scale >= 0 {
        digits.div_floor(&factor)
    } else {
        digits * factor
    }
}

/// Floors a whole amount to a multiple of 100 yen.
///
/// Negative values move away from zero, so `-150` becomes `-200`.
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use ctax_core::calculations::common::floor_to_hundred;
///
/// assert_eq!(floor_to_hundred(&BigInt::from(429039)), BigInt::from(429000));
/// assert_eq!(floor_to_hundred(&BigInt::from(-150)), BigInt::from(-200));
/// ```
pub fn floor_to_hundred(value: &BigInt) -> BigInt {
    floor_to_multiple(value, 100)
}

/// Floors a whole amount to a multiple of 1,000 yen.
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use ctax_core::calculations::common::floor_to_thousand;
///
/// assert_eq!(floor_to_thousand(&BigInt::from(11001300)), BigInt::from(11001000));
/// assert_eq!(floor_to_thousand(&BigInt::from(999)), BigInt::from(0));
/// ```
pub fn floor_to_thousand(value: &BigInt) -> BigInt {
    floor_to_multiple(value, 1000)
}

fn floor_to_multiple(
    value: &BigInt,
    step: u32,
) -> BigInt {
    let step = BigInt::from(step);
    value.div_floor(&step) * step
}
