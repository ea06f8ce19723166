//! The ordered derivation chain of the simplified return.
//!
//! Each stage consumes the truncated output of the stage before it. Rounding
//! is never deferred to the end of the chain.
//!
//! | # | Stage | Truncation |
//! |---|-------|------------|
//! | 1 | Tax-exclusive sales = gross / (1 + standard rate) | yen |
//! | 2 | Taxable base | 1,000 yen |
//! | 3 | National tax = taxable base × national rate | yen |
//! | 4 | Deemed credit = national tax × deemed-purchase rate | yen |
//! | 5 | Net national tax = national tax − deductions | 100 yen |
//! | 6 | National payable = net national tax − interim | 100 yen |
//! | 7 | Local tax base = net national tax | 100 yen |
//! | 8 | Local tax = local tax base × 22 / 78 | yen, then 100 yen |
//! | 9 | Local payable = local tax − interim | 100 yen |
//! | 10 | Total payable = national payable + local payable | none |

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::common::Truncation;
use super::field_mapping::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivationStage {
    TaxableSalesExclusive,
    TaxableBase,
    NationalTax,
    DeemedInputTaxCredit,
    NetNationalTax,
    NationalPayable,
    LocalTaxBase,
    LocalTax,
    LocalPayable,
    TotalPayable,
}

impl DerivationStage {
    /// All stages in evaluation order.
    pub const ALL: [DerivationStage; 10] = [
        Self::TaxableSalesExclusive,
        Self::TaxableBase,
        Self::NationalTax,
        Self::DeemedInputTaxCredit,
        Self::NetNationalTax,
        Self::NationalPayable,
        Self::LocalTaxBase,
        Self::LocalTax,
        Self::LocalPayable,
        Self::TotalPayable,
    ];

    /// Field the stage's output is entered as.
    pub fn field(&self) -> FieldId {
        match self {
            Self::TaxableSalesExclusive => FieldId::TaxableSalesExclusive,
            Self::TaxableBase => FieldId::TaxableBase,
            Self::NationalTax => FieldId::NationalTax,
            Self::DeemedInputTaxCredit => FieldId::DeemedInputTaxCredit,
            Self::NetNationalTax => FieldId::NetNationalTax,
            Self::NationalPayable => FieldId::NationalPayable,
            Self::LocalTaxBase => FieldId::LocalTaxBase,
            Self::LocalTax => FieldId::LocalTax,
            Self::LocalPayable => FieldId::LocalPayable,
            Self::TotalPayable => FieldId::TotalPayable,
        }
    }

    /// Granularity of the stage's final truncation.
    pub fn truncation(&self) -> Truncation {
        match self {
            Self::TaxableSalesExclusive => Truncation::Unit,
            Self::TaxableBase => Truncation::Thousand,
            Self::NationalTax => Truncation::Unit,
            Self::DeemedInputTaxCredit => Truncation::Unit,
            Self::NetNationalTax => Truncation::Hundred,
            Self::NationalPayable => Truncation::Hundred,
            Self::LocalTaxBase => Truncation::Hundred,
            Self::LocalTax => Truncation::Hundred,
            Self::LocalPayable => Truncation::Hundred,
            Self::TotalPayable => Truncation::None,
        }
    }

    /// How the stage's value is obtained from earlier figures.
    ///
    /// Recorded on every `stage derived` trace event.
    ///
    /// # Example
    ///
    /// ```
    /// use ctax_core::calculations::DerivationStage;
    ///
    /// assert_eq!(
    ///     DerivationStage::NationalTax.formula(),
    ///     "taxable base × national rate"
    /// );
    /// ```
    pub fn formula(&self) -> &'static str {
        match self {
            Self::TaxableSalesExclusive => "gross sales / (1 + standard rate)",
            Self::TaxableBase => "taxable sales exclusive",
            Self::NationalTax => "taxable base × national rate",
            Self::DeemedInputTaxCredit => "national tax × deemed purchase rate",
            Self::NetNationalTax => "national tax + bad debt tax − total deductions",
            Self::NationalPayable => "net national tax − interim national paid",
            Self::LocalTaxBase => "net national tax",
            Self::LocalTax => "local tax base × local ratio, floored to yen",
            Self::LocalPayable => "local tax − interim local paid",
            Self::TotalPayable => "national payable + local payable",
        }
    }

    /// Records a stage's output and checks its alignment.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a multiple of the stage's granularity. That
    /// can only happen through a defect in the worksheet.
    pub(crate) fn check(
        &self,
        value: BigInt,
    ) -> BigInt {
        assert!(
            self.truncation().divides(&value),
            "{:?} produced {} which is not aligned to {:?}",
            self,
            value,
            self.truncation()
        );
        trace!(
            stage = ?self,
            field = self.field().as_str(),
            formula = self.formula(),
            %value,
            "stage derived"
        );
        value
    }
}
