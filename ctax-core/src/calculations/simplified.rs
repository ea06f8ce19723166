//! Simplified-scheme consumption tax return calculations.
//!
//! This module computes every figure of the annual consumption tax return for
//! a business filing under the simplified scheme, with tax-inclusive
//! bookkeeping and all sales at the standard rate. The input tax credit is a
//! fixed share (the deemed-purchase rate) of output tax; no purchase records
//! are involved.
//!
//! # Worksheet Structure
//!
//! | Form 1 line | Description |
//! |-------------|-------------|
//! | 15 | Taxable sales, tax exclusive: gross ÷ 1.10, floored to yen |
//! | 1  | Taxable base: line 15 floored to 1,000 yen |
//! | 2  | Consumption tax: line 1 × 7.8%, floored to yen |
//! | 3  | Tax on bad debts recovered (always 0) |
//! | 4  | Deemed input tax credit: line 2 × deemed-purchase rate, floored to yen |
//! | 5, 6 | Sales returns and other deductions (always 0) |
//! | 7  | Total deductions: lines 4 + 5 + 6 |
//! | 8  | Refund for insufficient deductions: line 7 − lines 2 − 3, if positive |
//! | 9  | Net consumption tax: lines 2 + 3 − 7, floored to 100 yen |
//! | 10 | Interim consumption tax paid |
//! | 11 | Consumption tax payable: line 9 − line 10, floored to 100 yen |
//! | 12 | Interim refund: the magnitude of line 11, if negative |
//! | 18 | Basis for local tax: line 9 |
//! | 20 | Local consumption tax: line 18 × 22/78, floored to yen then to 100 yen |
//! | 21 | Interim local tax paid |
//! | 22 | Local tax payable: line 20 − line 21, floored to 100 yen |
//! | 23 | Interim local refund: the magnitude of line 22, if negative |
//! | 26 | Total payable: lines 11 + 22 |
//!
//! Payable lines stay signed. When the interim installments exceed the tax,
//! the payable is negative and the matching refund line carries its magnitude.
//!
//! Amounts have no upper bound. Every stage runs on [`BigInt`] and applies
//! rates as exact integer ratios, so each floor is exact.
//!
//! # Example
//!
//! ```
//! use bigdecimal::BigDecimal;
//! use ctax_core::{FilingYearConfig, PeriodInputs};
//! use ctax_core::calculations::{SimplifiedTaxConfig, SimplifiedTaxWorksheet};
//!
//! let yen = |value: i64| BigDecimal::from(value);
//! let config = SimplifiedTaxConfig::from_filing_year_config(&FilingYearConfig::standard_2025());
//! let worksheet = SimplifiedTaxWorksheet::new(config);
//!
//! let inputs = PeriodInputs::new(yen(12101430), yen(0), yen(0), yen(0)).unwrap();
//! let result = worksheet.calculate(&inputs).unwrap();
//!
//! assert_eq!(result.taxable_base, yen(11001000));
//! assert_eq!(result.national_tax, yen(858078));
//! assert_eq!(result.net_national_tax, yen(429000));
//! assert_eq!(result.local_tax, yen(120900));
//! assert_eq!(result.total_payable, yen(549900));
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::common::{ExactRate, floor_to_hundred, floor_to_thousand, floor_to_whole, to_amount};
use super::derivation::DerivationStage;
use super::field_mapping::{FieldId, FieldMapping};
use crate::{FilingYearConfig, PeriodInputs};

/// Tax on recovered bad debts (Form 1 line 3). No bad debts are handled.
const BAD_DEBT_TAX: i64 = 0;

/// Tax on sales returns and discounts (Form 1 line 5). No adjustments are handled.
const SALES_RETURN_TAX: i64 = 0;

/// Other deductible tax (Form 1 line 6).
const OTHER_DEDUCTIONS: i64 = 0;

/// Decimal places kept on the tax-exclusive quotient before it is floored.
const QUOTIENT_SCALE: u32 = 4;

/// Errors that can occur during simplified return calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimplifiedTaxError {
    /// The standard rate must be in (0, 1].
    #[error("standard rate must be between 0 and 1, got {0}")]
    InvalidStandardRate(Decimal),

    /// The national rate must be positive and no greater than the standard rate.
    #[error("national rate must be between 0 and the standard rate, got {0}")]
    InvalidNationalRate(Decimal),

    /// The local ratio needs a positive denominator and a non-negative numerator.
    #[error("local ratio must be non-negative with a positive denominator, got {numerator}/{denominator}")]
    InvalidLocalRatio {
        numerator: Decimal,
        denominator: Decimal,
    },

    /// The deemed-purchase rate must be in (0, 1].
    #[error("deemed purchase rate must be between 0 and 1, got {0}")]
    InvalidDeemedPurchaseRate(Decimal),
}

/// Rates used by the worksheet.
///
/// Usually built from a [`FilingYearConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedTaxConfig {
    /// Standard rate, national and local combined (10%).
    pub standard_rate: Decimal,

    /// National share of the standard rate (7.8%).
    pub national_rate: Decimal,

    /// Numerator of the local-to-national apportionment (22).
    pub local_ratio_numerator: Decimal,

    /// Denominator of the local-to-national apportionment (78).
    pub local_ratio_denominator: Decimal,

    /// Share of output tax credited as input tax (50% for category 5).
    pub deemed_purchase_rate: Decimal,
}

impl SimplifiedTaxConfig {
    /// Creates a new configuration from a [`FilingYearConfig`].
    ///
    /// Logs a warning when the configured deemed-purchase rate differs from
    /// the statutory rate of the configured business category.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use ctax_core::FilingYearConfig;
    /// use ctax_core::calculations::SimplifiedTaxConfig;
    ///
    /// let config = SimplifiedTaxConfig::from_filing_year_config(&FilingYearConfig::standard_2025());
    ///
    /// assert_eq!(config.standard_rate, dec!(0.10));
    /// assert_eq!(config.deemed_purchase_rate, dec!(0.50));
    /// ```
    pub fn from_filing_year_config(config: &FilingYearConfig) -> Self {
        let statutory = config.business_category.statutory_deemed_purchase_rate();
        if config.deemed_purchase_rate != statutory {
            warn!(
                category = config.business_category.as_str(),
                configured = %config.deemed_purchase_rate,
                statutory = %statutory,
                "Deemed purchase rate differs from the category's statutory rate"
            );
        }

        Self {
            standard_rate: config.standard_rate,
            national_rate: config.national_rate,
            local_ratio_numerator: config.local_ratio_numerator,
            local_ratio_denominator: config.local_ratio_denominator,
            deemed_purchase_rate: config.deemed_purchase_rate,
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`SimplifiedTaxError`] if:
    /// - `standard_rate` is not in (0, 1]
    /// - `national_rate` is not in (0, standard_rate]
    /// - `local_ratio_denominator` is not positive or `local_ratio_numerator` is negative
    /// - `deemed_purchase_rate` is not in (0, 1]
    pub fn validate(&self) -> Result<(), SimplifiedTaxError> {
        if self.standard_rate <= Decimal::ZERO || self.standard_rate > Decimal::ONE {
            return Err(SimplifiedTaxError::InvalidStandardRate(self.standard_rate));
        }
        if self.national_rate <= Decimal::ZERO || self.national_rate > self.standard_rate {
            return Err(SimplifiedTaxError::InvalidNationalRate(self.national_rate));
        }
        if self.local_ratio_denominator <= Decimal::ZERO
            || self.local_ratio_numerator < Decimal::ZERO
        {
            return Err(SimplifiedTaxError::InvalidLocalRatio {
                numerator: self.local_ratio_numerator,
                denominator: self.local_ratio_denominator,
            });
        }
        if self.deemed_purchase_rate <= Decimal::ZERO || self.deemed_purchase_rate > Decimal::ONE {
            return Err(SimplifiedTaxError::InvalidDeemedPurchaseRate(
                self.deemed_purchase_rate,
            ));
        }
        Ok(())
    }
}

/// Result of the simplified return calculations.
///
/// Holds every line of the return together with the pre-truncation values of
/// the audited lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedTaxResult {
    /// Tax-inclusive revenue the return was computed from.
    pub gross_sales: BigDecimal,

    /// Quotient of gross sales over 1 + standard rate, floored to four
    /// decimal places.
    pub taxable_sales_exclusive_unrounded: BigDecimal,

    /// Taxable sales this period, tax exclusive (Form 1 line 15).
    pub taxable_sales_exclusive: BigDecimal,

    /// Taxable sales of the reference period (Form 1 line 16).
    pub reference_period_sales: BigDecimal,

    /// Taxable base (Form 1 line 1).
    pub taxable_base: BigDecimal,

    /// Consumption tax at the national rate (Form 1 line 2).
    pub national_tax: BigDecimal,

    /// Basis for the deemed credit (Schedule 5-3 line 4). Equal to the
    /// national tax since no adjustments exist.
    pub base_national_tax: BigDecimal,

    /// Form 1 line 3.
    pub bad_debt_tax: BigDecimal,

    /// Deemed input tax credit (Form 1 line 4).
    pub deemed_input_tax_credit: BigDecimal,

    /// Form 1 line 5.
    pub sales_return_tax: BigDecimal,

    /// Form 1 line 6.
    pub other_deductions: BigDecimal,

    /// Total deductible tax (Form 1 line 7).
    pub total_deductions: BigDecimal,

    /// Refund for insufficient deductions (Form 1 line 8).
    pub deduction_shortfall_refund: BigDecimal,

    /// Net national tax before the 100-yen truncation.
    pub net_national_tax_unrounded: BigDecimal,

    /// Net consumption tax (Form 1 line 9).
    pub net_national_tax: BigDecimal,

    /// Form 1 line 10.
    pub interim_national_paid: BigDecimal,

    /// National payable before the 100-yen truncation.
    pub national_payable_unrounded: BigDecimal,

    /// Consumption tax payable (Form 1 line 11). Negative when the interim
    /// payment exceeds the net tax.
    pub national_payable: BigDecimal,

    /// Interim refund (Form 1 line 12), present only when the national
    /// payable is negative. Equal to its magnitude.
    pub national_interim_refund: Option<BigDecimal>,

    /// Basis for local consumption tax (Form 1 line 18).
    pub local_tax_base: BigDecimal,

    /// Local tax floored to yen, before the 100-yen truncation.
    pub local_tax_unrounded: BigDecimal,

    /// Local consumption tax (Form 1 line 20).
    pub local_tax: BigDecimal,

    /// Form 1 line 21.
    pub interim_local_paid: BigDecimal,

    /// Local payable before the 100-yen truncation.
    pub local_payable_unrounded: BigDecimal,

    /// Local consumption tax payable (Form 1 line 22). May be negative.
    pub local_payable: BigDecimal,

    /// Interim local refund (Form 1 line 23).
    pub local_interim_refund: Option<BigDecimal>,

    /// Total payable (Form 1 line 26).
    pub total_payable: BigDecimal,
}

impl SimplifiedTaxResult {
    /// Builds the field mapping handed to presenters.
    ///
    /// Every field is present. Refund lines without a refund are entered as 0.
    pub fn field_mapping(&self) -> FieldMapping {
        let mut mapping = FieldMapping::new();

        mapping.insert(FieldId::GrossSales, self.gross_sales.clone(), None);
        mapping.insert(
            FieldId::TaxableSalesExclusive,
            self.taxable_sales_exclusive.clone(),
            Some(self.taxable_sales_exclusive_unrounded.clone()),
        );
        mapping.insert(
            FieldId::ReferencePeriodSales,
            self.reference_period_sales.clone(),
            None,
        );
        mapping.insert(FieldId::TaxableBase, self.taxable_base.clone(), None);
        mapping.insert(FieldId::NationalTax, self.national_tax.clone(), None);
        mapping.insert(FieldId::BaseNationalTax, self.base_national_tax.clone(), None);
        mapping.insert(FieldId::BadDebtTax, self.bad_debt_tax.clone(), None);
        mapping.insert(
            FieldId::DeemedInputTaxCredit,
            self.deemed_input_tax_credit.clone(),
            None,
        );
        mapping.insert(FieldId::SalesReturnTax, self.sales_return_tax.clone(), None);
        mapping.insert(FieldId::OtherDeductions, self.other_deductions.clone(), None);
        mapping.insert(FieldId::TotalDeductions, self.total_deductions.clone(), None);
        mapping.insert(
            FieldId::DeductionShortfallRefund,
            self.deduction_shortfall_refund.clone(),
            None,
        );
        mapping.insert(
            FieldId::NetNationalTax,
            self.net_national_tax.clone(),
            Some(self.net_national_tax_unrounded.clone()),
        );
        mapping.insert(
            FieldId::InterimNationalPaid,
            self.interim_national_paid.clone(),
            None,
        );
        mapping.insert(
            FieldId::NationalPayable,
            self.national_payable.clone(),
            Some(self.national_payable_unrounded.clone()),
        );
        mapping.insert(
            FieldId::NationalInterimRefund,
            self.national_interim_refund.clone().unwrap_or_default(),
            None,
        );
        mapping.insert(FieldId::LocalTaxBase, self.local_tax_base.clone(), None);
        mapping.insert(
            FieldId::LocalTax,
            self.local_tax.clone(),
            Some(self.local_tax_unrounded.clone()),
        );
        mapping.insert(FieldId::InterimLocalPaid, self.interim_local_paid.clone(), None);
        mapping.insert(
            FieldId::LocalPayable,
            self.local_payable.clone(),
            Some(self.local_payable_unrounded.clone()),
        );
        mapping.insert(
            FieldId::LocalInterimRefund,
            self.local_interim_refund.clone().unwrap_or_default(),
            None,
        );
        mapping.insert(FieldId::TotalPayable, self.total_payable.clone(), None);

        mapping
    }
}

/// Calculator for the simplified-scheme return.
///
/// Holds the rates and derives every line from a validated [`PeriodInputs`].
/// The calculation is pure: the same inputs always produce the same result.
#[derive(Debug, Clone)]
pub struct SimplifiedTaxWorksheet {
    config: SimplifiedTaxConfig,
}

impl SimplifiedTaxWorksheet {
    pub fn new(config: SimplifiedTaxConfig) -> Self {
        Self { config }
    }

    /// Calculates the complete return.
    ///
    /// # Errors
    ///
    /// Returns [`SimplifiedTaxError`] if the configuration is invalid. The
    /// inputs themselves were validated when the [`PeriodInputs`] was built.
    ///
    /// # Example: Interim Payment Exceeds Tax
    ///
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use ctax_core::{FilingYearConfig, PeriodInputs};
    /// use ctax_core::calculations::{SimplifiedTaxConfig, SimplifiedTaxWorksheet};
    ///
    /// let yen = |value: i64| BigDecimal::from(value);
    /// let config = SimplifiedTaxConfig::from_filing_year_config(&FilingYearConfig::standard_2025());
    /// let worksheet = SimplifiedTaxWorksheet::new(config);
    ///
    /// let inputs = PeriodInputs::new(yen(12101430), yen(0), yen(500000), yen(0)).unwrap();
    /// let result = worksheet.calculate(&inputs).unwrap();
    ///
    /// assert_eq!(result.national_payable, yen(-71000));
    /// assert_eq!(result.national_interim_refund, Some(yen(71000)));
    /// ```
    pub fn calculate(
        &self,
        inputs: &PeriodInputs,
    ) -> Result<SimplifiedTaxResult, SimplifiedTaxError> {
        self.config.validate()?;

        let gross_sales = floor_to_whole(inputs.gross_sales());
        let interim_national_paid = floor_to_whole(inputs.interim_national_paid());
        let interim_local_paid = floor_to_whole(inputs.interim_local_paid());

        // Form 1 line 15: tax-exclusive sales
        let (taxable_sales_exclusive_unrounded, taxable_sales_exclusive) =
            self.taxable_sales_exclusive(&gross_sales);

        // Line 1: taxable base
        let taxable_base = self.taxable_base(&taxable_sales_exclusive);

        // Line 2: output tax at the national rate
        let national_tax = self.national_tax(&taxable_base);

        // Schedule 5-3 line 4: no adjustments, so the basis is line 2 itself
        let base_national_tax = national_tax.clone();

        // Line 4: deemed credit
        let deemed_input_tax_credit = self.deemed_input_tax_credit(&base_national_tax);

        // Lines 7 and 8
        let total_deductions = self.total_deductions(&deemed_input_tax_credit);
        let deduction_shortfall_refund =
            self.deduction_shortfall_refund(&national_tax, &total_deductions);

        // Line 9: net national tax
        let (net_national_tax_unrounded, net_national_tax) =
            self.net_national_tax(&national_tax, &total_deductions);

        // Lines 11 and 12
        let (national_payable_unrounded, national_payable) =
            self.national_payable(&net_national_tax, &interim_national_paid);
        let national_interim_refund = self.interim_refund(&national_payable);

        // Line 18: local tax piggybacks on the truncated net national tax
        let local_tax_base = self.local_tax_base(&net_national_tax);

        // Line 20
        let (local_tax_unrounded, local_tax) = self.local_tax(&local_tax_base);

        // Lines 22 and 23
        let (local_payable_unrounded, local_payable) =
            self.local_payable(&local_tax, &interim_local_paid);
        let local_interim_refund = self.interim_refund(&local_payable);

        // Line 26
        let total_payable = self.total_payable(&national_payable, &local_payable);

        debug!(
            taxable_base = %taxable_base,
            net_national_tax = %net_national_tax,
            local_tax = %local_tax,
            total_payable = %total_payable,
            "Simplified return calculated"
        );

        Ok(SimplifiedTaxResult {
            gross_sales: inputs.gross_sales().clone(),
            taxable_sales_exclusive_unrounded,
            taxable_sales_exclusive: to_amount(taxable_sales_exclusive),
            reference_period_sales: inputs.reference_period_sales().clone(),
            taxable_base: to_amount(taxable_base),
            national_tax: to_amount(national_tax),
            base_national_tax: to_amount(base_national_tax),
            bad_debt_tax: BigDecimal::from(BAD_DEBT_TAX),
            deemed_input_tax_credit: to_amount(deemed_input_tax_credit),
            sales_return_tax: BigDecimal::from(SALES_RETURN_TAX),
            other_deductions: BigDecimal::from(OTHER_DEDUCTIONS),
            total_deductions: to_amount(total_deductions),
            deduction_shortfall_refund: to_amount(deduction_shortfall_refund),
            net_national_tax_unrounded: to_amount(net_national_tax_unrounded),
            net_national_tax: to_amount(net_national_tax),
            interim_national_paid: inputs.interim_national_paid().clone(),
            national_payable_unrounded: to_amount(national_payable_unrounded),
            national_payable: to_amount(national_payable),
            national_interim_refund: national_interim_refund.map(to_amount),
            local_tax_base: to_amount(local_tax_base),
            local_tax_unrounded: to_amount(local_tax_unrounded),
            local_tax: to_amount(local_tax),
            interim_local_paid: inputs.interim_local_paid().clone(),
            local_payable_unrounded: to_amount(local_payable_unrounded),
            local_payable: to_amount(local_payable),
            local_interim_refund: local_interim_refund.map(to_amount),
            total_payable: to_amount(total_payable),
        })
    }

    /// Converts tax-inclusive gross sales to tax-exclusive sales (Line 15).
    ///
    /// Returns the quotient to four decimal places and the quotient floored
    /// to yen.
    fn taxable_sales_exclusive(
        &self,
        gross_sales: &BigInt,
    ) -> (BigDecimal, BigInt) {
        let exclusive = ExactRate::from_decimal(self.config.standard_rate)
            .one_plus()
            .reciprocal();
        let quotient = exclusive.floor_applied_scaled(gross_sales, QUOTIENT_SCALE);
        let sales =
            DerivationStage::TaxableSalesExclusive.check(exclusive.floor_applied(gross_sales));
        (quotient, sales)
    }

    /// Truncates exclusive sales to the taxable base (Line 1).
    fn taxable_base(
        &self,
        taxable_sales_exclusive: &BigInt,
    ) -> BigInt {
        DerivationStage::TaxableBase.check(floor_to_thousand(taxable_sales_exclusive))
    }

    /// Output tax at the national rate (Line 2).
    fn national_tax(
        &self,
        taxable_base: &BigInt,
    ) -> BigInt {
        let rate = ExactRate::from_decimal(self.config.national_rate);
        DerivationStage::NationalTax.check(rate.floor_applied(taxable_base))
    }

    /// Deemed input tax credit (Line 4).
    ///
    /// The credit is a fixed share of output tax; actual purchases play no role.
    fn deemed_input_tax_credit(
        &self,
        base_national_tax: &BigInt,
    ) -> BigInt {
        let rate = ExactRate::from_decimal(self.config.deemed_purchase_rate);
        DerivationStage::DeemedInputTaxCredit.check(rate.floor_applied(base_national_tax))
    }

    /// Total deductible tax (Line 7 = lines 4 + 5 + 6).
    fn total_deductions(
        &self,
        deemed_input_tax_credit: &BigInt,
    ) -> BigInt {
        deemed_input_tax_credit + SALES_RETURN_TAX + OTHER_DEDUCTIONS
    }

    /// Refund for insufficient deductions (Line 8 = line 7 − lines 2 − 3).
    fn deduction_shortfall_refund(
        &self,
        national_tax: &BigInt,
        total_deductions: &BigInt,
    ) -> BigInt {
        let shortfall = total_deductions - national_tax - BAD_DEBT_TAX;
        shortfall.max(BigInt::zero())
    }

    /// Net national tax (Line 9 = lines 2 + 3 − 7).
    ///
    /// Returns the difference and the difference floored to 100 yen. A
    /// shortfall is reported on line 8 instead, so the difference is never
    /// below zero.
    fn net_national_tax(
        &self,
        national_tax: &BigInt,
        total_deductions: &BigInt,
    ) -> (BigInt, BigInt) {
        let difference = (national_tax + BAD_DEBT_TAX - total_deductions).max(BigInt::zero());
        let net = DerivationStage::NetNationalTax.check(floor_to_hundred(&difference));
        (difference, net)
    }

    /// National tax payable (Line 11 = line 9 − line 10).
    fn national_payable(
        &self,
        net_national_tax: &BigInt,
        interim_national_paid: &BigInt,
    ) -> (BigInt, BigInt) {
        let difference = net_national_tax - interim_national_paid;
        if difference.is_negative() {
            warn!(
                net_national_tax = %net_national_tax,
                interim_national_paid = %interim_national_paid,
                "Interim national payment exceeds net tax; payable is negative"
            );
        }
        let payable = DerivationStage::NationalPayable.check(floor_to_hundred(&difference));
        (difference, payable)
    }

    /// Basis for local tax (Line 18). Always the truncated net national tax.
    fn local_tax_base(
        &self,
        net_national_tax: &BigInt,
    ) -> BigInt {
        DerivationStage::LocalTaxBase.check(net_national_tax.clone())
    }

    /// Local consumption tax (Line 20).
    ///
    /// Floors to yen first, then to 100 yen. Returns both values.
    fn local_tax(
        &self,
        local_tax_base: &BigInt,
    ) -> (BigInt, BigInt) {
        let ratio = ExactRate::ratio(
            self.config.local_ratio_numerator,
            self.config.local_ratio_denominator,
        );
        let in_yen = ratio.floor_applied(local_tax_base);
        let tax = DerivationStage::LocalTax.check(floor_to_hundred(&in_yen));
        (in_yen, tax)
    }

    /// Local tax payable (Line 22 = line 20 − line 21).
    fn local_payable(
        &self,
        local_tax: &BigInt,
        interim_local_paid: &BigInt,
    ) -> (BigInt, BigInt) {
        let difference = local_tax - interim_local_paid;
        if difference.is_negative() {
            warn!(
                local_tax = %local_tax,
                interim_local_paid = %interim_local_paid,
                "Interim local payment exceeds local tax; payable is negative"
            );
        }
        let payable = DerivationStage::LocalPayable.check(floor_to_hundred(&difference));
        (difference, payable)
    }

    /// Interim refund (Lines 12 and 23): the magnitude of a negative payable.
    fn interim_refund(
        &self,
        payable: &BigInt,
    ) -> Option<BigInt> {
        payable.is_negative().then(|| -payable)
    }

    /// Total payable (Line 26). Both addends are already truncated; the sum
    /// is taken as is.
    fn total_payable(
        &self,
        national_payable: &BigInt,
        local_payable: &BigInt,
    ) -> BigInt {
        DerivationStage::TotalPayable.check(national_payable + local_payable)
    }
}
