//! Field identifiers, the ordered field mapping, and where each field is
//! entered on the return.
//!
//! The mapping is the only thing a presenter needs: every figure is computed
//! once by the worksheet and looked up here by a stable [`FieldId`].
//!
//! # Forms
//!
//! | Form | Contents |
//! |------|----------|
//! | Schedule 4-3 | Tax amounts by rate (simplified scheme) |
//! | Schedule 5-3 | Deemed input-tax credit computation |
//! | Form 1       | National and local tax, payable amounts |
//! | Form 2       | Breakdown of the taxable base by rate |

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Stable identifier of a field on the return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    GrossSales,
    TaxableSalesExclusive,
    ReferencePeriodSales,
    TaxableBase,
    NationalTax,
    BaseNationalTax,
    BadDebtTax,
    DeemedInputTaxCredit,
    SalesReturnTax,
    OtherDeductions,
    TotalDeductions,
    DeductionShortfallRefund,
    NetNationalTax,
    InterimNationalPaid,
    NationalPayable,
    NationalInterimRefund,
    LocalTaxBase,
    LocalTax,
    InterimLocalPaid,
    LocalPayable,
    LocalInterimRefund,
    TotalPayable,
}

impl FieldId {
    /// Every field, in the order the worksheet inserts them.
    pub const ALL: [FieldId; 22] = [
        Self::GrossSales,
        Self::TaxableSalesExclusive,
        Self::ReferencePeriodSales,
        Self::TaxableBase,
        Self::NationalTax,
        Self::BaseNationalTax,
        Self::BadDebtTax,
        Self::DeemedInputTaxCredit,
        Self::SalesReturnTax,
        Self::OtherDeductions,
        Self::TotalDeductions,
        Self::DeductionShortfallRefund,
        Self::NetNationalTax,
        Self::InterimNationalPaid,
        Self::NationalPayable,
        Self::NationalInterimRefund,
        Self::LocalTaxBase,
        Self::LocalTax,
        Self::InterimLocalPaid,
        Self::LocalPayable,
        Self::LocalInterimRefund,
        Self::TotalPayable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GrossSales => "gross_sales",
            Self::TaxableSalesExclusive => "taxable_sales_exclusive",
            Self::ReferencePeriodSales => "reference_period_sales",
            Self::TaxableBase => "taxable_base",
            Self::NationalTax => "national_tax",
            Self::BaseNationalTax => "base_national_tax",
            Self::BadDebtTax => "bad_debt_tax",
            Self::DeemedInputTaxCredit => "deemed_input_tax_credit",
            Self::SalesReturnTax => "sales_return_tax",
            Self::OtherDeductions => "other_deductions",
            Self::TotalDeductions => "total_deductions",
            Self::DeductionShortfallRefund => "deduction_shortfall_refund",
            Self::NetNationalTax => "net_national_tax",
            Self::InterimNationalPaid => "interim_national_paid",
            Self::NationalPayable => "national_payable",
            Self::NationalInterimRefund => "national_interim_refund",
            Self::LocalTaxBase => "local_tax_base",
            Self::LocalTax => "local_tax",
            Self::InterimLocalPaid => "interim_local_paid",
            Self::LocalPayable => "local_payable",
            Self::LocalInterimRefund => "local_interim_refund",
            Self::TotalPayable => "total_payable",
        }
    }

    /// Human-readable description used when rendering the forms.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GrossSales => "Gross revenue (tax inclusive)",
            Self::TaxableSalesExclusive => "Taxable sales this period (tax exclusive)",
            Self::ReferencePeriodSales => "Taxable sales in reference period (tax exclusive)",
            Self::TaxableBase => "Taxable base",
            Self::NationalTax => "Consumption tax (national rate)",
            Self::BaseNationalTax => "Consumption tax basis for deemed credit",
            Self::BadDebtTax => "Tax on bad debts recovered",
            Self::DeemedInputTaxCredit => "Deemed input tax credit",
            Self::SalesReturnTax => "Tax on sales returns",
            Self::OtherDeductions => "Other deductible tax",
            Self::TotalDeductions => "Total deductible tax",
            Self::DeductionShortfallRefund => "Refund for insufficient deductions",
            Self::NetNationalTax => "Net consumption tax",
            Self::InterimNationalPaid => "Interim consumption tax paid",
            Self::NationalPayable => "Consumption tax payable",
            Self::NationalInterimRefund => "Interim consumption tax refund",
            Self::LocalTaxBase => "Consumption tax basis for local tax",
            Self::LocalTax => "Local consumption tax",
            Self::InterimLocalPaid => "Interim local consumption tax paid",
            Self::LocalPayable => "Local consumption tax payable",
            Self::LocalInterimRefund => "Interim local consumption tax refund",
            Self::TotalPayable => "Total tax payable",
        }
    }
}

/// One field of the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub id: FieldId,
    pub value: BigDecimal,
    /// Value before the final truncation, for lines that are audited.
    pub unrounded: Option<BigDecimal>,
}

impl FieldEntry {
    /// The pre-truncation value, only when it differs from the entered value.
    pub fn pre_truncation(&self) -> Option<&BigDecimal> {
        self.unrounded
            .as_ref()
            .filter(|unrounded| **unrounded != self.value)
    }
}

/// Insertion-ordered mapping from [`FieldId`] to its value.
///
/// # Example
///
/// ```
/// use bigdecimal::BigDecimal;
/// use ctax_core::calculations::{FieldId, FieldMapping};
///
/// let yen = |value: i64| BigDecimal::from(value);
///
/// let mut mapping = FieldMapping::new();
/// mapping.insert(FieldId::NetNationalTax, yen(429000), Some(yen(429039)));
/// mapping.insert(FieldId::TaxableBase, yen(11001000), None);
///
/// assert_eq!(mapping.value(FieldId::NetNationalTax), Some(&yen(429000)));
/// assert_eq!(mapping.iter().next().map(|entry| entry.id), Some(FieldId::NetNationalTax));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    entries: Vec<FieldEntry>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field. Re-inserting an existing field keeps its original position.
    pub fn insert(
        &mut self,
        id: FieldId,
        value: BigDecimal,
        unrounded: Option<BigDecimal>,
    ) {
        let entry = FieldEntry {
            id,
            value,
            unrounded,
        };
        match self.entries.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(
        &self,
        id: FieldId,
    ) -> Option<&FieldEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn value(
        &self,
        id: FieldId,
    ) -> Option<&BigDecimal> {
        self.get(id).map(|entry| &entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines of `form` in form order, paired with their field.
    ///
    /// Lines whose field is missing from the mapping are skipped.
    pub fn form_lines(
        &self,
        form: Form,
    ) -> impl Iterator<Item = (&'static FormLine, &FieldEntry)> {
        form.layout()
            .iter()
            .filter_map(|line| self.get(line.field).map(|entry| (line, entry)))
    }
}

/// The forms making up the return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Form {
    Schedule43,
    Schedule53,
    Form1,
    Form2,
}

/// A numbered line on a form and the field entered there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLine {
    pub line: &'static str,
    pub field: FieldId,
}

const fn line(
    line: &'static str,
    field: FieldId,
) -> FormLine {
    FormLine { line, field }
}

const SCHEDULE_4_3: &[FormLine] = &[
    line("1", FieldId::TaxableBase),
    line("1-1", FieldId::TaxableSalesExclusive),
    line("2", FieldId::NationalTax),
    line("4", FieldId::DeemedInputTaxCredit),
    line("7", FieldId::TotalDeductions),
    line("9", FieldId::NetNationalTax),
    line("11", FieldId::LocalTaxBase),
    line("13", FieldId::LocalTax),
];

const SCHEDULE_5_3: &[FormLine] = &[
    line("1", FieldId::NationalTax),
    line("4", FieldId::BaseNationalTax),
    line("5", FieldId::DeemedInputTaxCredit),
];

const FORM_1: &[FormLine] = &[
    line("1", FieldId::TaxableBase),
    line("2", FieldId::NationalTax),
    line("3", FieldId::BadDebtTax),
    line("4", FieldId::DeemedInputTaxCredit),
    line("5", FieldId::SalesReturnTax),
    line("6", FieldId::OtherDeductions),
    line("7", FieldId::TotalDeductions),
    line("8", FieldId::DeductionShortfallRefund),
    line("9", FieldId::NetNationalTax),
    line("10", FieldId::InterimNationalPaid),
    line("11", FieldId::NationalPayable),
    line("12", FieldId::NationalInterimRefund),
    line("15", FieldId::TaxableSalesExclusive),
    line("16", FieldId::ReferencePeriodSales),
    line("18", FieldId::LocalTaxBase),
    line("20", FieldId::LocalTax),
    line("21", FieldId::InterimLocalPaid),
    line("22", FieldId::LocalPayable),
    line("23", FieldId::LocalInterimRefund),
    line("26", FieldId::TotalPayable),
];

const FORM_2: &[FormLine] = &[
    line("1", FieldId::TaxableBase),
    line("6", FieldId::TaxableSalesExclusive),
    line("7", FieldId::TaxableSalesExclusive),
    line("11", FieldId::NationalTax),
    line("16", FieldId::NationalTax),
    line("20", FieldId::LocalTaxBase),
    line("23", FieldId::LocalTaxBase),
];

impl Form {
    /// Forms in the order they are filled in.
    pub const ALL: [Form; 4] = [Self::Schedule43, Self::Schedule53, Self::Form1, Self::Form2];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Schedule43 => "Schedule 4-3: Tax amounts by rate (simplified scheme)",
            Self::Schedule53 => "Schedule 5-3: Deemed input tax credit",
            Self::Form1 => "Form 1: Consumption tax and local consumption tax",
            Self::Form2 => "Form 2: Taxable base by rate",
        }
    }

    pub fn layout(&self) -> &'static [FormLine] {
        match self {
            Self::Schedule43 => SCHEDULE_4_3,
            Self::Schedule53 => SCHEDULE_5_3,
            Self::Form1 => FORM_1,
            Self::Form2 => FORM_2,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn yen(value: i64) -> BigDecimal {
        BigDecimal::from(value)
    }

    // =========================================================================
    // FieldId tests
    // =========================================================================

    #[test]
    fn field_names_are_unique() {
        let mut names: Vec<&str> = FieldId::ALL.iter().map(FieldId::as_str).collect();
        names.sort();
        names.dedup();

        assert_eq!(names.len(), FieldId::ALL.len());
    }

    #[test]
    fn every_field_except_gross_sales_appears_on_a_form() {
        for id in FieldId::ALL {
            let on_form = Form::ALL
                .iter()
                .any(|form| form.layout().iter().any(|line| line.field == id));

            assert_eq!(on_form, id != FieldId::GrossSales, "{}", id.as_str());
        }
    }

    // =========================================================================
    // FieldMapping tests
    // =========================================================================

    #[test]
    fn insert_preserves_insertion_order() {
        let mut mapping = FieldMapping::new();
        mapping.insert(FieldId::TotalPayable, yen(1), None);
        mapping.insert(FieldId::GrossSales, yen(2), None);

        let ids: Vec<FieldId> = mapping.iter().map(|entry| entry.id).collect();

        assert_eq!(ids, vec![FieldId::TotalPayable, FieldId::GrossSales]);
    }

    #[test]
    fn insert_replaces_existing_field_in_place() {
        let mut mapping = FieldMapping::new();
        mapping.insert(FieldId::TaxableBase, yen(1000), None);
        mapping.insert(FieldId::NationalTax, yen(78), None);
        mapping.insert(FieldId::TaxableBase, yen(2000), None);

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.value(FieldId::TaxableBase), Some(&yen(2000)));
        assert_eq!(mapping.iter().next().map(|e| e.id), Some(FieldId::TaxableBase));
    }

    #[test]
    fn value_returns_none_for_missing_field() {
        let mapping = FieldMapping::new();

        assert!(mapping.is_empty());
        assert_eq!(mapping.value(FieldId::LocalTax), None);
    }

    #[test]
    fn pre_truncation_only_when_different() {
        let differs = FieldEntry {
            id: FieldId::LocalTax,
            value: yen(120900),
            unrounded: Some(yen(120999)),
        };
        let same = FieldEntry {
            id: FieldId::LocalTax,
            value: yen(11000),
            unrounded: Some(yen(11000)),
        };

        assert_eq!(differs.pre_truncation(), Some(&yen(120999)));
        assert_eq!(same.pre_truncation(), None);
    }

    #[test]
    fn form_lines_follow_layout_order() {
        let mut mapping = FieldMapping::new();
        mapping.insert(FieldId::DeemedInputTaxCredit, yen(39000), None);
        mapping.insert(FieldId::BaseNationalTax, yen(78000), None);
        mapping.insert(FieldId::NationalTax, yen(78000), None);

        let lines: Vec<&str> = mapping
            .form_lines(Form::Schedule53)
            .map(|(line, _)| line.line)
            .collect();

        assert_eq!(lines, vec!["1", "4", "5"]);
    }

    #[test]
    fn form_lines_skip_missing_fields() {
        let mut mapping = FieldMapping::new();
        mapping.insert(FieldId::TaxableBase, yen(1000), None);

        let count = mapping.form_lines(Form::Form2).count();

        assert_eq!(count, 1);
    }
}
