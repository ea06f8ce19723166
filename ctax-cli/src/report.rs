//! Rendering of the computed return.
//!
//! The presenter only reads the [`FieldMapping`]; it never recomputes a
//! figure. Two formats are supported:
//!
//! - text: the schedules and forms in filling order, one line per form line
//! - CSV: one `field,value,unrounded` row per field

use std::io::{self, Write};

use bigdecimal::BigDecimal;
use ctax_core::FilingYearConfig;
use ctax_core::calculations::{FieldMapping, Form};
use num_bigint::Sign;
use rust_decimal::Decimal;
use serde::Serialize;

const RULE_WIDTH: usize = 72;

/// Conditions the return assumes. Each of them is entered as zero.
const ZERO_ASSUMPTIONS: &[&str] = &[
    "No reduced-rate (8%) sales",
    "No exempt or non-taxable transactions (reimbursements, subsidies, interest)",
    "No sales returns, discounts, bad debts or asset-transfer adjustments",
];

/// Digits of `value` truncated to `places` decimal places, split at the
/// decimal point, with the sign reported separately.
fn digit_parts(
    value: &BigDecimal,
    places: usize,
) -> (bool, String, String) {
    let (scaled, _) = value.with_scale(places as i64).as_bigint_and_exponent();
    let digits = format!("{:0>width$}", scaled.magnitude().to_string(), width = places + 1);
    let (whole, fraction) = digits.split_at(digits.len() - places);
    (scaled.sign() == Sign::Minus, whole.to_string(), fraction.to_string())
}

/// Formats a yen amount with comma thousands separators.
///
/// Fractional amounts keep two decimal places, truncated.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use ctax_cli::report::format_amount;
///
/// let amount = |text: &str| BigDecimal::from_str(text).unwrap();
/// assert_eq!(format_amount(&amount("12101430")), "12,101,430");
/// assert_eq!(format_amount(&amount("-71000")), "-71,000");
/// assert_eq!(format_amount(&amount("909090.90909")), "909,090.90");
/// ```
pub fn format_amount(value: &BigDecimal) -> String {
    let (negative, digits, fraction) = digit_parts(value, 2);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction != "00" {
        grouped.push('.');
        grouped.push_str(&fraction);
    }
    grouped
}

/// Plain amount text for CSV: no separators, no exponent, no trailing
/// fractional zeros.
fn plain_amount(value: &BigDecimal) -> String {
    let places = usize::try_from(value.as_bigint_and_exponent().1).unwrap_or(0);
    let (negative, digits, fraction) = digit_parts(value, places);
    let fraction = fraction.trim_end_matches('0');

    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, digits)
    } else {
        format!("{}{}.{}", sign, digits, fraction)
    }
}

/// Percentage text for a rate, e.g. `0.50` as `50%`.
fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn write_rule<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))
}

fn write_header<W: Write>(
    writer: &mut W,
    config: &FilingYearConfig,
) -> io::Result<()> {
    write_rule(writer)?;
    writeln!(
        writer,
        "{} (Reiwa {}) consumption tax return, simplified scheme",
        config.filing_year,
        config.era_year()
    )?;
    writeln!(
        writer,
        "Business category {}, deemed purchase rate {}",
        config.business_category.as_str(),
        format_rate(config.deemed_purchase_rate)
    )?;
    match config.taxable_period() {
        Some((start, end)) => writeln!(writer, "Taxable period: {} to {}", start, end)?,
        None => writeln!(writer, "Taxable period: calendar year {}", config.filing_year)?,
    }
    writeln!(
        writer,
        "Standard rate {} only, tax-inclusive bookkeeping",
        format_rate(config.standard_rate)
    )?;
    writeln!(
        writer,
        "Truncation: 1,000 yen for the taxable base, 100 yen for net and local tax and payables"
    )?;
    write_rule(writer)?;

    writeln!(writer)?;
    writeln!(writer, "Fixed at zero for this return:")?;
    for assumption in ZERO_ASSUMPTIONS {
        writeln!(writer, "  - {}", assumption)?;
    }
    write_rule(writer)
}

/// Writes the return as text.
///
/// Every line of every form is written, including zero lines. Lines whose
/// value was truncated also show the value before truncation.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn render_text<W: Write>(
    writer: &mut W,
    config: &FilingYearConfig,
    mapping: &FieldMapping,
) -> io::Result<()> {
    write_header(writer, config)?;

    for form in Form::ALL {
        writeln!(writer)?;
        writeln!(writer, "{}", form.title())?;
        for (line, entry) in mapping.form_lines(form) {
            write!(
                writer,
                "  {:<5} {:<52} {:>16} yen",
                line.line,
                line.field.label(),
                format_amount(&entry.value)
            )?;
            if let Some(unrounded) = entry.pre_truncation() {
                write!(writer, "  (before truncation {} yen)", format_amount(unrounded))?;
            }
            writeln!(writer)?;
        }
    }

    writeln!(writer)?;
    write_rule(writer)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    field: &'a str,
    value: String,
    unrounded: Option<String>,
}

/// Writes the mapping as CSV with a `field,value,unrounded` header.
///
/// `unrounded` is empty for fields without a pre-truncation value.
///
/// # Errors
///
/// Returns [`csv::Error`] if a row cannot be written.
pub fn render_csv<W: Write>(
    writer: W,
    mapping: &FieldMapping,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for entry in mapping.iter() {
        csv_writer.serialize(CsvRow {
            field: entry.id.as_str(),
            value: plain_amount(&entry.value),
            unrounded: entry.unrounded.as_ref().map(plain_amount),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
