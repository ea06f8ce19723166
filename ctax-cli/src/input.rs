//! Collection of the four period amounts.
//!
//! Amounts come either from command-line arguments or, when an argument is
//! omitted, from an interactive prompt. Prompts retry until a valid amount
//! is entered, so the engine only ever receives validated [`PeriodInputs`].

use std::io::{BufRead, Write};
use std::sync::LazyLock;

use bigdecimal::BigDecimal;
use ctax_core::{InvalidInput, PeriodInputs};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Whole yen as ASCII digits, once separators are removed.
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("amount pattern is a valid regex"));

/// Error returned when text cannot be used as an amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("'{0}' is negative; enter 0 or more")]
    Negative(String),

    #[error("'{0}' is not a whole number of yen (e.g. 12101430 or 12,101,430)")]
    Malformed(String),

    #[error(transparent)]
    Invalid(#[from] InvalidInput),
}

/// Errors that end input collection.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid {field}: {source}")]
    Amount {
        field: &'static str,
        #[source]
        source: AmountError,
    },

    #[error("{0} is required")]
    Required(&'static str),

    #[error("input ended before {0} was entered")]
    EndOfInput(&'static str),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Inputs(#[from] InvalidInput),
}

/// One of the amounts to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRequest {
    pub field: &'static str,
    pub prompt: &'static str,
    pub default: Option<u32>,
}

pub const GROSS_SALES: AmountRequest = AmountRequest {
    field: "gross_sales",
    prompt: "Gross business revenue for the period, tax inclusive",
    default: None,
};

pub const REFERENCE_PERIOD_SALES: AmountRequest = AmountRequest {
    field: "reference_period_sales",
    prompt: "Taxable sales in the reference period (two years prior), tax exclusive",
    default: None,
};

pub const INTERIM_NATIONAL_PAID: AmountRequest = AmountRequest {
    field: "interim_national_paid",
    prompt: "Interim consumption tax paid, if any",
    default: Some(0),
};

pub const INTERIM_LOCAL_PAID: AmountRequest = AmountRequest {
    field: "interim_local_paid",
    prompt: "Interim local consumption tax paid, if any",
    default: Some(0),
};

/// Amounts as given on the command line, if at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAmounts {
    pub gross_sales: Option<String>,
    pub reference_period_sales: Option<String>,
    pub interim_national_paid: Option<String>,
    pub interim_local_paid: Option<String>,
}

/// Folds full-width digits, comma and minus sign to their ASCII forms.
fn to_ascii_amount(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '０'..='９' => char::from_u32(u32::from(ch) - u32::from('０') + u32::from('0'))
                .unwrap_or(ch),
            '，' => ',',
            '－' | '−' => '-',
            other => other,
        })
        .collect()
}

/// Parses an amount typed by the user.
///
/// Surrounding whitespace is ignored, full-width digits are accepted and
/// every comma is stripped. Blank text yields `Ok(None)` so the caller can
/// substitute a default. Amounts have no upper bound.
///
/// # Example
///
/// ```
/// use bigdecimal::BigDecimal;
/// use ctax_cli::input::{AmountError, parse_amount};
///
/// let yen = BigDecimal::from(12101430);
/// assert_eq!(parse_amount("gross_sales", "12,101,430"), Ok(Some(yen.clone())));
/// assert_eq!(parse_amount("gross_sales", "１２１０１４３０"), Ok(Some(yen)));
/// assert_eq!(parse_amount("gross_sales", "  "), Ok(None));
/// assert_eq!(
///     parse_amount("gross_sales", "-5"),
///     Err(AmountError::Negative("-5".to_string()))
/// );
/// ```
pub fn parse_amount(
    field: &'static str,
    text: &str,
) -> Result<Option<BigDecimal>, AmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let ascii = to_ascii_amount(trimmed);
    if ascii.starts_with('-') {
        return Err(AmountError::Negative(trimmed.to_string()));
    }

    let digits = ascii.replace(',', "");
    if !AMOUNT_PATTERN.is_match(&digits) {
        return Err(AmountError::Malformed(trimmed.to_string()));
    }
    let value: BigDecimal = digits
        .parse()
        .map_err(|_| AmountError::Malformed(trimmed.to_string()))?;

    Ok(Some(PeriodInputs::validate_amount(field, value)?))
}

/// Prompts until a valid amount is entered.
///
/// Blank input takes the request's default, or prompts again when there is
/// none. Invalid input is reported on `writer` and prompted for again.
///
/// # Errors
///
/// Returns [`InputError::EndOfInput`] if `reader` is exhausted and
/// [`InputError::Io`] on read or write failures.
pub fn prompt_amount<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    request: &AmountRequest,
) -> Result<BigDecimal, InputError> {
    loop {
        match request.default {
            Some(default) => write!(writer, "{} [{}]: ", request.prompt, default)?,
            None => write!(writer, "{}: ", request.prompt)?,
        }
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(InputError::EndOfInput(request.field));
        }

        match parse_amount(request.field, &line) {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => match request.default {
                Some(default) => return Ok(BigDecimal::from(default)),
                None => writeln!(writer, "  -> a value is required")?,
            },
            Err(err) => {
                debug!(field = request.field, input = %line.trim(), "rejected amount: {}", err);
                writeln!(writer, "  -> {}", err)?;
            }
        }
    }
}

/// Resolves one amount from its argument, prompting when it was omitted.
fn resolve_amount<R: BufRead, W: Write>(
    provided: Option<&str>,
    request: &AmountRequest,
    reader: &mut R,
    writer: &mut W,
) -> Result<BigDecimal, InputError> {
    let Some(text) = provided else {
        return prompt_amount(reader, writer, request);
    };

    match parse_amount(request.field, text) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => request
            .default
            .map(BigDecimal::from)
            .ok_or(InputError::Required(request.field)),
        Err(source) => Err(InputError::Amount {
            field: request.field,
            source,
        }),
    }
}

/// Collects all four amounts and builds the validated [`PeriodInputs`].
///
/// Amounts given as arguments are parsed once and fail fast; the rest are
/// prompted for in form order.
pub fn collect_inputs<R: BufRead, W: Write>(
    raw: &RawAmounts,
    reader: &mut R,
    writer: &mut W,
) -> Result<PeriodInputs, InputError> {
    let gross_sales = resolve_amount(raw.gross_sales.as_deref(), &GROSS_SALES, reader, writer)?;
    let reference_period_sales = resolve_amount(
        raw.reference_period_sales.as_deref(),
        &REFERENCE_PERIOD_SALES,
        reader,
        writer,
    )?;
    let interim_national_paid = resolve_amount(
        raw.interim_national_paid.as_deref(),
        &INTERIM_NATIONAL_PAID,
        reader,
        writer,
    )?;
    let interim_local_paid = resolve_amount(
        raw.interim_local_paid.as_deref(),
        &INTERIM_LOCAL_PAID,
        reader,
        writer,
    )?;

    Ok(PeriodInputs::new(
        gross_sales,
        reference_period_sales,
        interim_national_paid,
        interim_local_paid,
    )?)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn yen(value: i64) -> BigDecimal {
        BigDecimal::from(value)
    }

    fn prompt_with(
        input: &str,
        request: &AmountRequest,
    ) -> (Result<BigDecimal, InputError>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut writer = Vec::new();
        let result = prompt_amount(&mut reader, &mut writer, request);
        (result, String::from_utf8(writer).unwrap())
    }

    // =========================================================================
    // parse_amount tests
    // =========================================================================

    #[test]
    fn parse_amount_accepts_plain_digits() {
        assert_eq!(parse_amount("gross_sales", "12101430"), Ok(Some(yen(12101430))));
    }

    #[test]
    fn parse_amount_strips_thousands_separators() {
        assert_eq!(parse_amount("gross_sales", "12,101,430"), Ok(Some(yen(12101430))));
        assert_eq!(parse_amount("gross_sales", "1,000"), Ok(Some(yen(1000))));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("gross_sales", "  500\n"), Ok(Some(yen(500))));
    }

    #[test]
    fn parse_amount_blank_is_none() {
        assert_eq!(parse_amount("gross_sales", ""), Ok(None));
        assert_eq!(parse_amount("gross_sales", " \t\n"), Ok(None));
    }

    #[test]
    fn parse_amount_rejects_negative() {
        assert_eq!(
            parse_amount("gross_sales", "-5"),
            Err(AmountError::Negative("-5".to_string()))
        );
    }

    #[test]
    fn parse_amount_rejects_non_numeric() {
        assert_eq!(
            parse_amount("gross_sales", "abc"),
            Err(AmountError::Malformed("abc".to_string()))
        );
    }

    #[test]
    fn parse_amount_rejects_decimal_point() {
        assert_eq!(
            parse_amount("gross_sales", "1.5"),
            Err(AmountError::Malformed("1.5".to_string()))
        );
    }

    #[test]
    fn parse_amount_strips_commas_anywhere() {
        assert_eq!(parse_amount("gross_sales", "12,10,1430"), Ok(Some(yen(12101430))));
        assert_eq!(parse_amount("gross_sales", ",100"), Ok(Some(yen(100))));
    }

    #[test]
    fn parse_amount_rejects_commas_alone() {
        assert_eq!(
            parse_amount("gross_sales", ",,"),
            Err(AmountError::Malformed(",,".to_string()))
        );
    }

    #[test]
    fn parse_amount_accepts_full_width_digits() {
        assert_eq!(
            parse_amount("gross_sales", "１２１０１４３０"),
            Ok(Some(yen(12101430)))
        );
        assert_eq!(
            parse_amount("gross_sales", "１２，１０１，４３０"),
            Ok(Some(yen(12101430)))
        );
    }

    #[test]
    fn parse_amount_rejects_full_width_minus() {
        assert_eq!(
            parse_amount("gross_sales", "－５"),
            Err(AmountError::Negative("－５".to_string()))
        );
    }

    #[test]
    fn parse_amount_rejects_other_unicode_digits() {
        assert_eq!(
            parse_amount("gross_sales", "١٢٣"),
            Err(AmountError::Malformed("١٢٣".to_string()))
        );
    }

    #[test]
    fn parse_amount_accepts_amounts_of_any_size() {
        let text = "9".repeat(40);

        let result = parse_amount("gross_sales", &text);

        assert_eq!(result, Ok(Some(BigDecimal::from_str(&text).unwrap())));
    }

    // =========================================================================
    // prompt_amount tests
    // =========================================================================

    #[test]
    fn prompt_amount_returns_first_valid_line() {
        let (result, output) = prompt_with("12,101,430\n", &GROSS_SALES);

        assert_eq!(result.unwrap(), yen(12101430));
        assert!(output.starts_with(GROSS_SALES.prompt));
    }

    #[test]
    fn prompt_amount_retries_after_invalid_lines() {
        let (result, output) = prompt_with("abc\n-5\n1.5\n700\n", &GROSS_SALES);

        assert_eq!(result.unwrap(), yen(700));
        assert_eq!(output.matches("  -> ").count(), 3);
        assert!(output.contains("negative"));
    }

    #[test]
    fn prompt_amount_uses_default_on_blank() {
        let (result, output) = prompt_with("\n", &INTERIM_NATIONAL_PAID);

        assert_eq!(result.unwrap(), yen(0));
        assert!(output.contains("[0]"));
    }

    #[test]
    fn prompt_amount_requires_value_without_default() {
        let (result, output) = prompt_with("\n\n42\n", &REFERENCE_PERIOD_SALES);

        assert_eq!(result.unwrap(), yen(42));
        assert_eq!(output.matches("a value is required").count(), 2);
    }

    #[test]
    fn prompt_amount_fails_at_end_of_input() {
        let (result, _) = prompt_with("abc\n", &GROSS_SALES);

        assert!(matches!(result, Err(InputError::EndOfInput("gross_sales"))));
    }

    // =========================================================================
    // collect_inputs tests
    // =========================================================================

    #[test]
    fn collect_inputs_uses_arguments_without_prompting() {
        let raw = RawAmounts {
            gross_sales: Some("12,101,430".to_string()),
            reference_period_sales: Some("9800000".to_string()),
            interim_national_paid: Some("100000".to_string()),
            interim_local_paid: Some("".to_string()),
        };
        let mut reader = Cursor::new(Vec::new());
        let mut writer = Vec::new();

        let inputs = collect_inputs(&raw, &mut reader, &mut writer).unwrap();

        assert_eq!(inputs.gross_sales(), &yen(12101430));
        assert_eq!(inputs.reference_period_sales(), &yen(9800000));
        assert_eq!(inputs.interim_national_paid(), &yen(100000));
        assert_eq!(inputs.interim_local_paid(), &yen(0));
        assert!(writer.is_empty());
    }

    #[test]
    fn collect_inputs_prompts_for_missing_amounts() {
        let raw = RawAmounts {
            gross_sales: Some("1000000".to_string()),
            ..RawAmounts::default()
        };
        let mut reader = Cursor::new(b"500000\n\n\n".to_vec());
        let mut writer = Vec::new();

        let inputs = collect_inputs(&raw, &mut reader, &mut writer).unwrap();

        assert_eq!(inputs.gross_sales(), &yen(1000000));
        assert_eq!(inputs.reference_period_sales(), &yen(500000));
        assert_eq!(inputs.interim_national_paid(), &yen(0));
        assert_eq!(inputs.interim_local_paid(), &yen(0));
    }

    #[test]
    fn collect_inputs_rejects_invalid_argument() {
        let raw = RawAmounts {
            gross_sales: Some("-1".to_string()),
            ..RawAmounts::default()
        };
        let mut reader = Cursor::new(Vec::new());
        let mut writer = Vec::new();

        let result = collect_inputs(&raw, &mut reader, &mut writer);

        assert!(matches!(
            result,
            Err(InputError::Amount {
                field: "gross_sales",
                source: AmountError::Negative(_),
            })
        ));
    }

    #[test]
    fn collect_inputs_rejects_blank_required_argument() {
        let raw = RawAmounts {
            gross_sales: Some(" ".to_string()),
            ..RawAmounts::default()
        };
        let mut reader = Cursor::new(Vec::new());
        let mut writer = Vec::new();

        let result = collect_inputs(&raw, &mut reader, &mut writer);

        assert!(matches!(result, Err(InputError::Required("gross_sales"))));
    }
}
