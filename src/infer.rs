use std::collections::HashSet;

use regex::Regex;

use crate::error::ExtractError;
use crate::model::CellValue;
use crate::options::ExtractOptions;

pub(crate) const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_VALUES: &[&str] = &["True", "TRUE", "true"];
const FALSE_VALUES: &[&str] = &["False", "FALSE", "false"];

/// Decimal exponents outside `-4..16` are written in scientific notation.
const SCIENTIFIC_BELOW: i32 = -4;
const SCIENTIFIC_FROM: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Converts the cell strings of one column into typed values.
#[derive(Debug, Clone)]
pub(crate) struct ColumnTyper {
    na_values: HashSet<String>,
    thousands: Option<char>,
    decimal: char,
    number_shape: Regex,
}

impl ColumnTyper {
    pub(crate) fn new(options: &ExtractOptions) -> Result<Self, ExtractError> {
        let mut na_values: HashSet<String> = options.na_values.iter().cloned().collect();
        if options.keep_default_na {
            na_values.extend(DEFAULT_NA_VALUES.iter().map(|value| (*value).to_string()));
        }

        let thousands = options
            .thousands
            .map(|sep| regex::escape(&sep.to_string()))
            .unwrap_or_default();
        let decimal = regex::escape(&options.decimal.to_string());
        let groups = if thousands.is_empty() {
            String::new()
        } else {
            format!("({thousands}[0-9]{{3}})*")
        };
        let number_shape = Regex::new(&format!(
            r"^[\-+]?[0-9]*{groups}({decimal}[0-9]*)?([0-9]?[Ee]\-?[0-9]+)?$"
        ))?;

        Ok(Self {
            na_values,
            thousands: options.thousands,
            decimal: options.decimal,
            number_shape,
        })
    }

    fn is_missing(&self, value: &str) -> bool {
        self.na_values.contains(value)
    }

    /// Drop thousands separators and turn the decimal mark into `.`, but only in
    /// values shaped like a number with correctly grouped thousands.
    fn normalize_separators(&self, value: String) -> String {
        if !self.number_shape.is_match(&value) {
            return value;
        }
        value
            .chars()
            .filter(|ch| Some(*ch) != self.thousands)
            .map(|ch| if ch == self.decimal { '.' } else { ch })
            .collect()
    }

    fn parse_number(value: &str) -> Option<Number> {
        if let Ok(int) = value.parse::<i64>() {
            return Some(Number::Int(int));
        }
        if let Ok(uint) = value.parse::<u64>() {
            return Some(Number::UInt(uint));
        }
        value.parse::<f64>().ok().map(Number::Float)
    }

    fn parse_numeric_column(&self, values: &[String]) -> Option<Vec<Option<Number>>> {
        values
            .iter()
            .map(|value| {
                if self.is_missing(value) {
                    Some(None)
                } else {
                    Self::parse_number(value).map(Some)
                }
            })
            .collect()
    }

    fn parse_bool_column(values: &[String]) -> Option<Vec<CellValue>> {
        values
            .iter()
            .map(|value| {
                if TRUE_VALUES.contains(&value.as_str()) {
                    Some(CellValue::Bool(true))
                } else if FALSE_VALUES.contains(&value.as_str()) {
                    Some(CellValue::Bool(false))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Type one column.
    ///
    /// Separators are normalised in every number-shaped cell first, so they are
    /// gone even when the column ends up as text. Integer only when every value is
    /// an integer and none is missing; any missing value turns a numeric column into
    /// floats, and so does mixing negatives with values above `i64::MAX`. Booleans
    /// need every value present. Everything else stays text.
    pub(crate) fn type_column(&self, values: Vec<String>) -> Vec<CellValue> {
        let values = values
            .into_iter()
            .map(|value| self.normalize_separators(value))
            .collect::<Vec<_>>();

        if let Some(numbers) = self.parse_numeric_column(&values) {
            let integral = numbers
                .iter()
                .all(|number| matches!(number, Some(Number::Int(_) | Number::UInt(_))));
            let has_unsigned = numbers
                .iter()
                .any(|number| matches!(number, Some(Number::UInt(_))));
            let has_negative = numbers
                .iter()
                .any(|number| matches!(number, Some(Number::Int(int)) if *int < 0));
            let all_int = integral && !(has_unsigned && has_negative);

            return numbers
                .into_iter()
                .map(|number| match number {
                    None => CellValue::Missing,
                    Some(Number::Int(int)) if all_int => CellValue::Int(int),
                    Some(Number::UInt(uint)) if all_int => CellValue::UInt(uint),
                    #[allow(clippy::cast_precision_loss)]
                    Some(Number::Int(int)) => CellValue::Float(int as f64),
                    #[allow(clippy::cast_precision_loss)]
                    Some(Number::UInt(uint)) => CellValue::Float(uint as f64),
                    Some(Number::Float(float)) => CellValue::Float(float),
                })
                .collect();
        }

        if !values.iter().any(|value| self.is_missing(value)) {
            if let Some(bools) = Self::parse_bool_column(&values) {
                return bools;
            }
        }

        values
            .into_iter()
            .map(|value| {
                if self.is_missing(&value) {
                    CellValue::Missing
                } else {
                    CellValue::Text(value)
                }
            })
            .collect()
    }
}

/// Render a float the way the CSV output expects it: shortest round-trip digits,
/// `.0` on integral values, `1e+20` / `1.5e-05` style outside the plain range.
/// NaN renders empty, like a missing value.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .map_or((scientific.as_str(), 0), |(mantissa, exponent)| {
            (mantissa, exponent.parse::<i32>().unwrap_or(0))
        });

    if value != 0.0 && !(SCIENTIFIC_BELOW..SCIENTIFIC_FROM).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}
