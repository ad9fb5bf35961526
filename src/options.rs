use std::path::PathBuf;

use crate::error::ExtractError;

pub const DEFAULT_MATCH_PATTERN: &str = ".+";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Only tables containing a text node that matches this regex are extracted.
    pub match_pattern: String,
    /// Drop `<style>` elements and elements styled `display:none` before reading a table.
    pub displayed_only: bool,
    pub thousands: Option<char>,
    pub decimal: char,
    pub keep_default_na: bool,
    /// Extra strings treated as missing values, on top of the defaults.
    pub na_values: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            match_pattern: DEFAULT_MATCH_PATTERN.to_string(),
            displayed_only: true,
            thousands: Some(','),
            decimal: '.',
            keep_default_na: true,
            na_values: Vec::new(),
        }
    }
}

impl ExtractOptions {
    pub(crate) fn validate(&self) -> Result<(), ExtractError> {
        if self.thousands == Some(self.decimal) {
            return Err(ExtractError::InvalidOption(
                "thousands separator and decimal mark must differ".to_string(),
            ));
        }
        if self.decimal.is_ascii_digit() || self.thousands.is_some_and(|sep| sep.is_ascii_digit()) {
            return Err(ExtractError::InvalidOption(
                "numeric separators cannot be digits".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            delimiter: b',',
        }
    }
}

impl ExportOptions {
    pub(crate) fn validate(&self) -> Result<(), ExtractError> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(ExtractError::InvalidOption(format!(
                "unusable CSV delimiter {:?}",
                char::from(self.delimiter)
            )));
        }
        Ok(())
    }
}
