mod csv_out;
mod error;
mod export;
mod frame;
mod header;
mod html_reader;
mod infer;
mod model;
mod options;
mod table_detect;
mod table_parse;
mod warning;

use std::path::{Path, PathBuf};

use crate::frame::build_table;
use crate::html_reader::{decode_html_bytes, read_html_file};
use crate::infer::ColumnTyper;
use crate::table_detect::detect_tables;
use crate::warning::WarningCode;

pub use csv_out::{write_csv, write_csv_to_string};
pub use error::ExtractError;
pub use export::{export_tables, table_file_name};
pub use infer::format_float;
pub use model::{CellValue, ColumnName, Table};
pub use options::{DEFAULT_MATCH_PATTERN, ExportOptions, ExtractOptions};
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};

/// Tables of one document, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub tables: Vec<Table>,
    pub warnings: Vec<ExtractWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub table_count: usize,
    pub files: Vec<PathBuf>,
    pub warnings: Vec<ExtractWarning>,
}

fn extract_from_text(
    html: &str,
    options: &ExtractOptions,
    mut warnings: Vec<ExtractWarning>,
) -> Result<Extraction, ExtractError> {
    options.validate()?;
    let typer = ColumnTyper::new(options)?;

    let tables = detect_tables(html, options)?
        .into_iter()
        .filter_map(|raw| build_table(raw, &typer, &mut warnings))
        .collect::<Vec<_>>();

    if tables.is_empty() {
        warnings.push(ExtractWarning::new(
            WarningCode::NoTablesDetected,
            "no tables were found in the document",
        ));
    }

    Ok(Extraction { tables, warnings })
}

/// Extract every table from HTML markup.
pub fn read_html_str(html: &str, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    extract_from_text(html, options, Vec::new())
}

/// Extract every table from raw HTML bytes, sniffing the character encoding first.
pub fn read_html_bytes(bytes: &[u8], options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let mut warnings = Vec::new();
    let document = decode_html_bytes(bytes, &mut warnings);
    extract_from_text(&document.text, options, warnings)
}

/// Extract every table from the HTML file at `path`.
pub fn read_html(path: &Path, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let mut warnings = Vec::new();
    let document = read_html_file(path, &mut warnings)?;
    extract_from_text(&document.text, options, warnings)
}

/// Read `input`, then write each of its tables to `table_<i>.csv`.
pub fn html_file_to_csv(
    input: &Path,
    extract_options: &ExtractOptions,
    export_options: &ExportOptions,
) -> Result<ExtractionReport, ExtractError> {
    export_options.validate()?;
    let extraction = read_html(input, extract_options)?;
    let files = export_tables(&extraction.tables, export_options)?;

    Ok(ExtractionReport {
        table_count: extraction.tables.len(),
        files,
        warnings: extraction.warnings,
    })
}
