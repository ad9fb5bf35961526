use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExtractError;
use crate::model::Table;

fn write_table<W: Write>(writer: W, table: &Table, delimiter: u8) -> Result<W, ExtractError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in table.header_records() {
        writer.write_record(&record)?;
    }
    for record in table.data_records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|error| ExtractError::Io(error.into_error()))
}

pub fn write_csv(path: &Path, table: &Table, delimiter: u8) -> Result<(), ExtractError> {
    let file = File::create(path).map_err(|source| ExtractError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(file, table, delimiter)?.sync_all()?;
    Ok(())
}

pub fn write_csv_to_string(table: &Table, delimiter: u8) -> Result<String, ExtractError> {
    let bytes = write_table(Vec::<u8>::new(), table, delimiter)?;
    String::from_utf8(bytes)
        .map_err(|error| ExtractError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{write_csv, write_csv_to_string};
    use crate::model::{CellValue, ColumnName, Table};

    fn labels(names: &[&str]) -> Vec<ColumnName> {
        names
            .iter()
            .map(|name| ColumnName::Labels(vec![(*name).to_string()]))
            .collect()
    }

    #[test]
    fn writes_header_then_rows_without_index() {
        let table = Table {
            source_index: 0,
            columns: labels(&["Name", "Age"]),
            rows: vec![vec![CellValue::Text("Alice".to_string()), CellValue::Int(30)]],
        };
        assert_eq!(
            write_csv_to_string(&table, b',').expect("csv should render"),
            "Name,Age\nAlice,30\n"
        );
    }

    #[test]
    fn quotes_only_when_needed() {
        let table = Table {
            source_index: 0,
            columns: labels(&["Quote", "Plain"]),
            rows: vec![vec![
                CellValue::Text("say \"hi\", then leave".to_string()),
                CellValue::Float(2.5),
            ]],
        };
        assert_eq!(
            write_csv_to_string(&table, b',').expect("csv should render"),
            "Quote,Plain\n\"say \"\"hi\"\", then leave\",2.5\n"
        );
    }

    #[test]
    fn lone_missing_value_is_quoted() {
        let table = Table {
            source_index: 0,
            columns: labels(&["City"]),
            rows: vec![vec![CellValue::Missing], vec![CellValue::Text("LA".to_string())]],
        };
        assert_eq!(
            write_csv_to_string(&table, b',').expect("csv should render"),
            "City\n\"\"\nLA\n"
        );
    }

    #[test]
    fn honours_delimiter() {
        let table = Table {
            source_index: 0,
            columns: vec![ColumnName::Position(0), ColumnName::Position(1)],
            rows: vec![vec![CellValue::Bool(true), CellValue::Text("a,b".to_string())]],
        };
        assert_eq!(
            write_csv_to_string(&table, b'\t').expect("csv should render"),
            "0\t1\nTrue\ta,b\n"
        );
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("out.csv");
        let table = Table {
            source_index: 0,
            columns: labels(&["City"]),
            rows: vec![
                vec![CellValue::Text("NYC".to_string())],
                vec![CellValue::Text("LA".to_string())],
            ],
        };
        write_csv(&path, &table, b',').expect("csv should be written");
        assert_eq!(
            std::fs::read_to_string(&path).expect("csv should be readable"),
            "City\nNYC\nLA\n"
        );
    }
}
