use std::path::PathBuf;

use crate::csv_out::write_csv;
use crate::error::ExtractError;
use crate::model::Table;
use crate::options::ExportOptions;

/// Output file name for the table at `index` of the extracted sequence.
#[must_use]
pub fn table_file_name(index: usize) -> String {
    format!("table_{index}.csv")
}

/// Write each table to `table_<i>.csv` in `options.out_dir`, in order.
///
/// Existing files are overwritten. The first failure aborts the export; files
/// already written are left in place.
pub fn export_tables(
    tables: &[Table],
    options: &ExportOptions,
) -> Result<Vec<PathBuf>, ExtractError> {
    options.validate()?;

    let mut written = Vec::with_capacity(tables.len());
    for (index, table) in tables.iter().enumerate() {
        let path = options.out_dir.join(table_file_name(index));
        write_csv(&path, table, options.delimiter)?;
        tracing::debug!(
            path = %path.display(),
            source_table = table.source_index,
            rows = table.height(),
            columns = table.width(),
            "wrote table"
        );
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::{export_tables, table_file_name};
    use crate::error::ExtractError;
    use crate::model::{CellValue, ColumnName, Table};
    use crate::options::ExportOptions;

    fn one_cell(value: i64) -> Table {
        Table {
            source_index: 0,
            columns: vec![ColumnName::Position(0)],
            rows: vec![vec![CellValue::Int(value)]],
        }
    }

    #[test]
    fn names_files_by_position() {
        assert_eq!(table_file_name(0), "table_0.csv");
        assert_eq!(table_file_name(12), "table_12.csv");
    }

    #[test]
    fn writes_one_file_per_table_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let options = ExportOptions {
            out_dir: dir.path().to_path_buf(),
            ..ExportOptions::default()
        };
        std::fs::write(dir.path().join("table_1.csv"), "stale").expect("seed file");

        let written =
            export_tables(&[one_cell(1), one_cell(2)], &options).expect("export should succeed");

        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("table_1.csv")).expect("readable"),
            "0\n2\n"
        );
    }

    #[test]
    fn no_tables_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let options = ExportOptions {
            out_dir: dir.path().to_path_buf(),
            ..ExportOptions::default()
        };
        let written = export_tables(&[], &options).expect("export should succeed");
        assert!(written.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).expect("listable").count(), 0);
    }

    #[test]
    fn missing_output_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let options = ExportOptions {
            out_dir: dir.path().join("nope"),
            ..ExportOptions::default()
        };
        let err = export_tables(&[one_cell(1)], &options).expect_err("export should fail");
        assert!(matches!(err, ExtractError::CreateOutput { .. }));
    }
}
