use crate::header::{name_columns, promote_header_rows, select_header_levels};
use crate::infer::ColumnTyper;
use crate::model::{CellValue, RawTable, Table};
use crate::table_parse::{expand_spans, normalize_rows};
use crate::warning::{ExtractWarning, WarningCode};

fn type_rows(rows: Vec<Vec<String>>, width: usize, typer: &ColumnTyper) -> Vec<Vec<CellValue>> {
    let height = rows.len();
    let mut columns: Vec<Vec<String>> = (0..width).map(|_| Vec::with_capacity(height)).collect();
    for row in rows {
        for (column, value) in columns.iter_mut().zip(row) {
            column.push(value);
        }
    }

    let mut typed: Vec<std::vec::IntoIter<CellValue>> = columns
        .into_iter()
        .map(|column| typer.type_column(column).into_iter())
        .collect();

    (0..height)
        .map(|_| {
            typed
                .iter_mut()
                .map(|column| column.next().unwrap_or(CellValue::Missing))
                .collect()
        })
        .collect()
}

/// Turn the raw sections of one `<table>` into a typed [`Table`].
///
/// Returns `None` when the table has no cells at all.
pub(crate) fn build_table(
    mut raw: RawTable,
    typer: &ColumnTyper,
    warnings: &mut Vec<ExtractWarning>,
) -> Option<Table> {
    let source_index = raw.source_index;
    promote_header_rows(&mut raw);

    let mut head = expand_spans(&raw.head);
    let mut body = expand_spans(&raw.body);
    body.extend(expand_spans(&raw.foot));

    let width = head.iter().chain(&body).map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        warnings.push(
            ExtractWarning::new(WarningCode::EmptyTableSkipped, "table has no cells; skipped")
                .with_source_table(source_index),
        );
        return None;
    }

    let padded_head = normalize_rows(&mut head, width);
    let padded_body = normalize_rows(&mut body, width);
    if padded_head || padded_body {
        warnings.push(
            ExtractWarning::new(
                WarningCode::RaggedRowsPadded,
                format!("rows shorter than {width} columns were padded with empty cells"),
            )
            .with_source_table(source_index),
        );
    }

    if width == 1 {
        body.retain(|row| row.first().is_some_and(|text| !text.trim().is_empty()));
    }

    let levels = select_header_levels(head);
    if levels.is_empty() && body.is_empty() {
        warnings.push(
            ExtractWarning::new(
                WarningCode::EmptyTableSkipped,
                "table has neither header nor data rows; skipped",
            )
            .with_source_table(source_index),
        );
        return None;
    }

    let columns = name_columns(&levels, width);
    let rows = type_rows(body, width, typer);

    Some(Table {
        source_index,
        columns,
        rows,
    })
}
