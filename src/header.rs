use std::collections::HashMap;

use crate::model::{ColumnName, RawRow, RawTable};

fn row_is_all_th(row: &RawRow) -> bool {
    row.iter().all(|cell| cell.is_header)
}

/// Without a `<thead>`, leading body rows made only of `<th>` cells form the header.
pub(crate) fn promote_header_rows(table: &mut RawTable) {
    if !table.head.is_empty() {
        return;
    }

    let leading = table.body.iter().take_while(|row| row_is_all_th(row)).count();
    table.head = table.body.drain(..leading).collect();
}

/// Pick the header levels among the expanded header rows.
///
/// A single header row is always used. With several, rows without any text are dropped.
pub(crate) fn select_header_levels(head: Vec<Vec<String>>) -> Vec<Vec<String>> {
    if head.len() <= 1 {
        return head;
    }
    head.into_iter()
        .filter(|row| row.iter().any(|text| !text.is_empty()))
        .collect()
}

/// Suffix repeated names with `.1`, `.2`, ... in order of appearance.
fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|mut name| {
            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = format!("{name}.{count}");
                count = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), count + 1);
            name
        })
        .collect()
}

pub(crate) fn name_columns(levels: &[Vec<String>], width: usize) -> Vec<ColumnName> {
    match levels {
        [] => (0..width).map(ColumnName::Position).collect(),
        [single] => {
            let names = (0..width)
                .map(|index| match single.get(index) {
                    Some(text) if !text.is_empty() => text.clone(),
                    _ => format!("Unnamed: {index}"),
                })
                .collect();
            dedup_names(names)
                .into_iter()
                .map(|name| ColumnName::Labels(vec![name]))
                .collect()
        }
        _ => (0..width)
            .map(|index| {
                let labels = levels
                    .iter()
                    .enumerate()
                    .map(|(level, row)| match row.get(index) {
                        Some(text) if !text.is_empty() => text.clone(),
                        _ => format!("Unnamed: {index}_level_{level}"),
                    })
                    .collect();
                ColumnName::Labels(labels)
            })
            .collect(),
    }
}
