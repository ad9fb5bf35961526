use std::fmt::{Display, Formatter};

use crate::infer::format_float;

/// One `<td>`/`<th>` as found in the markup, before span expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub text: String,
    pub is_header: bool,
    pub colspan: usize,
    pub rowspan: usize,
}

pub type RawRow = Vec<RawCell>;

/// Rows of one `<table>`, split by section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub source_index: usize,
    pub head: Vec<RawRow>,
    pub body: Vec<RawRow>,
    pub foot: Vec<RawRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnName {
    Position(usize),
    /// One label per header level.
    Labels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_float(*value)),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// A tabular dataset extracted from one `<table>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Position of the source `<table>` among all tables of the document.
    pub source_index: usize,
    pub columns: Vec<ColumnName>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn header_levels(&self) -> usize {
        self.columns
            .iter()
            .map(|column| match column {
                ColumnName::Position(_) => 1,
                ColumnName::Labels(labels) => labels.len(),
            })
            .max()
            .unwrap_or(0)
    }

    /// Header records as written to CSV, one per header level.
    #[must_use]
    pub fn header_records(&self) -> Vec<Vec<String>> {
        (0..self.header_levels())
            .map(|level| {
                self.columns
                    .iter()
                    .map(|column| match column {
                        ColumnName::Position(position) => position.to_string(),
                        ColumnName::Labels(labels) => {
                            labels.get(level).cloned().unwrap_or_default()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    #[must_use]
    pub fn data_records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }
}
