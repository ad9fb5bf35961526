use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::RawRow;

pub(crate) const MAX_COLSPAN: usize = 1000;
pub(crate) const MAX_ROWSPAN: usize = 65534;

static CELL_WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\r\n]+|\s{2,}").expect("hardcoded cell whitespace regex is valid")
});

/// Trim cell text, then replace each run of line breaks and each run of two or
/// more whitespace characters with a single space. The line-break branch wins
/// where both could match, so `"a\n  b"` keeps two spaces.
pub(crate) fn normalize_cell_text(raw: &str) -> String {
    CELL_WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Parse a `colspan`/`rowspan` attribute. Absent, malformed and zero values mean 1.
pub(crate) fn parse_span(value: Option<&str>, max: usize) -> usize {
    value
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .map_or(1, |span| span.min(max))
}

#[derive(Debug)]
struct Carry {
    column: usize,
    text: String,
    rows_left: usize,
}

fn carry_forward(texts: &mut Vec<String>, next: &mut VecDeque<Carry>, carry: Carry) {
    if carry.rows_left > 1 {
        texts.push(carry.text.clone());
        next.push_back(Carry {
            rows_left: carry.rows_left - 1,
            ..carry
        });
    } else {
        texts.push(carry.text);
    }
}

/// Expand `colspan` and `rowspan` of one table section into plain rows of text.
///
/// A cell spanning several columns is repeated in each of them. A cell spanning
/// several rows is inserted again at its column in the following rows; if the
/// section ends first, extra rows are emitted to hold the remaining copies.
pub(crate) fn expand_spans(rows: &[RawRow]) -> Vec<Vec<String>> {
    let mut expanded = Vec::with_capacity(rows.len());
    let mut remainder: VecDeque<Carry> = VecDeque::new();

    for row in rows {
        let mut texts = Vec::with_capacity(row.len());
        let mut next = VecDeque::new();
        let mut index = 0_usize;

        for cell in row {
            while remainder.front().is_some_and(|carry| carry.column <= index) {
                if let Some(carry) = remainder.pop_front() {
                    carry_forward(&mut texts, &mut next, carry);
                    index += 1;
                }
            }

            for _ in 0..cell.colspan {
                texts.push(cell.text.clone());
                if cell.rowspan > 1 {
                    next.push_back(Carry {
                        column: index,
                        text: cell.text.clone(),
                        rows_left: cell.rowspan - 1,
                    });
                }
                index += 1;
            }
        }

        for carry in remainder.drain(..) {
            carry_forward(&mut texts, &mut next, carry);
        }

        expanded.push(texts);
        remainder = next;
    }

    while !remainder.is_empty() {
        let mut texts = Vec::with_capacity(remainder.len());
        let mut next = VecDeque::new();
        for carry in remainder.drain(..) {
            carry_forward(&mut texts, &mut next, carry);
        }
        expanded.push(texts);
        remainder = next;
    }

    expanded
}

/// Pad every row on the right with empty cells up to `width`.
/// Returns whether any row had to be padded.
pub(crate) fn normalize_rows(rows: &mut [Vec<String>], width: usize) -> bool {
    let mut padded = false;
    for row in rows.iter_mut() {
        if row.len() < width {
            row.resize(width, String::new());
            padded = true;
        }
    }
    padded
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{expand_spans, normalize_cell_text, normalize_rows, parse_span};
    use crate::model::RawCell;

    fn cell(text: &str, colspan: usize, rowspan: usize) -> RawCell {
        RawCell {
            text: text.to_string(),
            is_header: false,
            colspan,
            rowspan,
        }
    }

    #[test]
    fn folds_line_breaks_and_whitespace_runs() {
        assert_eq!(normalize_cell_text("  New York  "), "New York");
        assert_eq!(normalize_cell_text("New\n  York"), "New  York");
        assert_eq!(normalize_cell_text("a\r\nb"), "a b");
        assert_eq!(normalize_cell_text("a \n b"), "a b");
        assert_eq!(normalize_cell_text("a\tb"), "a\tb");
        assert_eq!(normalize_cell_text("a \u{a0} b"), "a b");
    }

    #[test]
    fn parses_span_attributes() {
        assert_eq!(parse_span(None, 1000), 1);
        assert_eq!(parse_span(Some(" 3 "), 1000), 3);
        assert_eq!(parse_span(Some("0"), 1000), 1);
        assert_eq!(parse_span(Some("wide"), 1000), 1);
        assert_eq!(parse_span(Some("5000"), 1000), 1000);
    }

    #[test]
    fn expands_colspan() {
        let rows = vec![vec![cell("a", 2, 1), cell("b", 1, 1)]];
        assert_eq!(expand_spans(&rows), vec![vec!["a", "a", "b"]]);
    }

    #[test]
    fn expands_rowspan_into_following_rows() {
        let rows = vec![
            vec![cell("x", 1, 2), cell("1", 1, 1)],
            vec![cell("2", 1, 1)],
            vec![cell("y", 1, 1), cell("3", 1, 1)],
        ];
        assert_eq!(
            expand_spans(&rows),
            vec![vec!["x", "1"], vec!["x", "2"], vec!["y", "3"]]
        );
    }

    #[test]
    fn rowspan_in_last_column_is_appended() {
        let rows = vec![
            vec![cell("1", 1, 1), cell("z", 1, 2)],
            vec![cell("2", 1, 1)],
        ];
        assert_eq!(expand_spans(&rows), vec![vec!["1", "z"], vec!["2", "z"]]);
    }

    #[test]
    fn rowspan_past_section_end_adds_rows() {
        let rows = vec![vec![cell("a", 1, 3), cell("b", 1, 1)]];
        assert_eq!(
            expand_spans(&rows),
            vec![vec!["a", "b"], vec!["a"], vec!["a"]]
        );
    }

    #[test]
    fn combined_colspan_and_rowspan() {
        let rows = vec![
            vec![cell("h", 2, 2), cell("c", 1, 1)],
            vec![cell("d", 1, 1)],
        ];
        assert_eq!(
            expand_spans(&rows),
            vec![vec!["h", "h", "c"], vec!["h", "h", "d"]]
        );
    }

    #[test]
    fn normalizes_ragged_rows() {
        let mut rows = vec![vec!["a".to_string()], vec!["b".to_string(), "c".to_string()]];
        assert!(normalize_rows(&mut rows, 3));
        assert_eq!(rows[0], vec!["a", "", ""]);
        assert_eq!(rows[1], vec!["b", "c", ""]);
        assert!(!normalize_rows(&mut rows, 3));
    }
}
