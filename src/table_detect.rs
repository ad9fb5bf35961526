use regex::Regex;
use scraper::{ElementRef, Html, Node};

use crate::error::ExtractError;
use crate::model::{RawCell, RawRow, RawTable};
use crate::options::ExtractOptions;
use crate::table_parse::{MAX_COLSPAN, MAX_ROWSPAN, normalize_cell_text, parse_span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Head,
    Body,
    Foot,
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    if element.value().name() == "style" {
        return true;
    }
    element
        .value()
        .attr("style")
        .is_some_and(|style| style.replace(' ', "").contains("display:none"))
}

fn visible_children<'a>(
    element: ElementRef<'a>,
    displayed_only: bool,
) -> impl Iterator<Item = ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| !(displayed_only && is_hidden(*child)))
}

fn collect_text(element: ElementRef<'_>, displayed_only: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    if !(displayed_only && is_hidden(child)) {
                        collect_text(child, displayed_only, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn parse_cell(cell: ElementRef<'_>, displayed_only: bool) -> RawCell {
    let mut raw_text = String::new();
    collect_text(cell, displayed_only, &mut raw_text);

    RawCell {
        text: normalize_cell_text(&raw_text),
        is_header: cell.value().name() == "th",
        colspan: parse_span(cell.value().attr("colspan"), MAX_COLSPAN),
        rowspan: parse_span(cell.value().attr("rowspan"), MAX_ROWSPAN),
    }
}

fn parse_row(row: ElementRef<'_>, displayed_only: bool) -> RawRow {
    visible_children(row, displayed_only)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| parse_cell(cell, displayed_only))
        .collect()
}

fn push_row(raw: &mut RawTable, section: Section, row: RawRow) {
    match section {
        Section::Head => raw.head.push(row),
        Section::Body => raw.body.push(row),
        Section::Foot => raw.foot.push(row),
    }
}

/// Read the rows that belong to `table` itself. Rows of nested tables are not
/// included, although their text still shows up inside the enclosing cell.
fn read_table_sections(table: ElementRef<'_>, source_index: usize, displayed_only: bool) -> RawTable {
    let mut raw = RawTable {
        source_index,
        ..RawTable::default()
    };

    for child in visible_children(table, displayed_only) {
        let section = match child.value().name() {
            "thead" => Section::Head,
            "tbody" => Section::Body,
            "tfoot" => Section::Foot,
            "tr" => {
                push_row(&mut raw, Section::Body, parse_row(child, displayed_only));
                continue;
            }
            _ => continue,
        };

        for row in visible_children(child, displayed_only).filter(|row| row.value().name() == "tr") {
            push_row(&mut raw, section, parse_row(row, displayed_only));
        }
    }

    raw
}

/// Find every `<table>` of the document in document order and read its rows.
///
/// Tables without any text node matching `options.match_pattern` are dropped, and
/// so are tables styled `display:none` when `options.displayed_only` is set.
pub(crate) fn detect_tables(
    html: &str,
    options: &ExtractOptions,
) -> Result<Vec<RawTable>, ExtractError> {
    let pattern = Regex::new(&options.match_pattern)?;
    let document = Html::parse_document(html);

    let mut tables = Vec::new();
    let all_tables = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "table");

    for (source_index, table) in all_tables.enumerate() {
        if options.displayed_only && is_hidden(table) {
            tracing::debug!(source_index, "table is not displayed; skipped");
            continue;
        }
        if !table.text().any(|text| pattern.is_match(text)) {
            tracing::debug!(source_index, "table has no text matching the pattern; skipped");
            continue;
        }

        let raw = read_table_sections(table, source_index, options.displayed_only);
        tracing::debug!(
            source_index,
            head_rows = raw.head.len(),
            body_rows = raw.body.len(),
            foot_rows = raw.foot.len(),
            "found table"
        );
        tables.push(raw);
    }

    Ok(tables)
}
