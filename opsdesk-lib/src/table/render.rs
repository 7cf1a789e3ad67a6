//! HTML and plain-text rendering

use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use super::Cell;
use super::SortDirection;
use super::Table;

impl Table {
    /// Renders the table as a self-contained HTML fragment.
    ///
    /// Sortable headers get `class="sortable"`; every header carries its
    /// index in `data-col`, and a sorted header also carries `data-asc`.
    /// Cell content is written without escaping.
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="table-wrap"><table class="table"><thead><tr>"#);

        for (i, column) in self.columns().iter().enumerate() {
            let class = if column.sortable { "sortable" } else { "" };
            let asc = self
                .direction(i)
                .map(|d| format!(r#" data-asc="{}""#, d.is_ascending()))
                .unwrap_or_default();
            let _ = write!(
                html,
                r#"<th class="{class}" data-col="{i}"{asc}>{}</th>"#,
                column.label
            );
        }

        html.push_str("</tr></thead><tbody>");
        for row in self.rows() {
            html.push_str("<tr>");
            for cell in row {
                let _ = write!(html, "<td>{}</td>", cell.render());
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></div>");
        html
    }

    /// Renders the table as aligned plain text for a terminal.
    ///
    /// The header of the column the rows are ordered by is marked `^` or
    /// `v`; other sortable headers are marked `*`.
    pub fn to_text(&self) -> String {
        let width = self
            .rows()
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.columns().len());

        let sorted = self.sorted_column();
        let header: Vec<String> = (0..width)
            .map(|i| match self.columns().get(i) {
                Some(column) => match sorted {
                    Some((col, SortDirection::Ascending)) if col == i => format!("{} ^", column.label),
                    Some((col, SortDirection::Descending)) if col == i => format!("{} v", column.label),
                    _ if column.sortable => format!("{} *", column.label),
                    _ => column.label.clone(),
                },
                None => String::new(),
            })
            .collect();

        let body: Vec<Vec<String>> = self
            .rows()
            .iter()
            .map(|row| (0..width).map(|i| row.get(i).map(Cell::text).unwrap_or_default()).collect())
            .collect();

        let widths: Vec<usize> = (0..width)
            .map(|i| {
                body.iter()
                    .map(|row| row[i].width())
                    .chain(std::iter::once(header[i].width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &body {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Escapes text for safe embedding in HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Reduces markup to the text a reader would see.
///
/// Tags are dropped, common entities decoded and whitespace runs collapsed.
pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
