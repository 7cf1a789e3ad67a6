//! Generic data table
//!
//! A [`Table`] holds column descriptors and an explicit in-memory row
//! sequence. Sorting reorders that sequence; rendering (HTML or plain text)
//! always reflects the current row order. A freshly built table starts in
//! the order the rows were supplied, so a refetch discards any sort.

mod render;
mod sort;

pub use render::*;
pub use sort::*;

/// A column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub sortable: bool,
}

impl Column {
    /// A plain, non-sortable column.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sortable: false,
        }
    }

    /// A column that sorts when its header is activated.
    pub fn sortable(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sortable: true,
        }
    }
}

/// One table cell.
///
/// `Markup` is emitted verbatim by the HTML renderer. Callers embedding
/// user-supplied text in markup must escape it first (see [`escape_html`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A missing value; renders as the empty string.
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Markup(String),
}

impl Cell {
    pub fn markup(markup: impl Into<String>) -> Self {
        Self::Markup(markup.into())
    }

    /// The text a reader sees: markup is reduced to its text content.
    pub fn text(&self) -> String {
        match self {
            Self::Markup(markup) => strip_tags(markup),
            other => other.render(),
        }
    }

    /// The string form written into the rendered table.
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) | Self::Markup(text) => text.clone(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Cell {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Builds a row from heterogeneous values.
///
/// ```ignore
/// let row = row![site.id, site.name.as_str(), Cell::Empty];
/// ```
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::table::Cell::from($cell)),*]
    };
}

/// Columns, rows and per-column sort state.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    /// Last direction applied per column, `None` until first sorted.
    directions: Vec<Option<SortDirection>>,
    /// Column of the most recent sort.
    sorted: Option<usize>,
    rule: ComparisonRule,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        let directions = vec![None; columns.len()];
        Self {
            columns,
            rows: Vec::new(),
            directions,
            sorted: None,
            rule: ComparisonRule::default(),
        }
    }

    /// Builds columns from labels, marking the listed indices sortable.
    pub fn with_labels(labels: &[&str], sortable: &[usize]) -> Self {
        let columns = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Column {
                label: label.to_string(),
                sortable: sortable.contains(&i),
            })
            .collect();
        Self::new(columns)
    }

    /// Selects how cells are compared when sorting.
    pub fn with_rule(mut self, rule: ComparisonRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Vec<Cell>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rule(&self) -> ComparisonRule {
        self.rule
    }

    /// Last direction applied to `column`.
    pub fn direction(&self, column: usize) -> Option<SortDirection> {
        self.directions.get(column).copied().flatten()
    }

    /// The column the rows are currently ordered by, with its direction.
    pub fn sorted_column(&self) -> Option<(usize, SortDirection)> {
        let column = self.sorted?;
        Some((column, self.direction(column)?))
    }

    /// Text of every row at `column`, in current row order.
    pub fn column_texts(&self, column: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(column).map(Cell::text).unwrap_or_default())
            .collect()
    }

    /// Sorts by `column`, toggling that column's direction.
    ///
    /// The first sort of a column is ascending; every later sort of the same
    /// column flips it. Directions are tracked per column. Returns the
    /// applied direction, or `None` if the column is missing or not
    /// sortable (rows untouched).
    pub fn sort_by(&mut self, column: usize) -> Option<SortDirection> {
        if !self.columns.get(column)?.sortable {
            return None;
        }

        let direction = match self.directions[column] {
            Some(SortDirection::Ascending) => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };

        sort_rows(&mut self.rows, column, direction, self.rule);
        self.directions[column] = Some(direction);
        self.sorted = Some(column);
        log::debug!("sorted table by column {} ({:?})", column, direction);
        Some(direction)
    }
}
