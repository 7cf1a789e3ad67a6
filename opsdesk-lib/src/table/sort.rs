//! Row ordering rules

use std::cmp::Ordering;

use super::Cell;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// How two cells of the sorted column are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonRule {
    /// Decide per pair: numeric if both sides parse as numbers, otherwise
    /// text. Not a total order when a column mixes numbers and text.
    #[default]
    PerPair,
    /// Decide once per column: numeric only if every cell parses,
    /// otherwise text for all pairs. Always a total order.
    ColumnInferred,
}

/// A cell's text plus its numeric reading, computed once per sort.
struct SortKey {
    text: String,
    number: Option<f64>,
}

impl SortKey {
    fn new(text: String) -> Self {
        let number = parse_number(&text);
        Self { text, number }
    }
}

/// Reads a leading decimal number from `text`, accepting `,` as the
/// decimal separator.
///
/// Only the first comma is treated as a separator. Leading whitespace is
/// skipped and trailing garbage ignored, so `"12 kg"` reads as 12 while
/// `"abc"` and `""` do not read at all.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.replacen(',', ".", 1);
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let digits_from = |start: usize| bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Case-insensitive text ordering; on a case-only difference lower case
/// sorts first.
///
/// An approximation of locale collation, not the real thing: accents and
/// punctuation are compared by code point rather than given their own
/// weights, so `"é"` sorts after `"z"`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| swap_case(a).cmp(&swap_case(b)))
}

fn swap_case(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                c.to_uppercase().collect::<Vec<_>>()
            }
        })
        .collect()
}

/// Per-pair comparison of two cell texts.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => locale_compare(a, b),
    }
}

/// Stably reorders `rows` by the text of `column`.
///
/// Cells beyond a row's length read as empty text.
pub fn sort_rows(
    rows: &mut Vec<Vec<Cell>>,
    column: usize,
    direction: SortDirection,
    rule: ComparisonRule,
) {
    let keys: Vec<SortKey> = rows
        .iter()
        .map(|row| SortKey::new(row.get(column).map(Cell::text).unwrap_or_default()))
        .collect();
    let all_numeric = keys.iter().all(|key| key.number.is_some());

    let compare = |a: &usize, b: &usize| {
        let (a, b) = (&keys[*a], &keys[*b]);
        let ordering = match rule {
            ComparisonRule::PerPair => match (a.number, b.number) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => locale_compare(&a.text, &b.text),
            },
            ComparisonRule::ColumnInferred if all_numeric => match (a.number, b.number) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => Ordering::Equal,
            },
            ComparisonRule::ColumnInferred => locale_compare(&a.text, &b.text),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    };

    let mut order: Vec<usize> = (0..rows.len()).collect();
    match rule {
        // std's sort may panic on a comparator that is not a total order.
        ComparisonRule::PerPair => insertion_sort(&mut order, compare),
        ComparisonRule::ColumnInferred => order.sort_by(compare),
    }

    let mut slots: Vec<Option<Vec<Cell>>> = std::mem::take(rows).into_iter().map(Some).collect();
    *rows = order.iter().filter_map(|&i| slots[i].take()).collect();
}

/// Stable insertion sort that tolerates inconsistent comparators.
fn insertion_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
