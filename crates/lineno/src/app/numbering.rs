//! Zero-padded line-number labels.

use crate::app::selection::visit_lines;
use crate::domain::model::Selection;

/// Where label values come from: the line's 1-based position in the file, or
/// a running counter seeded by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberSource {
    FilePosition,
    Start(i64),
}

/// Digit width for file numbering: the widest 1-based position among the
/// visited lines.
pub fn file_digit_width(selections: &[Selection]) -> usize {
    let mut width = 0;
    for index in visit_lines(selections) {
        width = width.max(decimal_len(index as i64 + 1));
    }
    width
}

/// Digit width for input numbering: the counter starts at `start` and
/// advances once per visited line across all selections combined, never
/// resetting per selection.
pub fn input_digit_width(selections: &[Selection], start: i64) -> usize {
    let mut width = 0;
    let mut value = start;
    for _ in visit_lines(selections) {
        width = width.max(decimal_len(value));
        value = value.saturating_add(1);
    }
    width
}

/// Render a label, left-padding the decimal form with `0` to `width`. A
/// value needing more digits than `width` is never truncated.
pub fn label(value: i64, width: usize) -> String {
    format!("{:0>width$}", value.to_string())
}

fn decimal_len(value: i64) -> usize {
    value.to_string().len()
}
