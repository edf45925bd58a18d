//! Edit-producing transform variants.
//!
//! Every function reads the selections fresh against the given snapshot and
//! returns a batch expressed in pre-edit coordinates; nothing here mutates.

use tracing::debug;

use crate::app::document::Document;
use crate::app::indent::{min_indent, min_indent_after_prefix};
use crate::app::numbering::{self, NumberSource};
use crate::app::prefix::PrefixMatcher;
use crate::app::selection::visit_lines;
use crate::domain::model::{Edit, EditBatch, Position, Selection};
use crate::domain::text;

/// How inserted lines are reshaped around the new label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertFormat {
    /// Prepend the label, leave the line untouched.
    NoFormat,
    /// Rebuild the line as label + text with the selection-wide minimum
    /// indent removed.
    DeleteIndent,
}

/// Insert `label + delimiter` on every visited line. Blank lines get a label
/// too; insertion does not skip them.
pub fn insert_line_numbers(
    document: &Document,
    selections: &[Selection],
    delimiter: &str,
    source: NumberSource,
    format: InsertFormat,
) -> EditBatch {
    let width = match source {
        NumberSource::FilePosition => numbering::file_digit_width(selections),
        NumberSource::Start(start) => numbering::input_digit_width(selections, start),
    };
    let common_indent = match format {
        InsertFormat::NoFormat => 0,
        InsertFormat::DeleteIndent => min_indent(document, selections),
    };

    let mut counter = match source {
        NumberSource::FilePosition => 0,
        NumberSource::Start(start) => start,
    };
    let mut batch = EditBatch::new();
    for index in visit_lines(selections) {
        let Some(line) = document.line(index) else {
            continue;
        };
        let value = match source {
            NumberSource::FilePosition => index as i64 + 1,
            NumberSource::Start(_) => {
                let value = counter;
                counter = counter.saturating_add(1);
                value
            }
        };
        let label = numbering::label(value, width);
        match format {
            InsertFormat::NoFormat => {
                batch.push(Edit::insert(
                    Position::new(index, 0),
                    format!("{label}{delimiter}"),
                ));
            }
            InsertFormat::DeleteIndent => {
                let kept = text::char_slice_from(&line.text, common_indent);
                batch.push(Edit::replace(
                    Position::new(index, 0),
                    Position::new(index, line.char_len()),
                    format!("{label}{delimiter}{kept}"),
                ));
            }
        }
    }
    debug!(edits = batch.len(), "computed insert batch");
    batch
}

/// Remove the number prefix from every visited line that carries one;
/// everything else is left untouched. The deletion starts at column 0, so a
/// prefix behind leading indent takes the indent with it.
pub fn delete_line_numbers(
    document: &Document,
    selections: &[Selection],
    matcher: &PrefixMatcher,
) -> EditBatch {
    let mut batch = EditBatch::new();
    for index in visit_lines(selections) {
        let Some(line) = document.line(index) else {
            continue;
        };
        let Some(split) = matcher.split(&line.text) else {
            continue;
        };
        let split_column = split.prefix.chars().count();
        batch.push(Edit::delete(
            Position::new(index, 0),
            Position::new(index, split_column),
        ));
    }
    debug!(edits = batch.len(), "computed delete-prefix batch");
    batch
}

/// Delete numbered lines whose payload is blank, breaks included. Lines
/// without a prefix survive even when blank.
pub fn delete_blank_numbered_lines(
    document: &Document,
    selections: &[Selection],
    matcher: &PrefixMatcher,
) -> EditBatch {
    let mut batch = EditBatch::new();
    for index in visit_lines(selections) {
        let Some(line) = document.line(index) else {
            continue;
        };
        let Some(split) = matcher.split(&line.text) else {
            continue;
        };
        if text::is_blank(split.payload) {
            batch.push(Edit::delete(
                Position::new(index, 0),
                Position::new(index + 1, 0),
            ));
        }
    }
    debug!(edits = batch.len(), "computed delete-blank-line batch");
    batch
}

/// Strip the common payload indent from numbered lines, leaving the prefix
/// in place. A payload only loses characters when it is strictly longer than
/// the selection-wide minimum.
pub fn delete_numbered_indent(
    document: &Document,
    selections: &[Selection],
    matcher: &PrefixMatcher,
) -> EditBatch {
    let common_indent = min_indent_after_prefix(document, selections, matcher);
    let mut batch = EditBatch::new();
    if common_indent == 0 {
        return batch;
    }
    for index in visit_lines(selections) {
        let Some(line) = document.line(index) else {
            continue;
        };
        let Some(split) = matcher.split(&line.text) else {
            continue;
        };
        if split.payload.chars().count() > common_indent {
            let payload_column = split.prefix.chars().count();
            batch.push(Edit::delete(
                Position::new(index, payload_column),
                Position::new(index, payload_column + common_indent),
            ));
        }
    }
    debug!(edits = batch.len(), "computed delete-indent batch");
    batch
}
