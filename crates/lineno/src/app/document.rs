//! Document snapshots: parsing, line access, and atomic edit application.

use crate::domain::model::{EditBatch, LineBreak, Position, Selection, TextLine};
use crate::domain::text;

/// An immutable snapshot of the target file, recomputed fresh per invocation.
///
/// Parsing preserves the break of every line exactly; a trailing break yields
/// a final empty line, so `parse("a\n")` has two lines, matching editor
/// line-count semantics. [`Document::to_text`] is the exact inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<TextLine>,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut chars = source.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    let line_break = if chars.peek() == Some(&'\n') {
                        chars.next();
                        LineBreak::CrLf
                    } else {
                        LineBreak::Cr
                    };
                    lines.push(TextLine::new(std::mem::take(&mut current), line_break));
                }
                '\n' => lines.push(TextLine::new(std::mem::take(&mut current), LineBreak::Lf)),
                _ => current.push(ch),
            }
        }
        lines.push(TextLine::new(current, LineBreak::None));
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&TextLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push_str(line.line_break.as_str());
        }
        out
    }

    /// Apply a batch computed against this snapshot, producing the edited
    /// document. Edits are sorted by descending start offset and applied back
    /// to front, so every range keeps its pre-edit meaning; ranges that do
    /// not fit the document are skipped.
    pub fn apply(&self, batch: &EditBatch) -> Document {
        let source = self.to_text();
        let total = source.len();

        let mut spans: Vec<(usize, usize, &str)> = batch
            .edits()
            .iter()
            .map(|edit| {
                (
                    self.byte_offset(edit.start),
                    self.byte_offset(edit.end),
                    edit.text.as_str(),
                )
            })
            .filter(|(start, end, _)| start <= end && *end <= total)
            .collect();
        spans.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        let mut edited = source;
        for (start, end, replacement) in spans {
            edited.replace_range(start..end, replacement);
        }
        Document::parse(&edited)
    }

    /// Byte offset of a position. Columns clamp to the end of the line's
    /// text; positions past the last line clamp to the end of the document.
    fn byte_offset(&self, position: Position) -> usize {
        let mut offset = 0;
        for (index, line) in self.lines.iter().enumerate() {
            if index == position.line {
                return offset + byte_of_column(&line.text, position.column);
            }
            offset += line.text.len() + line.line_break.len();
        }
        offset
    }

    /// The dominant break style across the full line span of every
    /// selection. Overlapping counts (a CRLF also counts as one CR and one
    /// LF) feed a true three-way maximum; ties favor CRLF, then CR.
    pub fn dominant_line_break(&self, selections: &[Selection]) -> LineBreak {
        let mut span = String::new();
        for selection in selections {
            for index in selection.start().line..=selection.end().line {
                if let Some(line) = self.line(index) {
                    span.push_str(&line.text);
                    span.push_str(line.line_break.as_str());
                }
            }
        }

        let crlf = text::count_matches(&span, "\r\n");
        let cr = text::count_matches(&span, "\r");
        let lf = text::count_matches(&span, "\n");
        if crlf >= cr && crlf >= lf {
            LineBreak::CrLf
        } else if cr >= lf {
            LineBreak::Cr
        } else {
            LineBreak::Lf
        }
    }
}

fn byte_of_column(text: &str, column: usize) -> usize {
    match text.char_indices().nth(column) {
        Some((idx, _)) => idx,
        None => text.len(),
    }
}
