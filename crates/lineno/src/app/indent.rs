//! Indentation measurement across a selection set.

use crate::app::document::Document;
use crate::app::prefix::PrefixMatcher;
use crate::app::selection::visit_lines;
use crate::domain::model::Selection;
use crate::domain::text;

const INDENT_CHARS: &[char] = &[' ', '\t'];

/// Minimum leading space/tab count over the visited non-blank lines.
///
/// Degrades to 0 when nothing but blank lines is visited; callers never see
/// an unbounded sentinel.
pub fn min_indent(document: &Document, selections: &[Selection]) -> usize {
    let mut minimum: Option<usize> = None;
    for index in visit_lines(selections) {
        let Some(line) = document.line(index) else {
            continue;
        };
        if text::is_blank(&line.text) {
            continue;
        }
        let indent = text::leading_count(&line.text, INDENT_CHARS);
        minimum = Some(minimum.map_or(indent, |current| current.min(indent)));
    }
    minimum.unwrap_or(0)
}

/// Like [`min_indent`], but measured on the payload after an existing number
/// prefix. Lines without a prefix are skipped entirely, as are lines whose
/// payload is blank once trimmed.
pub fn min_indent_after_prefix(
    document: &Document,
    selections: &[Selection],
    matcher: &PrefixMatcher,
) -> usize {
    let mut minimum: Option<usize> = None;
    for index in visit_lines(selections) {
        let Some(line) = document.line(index) else {
            continue;
        };
        let Some(split) = matcher.split(&line.text) else {
            continue;
        };
        if text::is_blank(split.payload) {
            continue;
        }
        let indent = text::leading_count(split.payload, INDENT_CHARS);
        minimum = Some(minimum.map_or(indent, |current| current.min(indent)));
    }
    minimum.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_all(document: &Document) -> Vec<Selection> {
        vec![Selection::lines(0, document.line_count() - 1)]
    }

    #[test]
    fn all_blank_selection_degrades_to_zero() {
        let document = Document::parse("\n  \n\t\n");
        assert_eq!(min_indent(&document, &select_all(&document)), 0);
    }

    #[test]
    fn shared_indent_is_the_minimum() {
        let document = Document::parse("    a\n    b\n    c\n");
        assert_eq!(min_indent(&document, &select_all(&document)), 4);
    }

    #[test]
    fn least_indented_line_wins() {
        let document = Document::parse("    a\n  b\n      c\n");
        assert_eq!(min_indent(&document, &select_all(&document)), 2);
    }

    #[test]
    fn blank_lines_do_not_drag_the_minimum_down() {
        let document = Document::parse("    a\n\n    b\n");
        assert_eq!(min_indent(&document, &select_all(&document)), 4);
    }

    #[test]
    fn tabs_count_as_indent_characters() {
        let document = Document::parse("\t\ta\n\tb\n");
        assert_eq!(min_indent(&document, &select_all(&document)), 1);
    }

    #[test]
    fn prefix_variant_skips_unnumbered_and_blank_payload_lines() {
        let matcher = PrefixMatcher::new(": ").unwrap();
        let document = Document::parse("1:     a\n2: \nnot numbered\n3:   b\n");
        let selections = select_all(&document);
        assert_eq!(
            min_indent_after_prefix(&document, &selections, &matcher),
            2
        );
    }

    #[test]
    fn prefix_variant_degrades_to_zero_without_numbered_lines() {
        let matcher = PrefixMatcher::new(": ").unwrap();
        let document = Document::parse("plain\nlines\n");
        let selections = select_all(&document);
        assert_eq!(
            min_indent_after_prefix(&document, &selections, &matcher),
            0
        );
    }
}
