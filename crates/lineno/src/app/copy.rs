//! Clipboard text builders and path headers.

use clap::ValueEnum;

use crate::app::document::Document;
use crate::app::indent::min_indent;
use crate::app::numbering;
use crate::app::prefix::PrefixMatcher;
use crate::app::selection::visit_lines;
use crate::domain::model::{LineBreak, Selection};
use crate::domain::text;

/// Reshaping applied to copied lines. Blank-line omission and indent removal
/// are independent axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum CopyFormat {
    NoFormat,
    DeleteIndent,
    DeleteBlankLine,
    DeleteIndentBlankLine,
}

impl CopyFormat {
    /// Stable identifier used in command ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyFormat::NoFormat => "no-format",
            CopyFormat::DeleteIndent => "delete-indent",
            CopyFormat::DeleteBlankLine => "delete-blank-line",
            CopyFormat::DeleteIndentBlankLine => "delete-indent-blank-line",
        }
    }

    fn strips_indent(&self) -> bool {
        matches!(self, CopyFormat::DeleteIndent | CopyFormat::DeleteIndentBlankLine)
    }

    fn skips_blank_lines(&self) -> bool {
        matches!(
            self,
            CopyFormat::DeleteBlankLine | CopyFormat::DeleteIndentBlankLine
        )
    }
}

/// The optional path block prefixed to copied text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Header {
    #[value(name = "none")]
    None,
    #[value(name = "filename")]
    FileName,
    #[value(name = "full-path")]
    FullPath,
    #[value(name = "relative-path")]
    RelativePath,
}

impl Header {
    /// Stable identifier used in command ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Header::None => "none",
            Header::FileName => "filename",
            Header::FullPath => "full-path",
            Header::RelativePath => "relative-path",
        }
    }
}

/// Render the selected lines with generated file-position labels.
///
/// Lines keep their own break; omitted blank lines leave a gap in the label
/// sequence rather than renumbering what remains.
pub fn copy_with_line_numbers(
    document: &Document,
    selections: &[Selection],
    delimiter: &str,
    format: CopyFormat,
) -> String {
    let width = numbering::file_digit_width(selections);
    let common_indent = if format.strips_indent() {
        min_indent(document, selections)
    } else {
        0
    };

    let mut out = String::new();
    for index in visit_lines(selections) {
        let Some(line) = document.line(index) else {
            continue;
        };
        if format.skips_blank_lines() && text::is_blank(&line.text) {
            continue;
        }
        let body = if format.strips_indent() {
            text::char_slice_from(&line.text, common_indent)
        } else {
            line.text.as_str()
        };
        out.push_str(&numbering::label(index as i64 + 1, width));
        out.push_str(delimiter);
        out.push_str(body);
        out.push_str(line.line_break.as_str());
    }
    out
}

/// Render the selected lines with any existing number prefix stripped.
/// Unnumbered lines pass through unchanged, breaks included.
pub fn copy_without_line_numbers(
    document: &Document,
    selections: &[Selection],
    matcher: &PrefixMatcher,
) -> String {
    let mut out = String::new();
    for index in visit_lines(selections) {
        let Some(line) = document.line(index) else {
            continue;
        };
        match matcher.split(&line.text) {
            Some(split) => out.push_str(split.payload),
            None => out.push_str(&line.text),
        }
        out.push_str(line.line_break.as_str());
    }
    out
}

/// Split a path at its last separator, trying `\` before `/`. A separator at
/// index 0, or none at all, leaves the whole string as the filename.
pub fn split_path(path: &str) -> (Option<&str>, &str) {
    let separator = path.rfind('\\').or_else(|| path.rfind('/'));
    match separator {
        None | Some(0) => (None, path),
        Some(index) => (Some(&path[..index]), &path[index + 1..]),
    }
}

/// Build the header block for a copy operation. `path` is the document's
/// full path, `relative_path` its workspace-relative form when one exists.
pub fn header_text(
    header: Header,
    path: &str,
    relative_path: Option<&str>,
    line_break: LineBreak,
) -> String {
    let brk = line_break.as_str();
    match header {
        Header::None => String::new(),
        Header::FileName => {
            let (_, filename) = split_path(path);
            format!("{filename}{brk}")
        }
        Header::FullPath => folder_and_filename(path, brk),
        Header::RelativePath => folder_and_filename(relative_path.unwrap_or(path), brk),
    }
}

fn folder_and_filename(path: &str, brk: &str) -> String {
    match split_path(path) {
        (Some(folder), filename) => format!("{folder}{brk}{filename}{brk}"),
        (None, filename) => format!("{filename}{brk}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_all(document: &Document) -> Vec<Selection> {
        vec![Selection::lines(0, document.line_count() - 1)]
    }

    #[test]
    fn no_format_keeps_every_line_and_break() {
        let document = Document::parse("foo\nbar\n\nbaz");
        let selections = select_all(&document);
        let rendered = copy_with_line_numbers(&document, &selections, ": ", CopyFormat::NoFormat);
        assert_eq!(rendered, "1: foo\n2: bar\n3: \n4: baz");
    }

    #[test]
    fn delete_blank_line_keeps_original_labels() {
        let document = Document::parse("foo\nbar\n\nbaz");
        let selections = select_all(&document);
        let rendered =
            copy_with_line_numbers(&document, &selections, ": ", CopyFormat::DeleteBlankLine);
        assert_eq!(rendered, "1: foo\n2: bar\n4: baz");
    }

    #[test]
    fn delete_indent_strips_to_the_selection_minimum() {
        let document = Document::parse("  foo\n    bar\n");
        let selections = vec![Selection::lines(0, 1)];
        let rendered =
            copy_with_line_numbers(&document, &selections, ": ", CopyFormat::DeleteIndent);
        assert_eq!(rendered, "1: foo\n2:   bar\n");
    }

    #[test]
    fn delete_indent_and_blank_line_compose() {
        let document = Document::parse("  foo\n\n    bar\n");
        let selections = vec![Selection::lines(0, 2)];
        let rendered = copy_with_line_numbers(
            &document,
            &selections,
            ": ",
            CopyFormat::DeleteIndentBlankLine,
        );
        assert_eq!(rendered, "1: foo\n3:   bar\n");
    }

    #[test]
    fn stripping_passes_unnumbered_lines_through() {
        let matcher = PrefixMatcher::new(": ").unwrap();
        let document = Document::parse("1: foo\r\nplain\r\n2: bar");
        let selections = select_all(&document);
        let rendered = copy_without_line_numbers(&document, &selections, &matcher);
        assert_eq!(rendered, "foo\r\nplain\r\nbar");
    }

    #[test]
    fn split_path_tries_backslash_before_slash() {
        assert_eq!(split_path(r"C:\dir\file.txt"), (Some(r"C:\dir"), "file.txt"));
        assert_eq!(split_path("/a/b/c.txt"), (Some("/a/b"), "c.txt"));
        assert_eq!(split_path("file.txt"), (None, "file.txt"));
        assert_eq!(split_path("/file.txt"), (None, "/file.txt"));
    }

    #[test]
    fn full_path_header_renders_folder_then_filename() {
        let header = header_text(Header::FullPath, "/a/b/c.txt", None, LineBreak::Lf);
        assert_eq!(header, "/a/b\nc.txt\n");
    }

    #[test]
    fn filename_header_is_a_single_line() {
        let header = header_text(Header::FileName, "/a/b/c.txt", None, LineBreak::CrLf);
        assert_eq!(header, "c.txt\r\n");
    }

    #[test]
    fn relative_header_splits_the_relative_form() {
        let header = header_text(
            Header::RelativePath,
            "/home/user/repo/src/lib.rs",
            Some("src/lib.rs"),
            LineBreak::Lf,
        );
        assert_eq!(header, "src\nlib.rs\n");
    }

    #[test]
    fn none_header_is_empty() {
        assert_eq!(header_text(Header::None, "/a/b.txt", None, LineBreak::Lf), "");
    }
}
