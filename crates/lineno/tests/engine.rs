use lineno::app::command::{self, Command, CommandContext, Outcome};
use lineno::app::copy::{CopyFormat, Header};
use lineno::app::document::Document;
use lineno::app::transform::InsertFormat;
use lineno::domain::model::Selection;
use lineno::infra::config::Config;

fn execute(
    document: &Document,
    selections: &[Selection],
    command: Command,
    start: Option<i64>,
) -> Outcome {
    let config = Config::default();
    let ctx = CommandContext {
        document,
        selections,
        config: &config,
        file_path: Some("/a/b/c.txt"),
        relative_path: Some("b/c.txt"),
    };
    command::execute(command, &ctx, start).expect("command executes")
}

fn apply_edits(
    document: &Document,
    selections: &[Selection],
    command: Command,
    start: Option<i64>,
) -> Document {
    match execute(document, selections, command, start) {
        Outcome::Edits(batch) => document.apply(&batch),
        other => panic!("expected edits, got {other:?}"),
    }
}

fn rendered_copy(
    document: &Document,
    selections: &[Selection],
    command: Command,
) -> String {
    match execute(document, selections, command, None) {
        Outcome::Copy(text) => text,
        other => panic!("expected copy text, got {other:?}"),
    }
}

#[test]
fn insert_then_delete_restores_the_original() {
    let original = "fn main() {\r\n    start();\r\n\r\n    finish();\r\n}";
    let document = Document::parse(original);
    let selections = vec![Selection::lines(0, 4)];

    let numbered = apply_edits(
        &document,
        &selections,
        Command::InsertFileNumbers(InsertFormat::NoFormat),
        None,
    );
    assert_ne!(numbered.to_text(), original);

    let restored = apply_edits(&numbered, &selections, Command::DeleteLineNumbers, None);
    assert_eq!(restored.to_text(), original);
}

#[test]
fn twelve_lines_get_two_digit_labels() {
    let source: String = (0..12).map(|_| "line\n").collect();
    let document = Document::parse(&source);
    let selections = vec![Selection::lines(0, 11)];
    let numbered = apply_edits(
        &document,
        &selections,
        Command::InsertFileNumbers(InsertFormat::NoFormat),
        None,
    );
    let text = numbered.to_text();
    assert!(text.starts_with("01: line\n"));
    assert!(text.contains("\n09: line\n"));
    assert!(text.contains("\n12: line\n"));
}

#[test]
fn input_numbering_pads_only_when_the_sequence_needs_it() {
    let document = Document::parse("a\nb\nc\n");
    let selections = vec![Selection::lines(0, 2)];

    let from_five = apply_edits(
        &document,
        &selections,
        Command::InsertInputNumbers(InsertFormat::NoFormat),
        Some(5),
    );
    assert_eq!(from_five.to_text(), "5: a\n6: b\n7: c\n");

    let from_ninety_five = apply_edits(
        &document,
        &selections,
        Command::InsertInputNumbers(InsertFormat::NoFormat),
        Some(95),
    );
    assert_eq!(from_ninety_five.to_text(), "95: a\n96: b\n97: c\n");

    let crossing_one_hundred = apply_edits(
        &document,
        &selections,
        Command::InsertInputNumbers(InsertFormat::NoFormat),
        Some(99),
    );
    assert_eq!(
        crossing_one_hundred.to_text(),
        "099: a\n100: b\n101: c\n"
    );
}

#[test]
fn insert_labels_blank_lines_too() {
    let document = Document::parse("foo\nbar\n\nbaz");
    let selections = vec![Selection::lines(0, 3)];
    let numbered = apply_edits(
        &document,
        &selections,
        Command::InsertFileNumbers(InsertFormat::NoFormat),
        None,
    );
    assert_eq!(numbered.to_text(), "1: foo\n2: bar\n3: \n4: baz");
}

#[test]
fn copy_delete_blank_line_omits_blanks_but_keeps_labels() {
    let document = Document::parse("foo\nbar\n\nbaz");
    let selections = vec![Selection::lines(0, 3)];
    let rendered = rendered_copy(
        &document,
        &selections,
        Command::CopyWithNumbers {
            header: Header::None,
            format: CopyFormat::DeleteBlankLine,
        },
    );
    assert_eq!(rendered, "1: foo\n2: bar\n4: baz");
}

#[test]
fn full_path_header_splits_folder_and_filename() {
    let document = Document::parse("foo\nbar\n");
    let selections = vec![Selection::lines(0, 1)];
    let rendered = rendered_copy(
        &document,
        &selections,
        Command::CopyWithNumbers {
            header: Header::FullPath,
            format: CopyFormat::NoFormat,
        },
    );
    assert_eq!(rendered, "/a/b\nc.txt\n1: foo\n2: bar\n");
}

#[test]
fn relative_path_header_uses_the_workspace_form() {
    let document = Document::parse("foo\n");
    let selections = vec![Selection::lines(0, 0)];
    let rendered = rendered_copy(
        &document,
        &selections,
        Command::CopyWithNumbers {
            header: Header::RelativePath,
            format: CopyFormat::NoFormat,
        },
    );
    assert_eq!(rendered, "b\nc.txt\n1: foo\n");
}

#[test]
fn crlf_documents_render_crlf_headers() {
    let document = Document::parse("foo\r\nbar\r\n");
    let selections = vec![Selection::lines(0, 1)];
    let rendered = rendered_copy(
        &document,
        &selections,
        Command::CopyWithNumbers {
            header: Header::FileName,
            format: CopyFormat::NoFormat,
        },
    );
    assert_eq!(rendered, "c.txt\r\n1: foo\r\n2: bar\r\n");
}

#[test]
fn multi_selection_numbering_follows_file_positions() {
    let document = Document::parse("a\nb\nc\nd\ne\nf\ng\nh\ni\nj\nk\n");
    let selections = vec![Selection::lines(1, 2), Selection::lines(9, 10)];
    let rendered = rendered_copy(
        &document,
        &selections,
        Command::CopyWithNumbers {
            header: Header::None,
            format: CopyFormat::NoFormat,
        },
    );
    assert_eq!(rendered, "02: b\n03: c\n10: j\n11: k\n");
}

#[test]
fn stripped_copy_leaves_the_document_untouched() {
    let source = "1: foo\nplain\n2: bar\n";
    let document = Document::parse(source);
    let selections = vec![Selection::lines(0, 2)];
    let rendered = rendered_copy(&document, &selections, Command::CopyDeleteNumbers);
    assert_eq!(rendered, "foo\nplain\nbar\n");
    assert_eq!(document.to_text(), source);
}
