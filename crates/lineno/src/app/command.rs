//! The command registry.
//!
//! Every operation is a value here, and [`execute`] is a pure function of a
//! resolved document/selection snapshot plus configuration. The CLI and the
//! menu both funnel into this table; neither carries transform logic of its
//! own.

use anyhow::{Result, bail};
use tracing::debug;

use crate::app::copy::{self, CopyFormat, Header};
use crate::app::document::Document;
use crate::app::numbering::NumberSource;
use crate::app::prefix::PrefixMatcher;
use crate::app::transform::{self, InsertFormat};
use crate::domain::errors::DomainError;
use crate::domain::model::{EditBatch, Selection};
use crate::infra::config::Config;

/// Every named operation the tool exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert labels numbered by file position.
    InsertFileNumbers(InsertFormat),
    /// Insert labels numbered from an interactively supplied start value.
    InsertInputNumbers(InsertFormat),
    DeleteLineNumbers,
    DeleteBlankLines,
    DeleteIndent,
    CopyWithNumbers { header: Header, format: CopyFormat },
    CopyDeleteNumbers,
}

/// What an executed command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An atomic batch for the caller to apply and persist.
    Edits(EditBatch),
    /// Fully rendered text for the caller to hand to the clipboard.
    Copy(String),
    /// The interactive input was cancelled or invalid; nothing happened.
    Cancelled,
}

/// The resolved snapshot a command runs against. Path strings are resolved
/// by the caller so that execution itself touches no filesystem state.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub document: &'a Document,
    pub selections: &'a [Selection],
    pub config: &'a Config,
    /// Full path of the document, for header building.
    pub file_path: Option<&'a str>,
    /// Workspace-relative form of the path when one exists.
    pub relative_path: Option<&'a str>,
}

const INSERT_FORMATS: [(InsertFormat, &str); 2] = [
    (InsertFormat::NoFormat, "no-format"),
    (InsertFormat::DeleteIndent, "delete-indent"),
];

const HEADERS: [Header; 4] = [
    Header::None,
    Header::FileName,
    Header::FullPath,
    Header::RelativePath,
];

const COPY_FORMATS: [CopyFormat; 4] = [
    CopyFormat::NoFormat,
    CopyFormat::DeleteIndent,
    CopyFormat::DeleteBlankLine,
    CopyFormat::DeleteIndentBlankLine,
];

impl Command {
    /// Enumerate the full registry, edit commands first.
    pub fn all() -> Vec<Command> {
        let mut commands = Vec::new();
        for (format, _) in INSERT_FORMATS {
            commands.push(Command::InsertFileNumbers(format));
        }
        for (format, _) in INSERT_FORMATS {
            commands.push(Command::InsertInputNumbers(format));
        }
        commands.push(Command::DeleteLineNumbers);
        commands.push(Command::DeleteBlankLines);
        commands.push(Command::DeleteIndent);
        for header in HEADERS {
            for format in COPY_FORMATS {
                commands.push(Command::CopyWithNumbers { header, format });
            }
        }
        commands.push(Command::CopyDeleteNumbers);
        commands
    }

    /// Stable kebab-case identifier.
    pub fn id(&self) -> String {
        match self {
            Command::InsertFileNumbers(format) => {
                format!("insert-file-{}", insert_format_id(*format))
            }
            Command::InsertInputNumbers(format) => {
                format!("insert-input-{}", insert_format_id(*format))
            }
            Command::DeleteLineNumbers => "delete-line-number".to_string(),
            Command::DeleteBlankLines => "delete-blank-line".to_string(),
            Command::DeleteIndent => "delete-indent".to_string(),
            Command::CopyWithNumbers { header, format } => {
                format!("copy-{}-{}", header.as_str(), format.as_str())
            }
            Command::CopyDeleteNumbers => "copy-delete-line-number".to_string(),
        }
    }

    /// Look an identifier up in the registry.
    pub fn from_id(id: &str) -> Result<Command, DomainError> {
        Command::all()
            .into_iter()
            .find(|command| command.id() == id)
            .ok_or_else(|| DomainError::UnknownCommand(id.to_string()))
    }

    /// Whether the command needs an interactively supplied start value.
    pub fn needs_start_value(&self) -> bool {
        matches!(self, Command::InsertInputNumbers(_))
    }
}

fn insert_format_id(format: InsertFormat) -> &'static str {
    INSERT_FORMATS
        .iter()
        .find(|(candidate, _)| *candidate == format)
        .map(|(_, id)| *id)
        .expect("insert format is registered")
}

/// Run a command against the snapshot. `start` feeds the input-numbering
/// commands; `None` there means the prompt was cancelled and the outcome is
/// a silent [`Outcome::Cancelled`].
pub fn execute(command: Command, ctx: &CommandContext<'_>, start: Option<i64>) -> Result<Outcome> {
    let delimiter = ctx.config.defaults.delimiter();
    let matcher = PrefixMatcher::new(&delimiter)?;
    debug!(command = %command.id(), selections = ctx.selections.len(), "executing");

    match command {
        Command::InsertFileNumbers(format) => Ok(Outcome::Edits(transform::insert_line_numbers(
            ctx.document,
            ctx.selections,
            &delimiter,
            NumberSource::FilePosition,
            format,
        ))),
        Command::InsertInputNumbers(format) => match start {
            None => Ok(Outcome::Cancelled),
            Some(start) => Ok(Outcome::Edits(transform::insert_line_numbers(
                ctx.document,
                ctx.selections,
                &delimiter,
                NumberSource::Start(start),
                format,
            ))),
        },
        Command::DeleteLineNumbers => Ok(Outcome::Edits(transform::delete_line_numbers(
            ctx.document,
            ctx.selections,
            &matcher,
        ))),
        Command::DeleteBlankLines => Ok(Outcome::Edits(transform::delete_blank_numbered_lines(
            ctx.document,
            ctx.selections,
            &matcher,
        ))),
        Command::DeleteIndent => Ok(Outcome::Edits(transform::delete_numbered_indent(
            ctx.document,
            ctx.selections,
            &matcher,
        ))),
        Command::CopyWithNumbers { header, format } => {
            let header_block = match header {
                Header::None => String::new(),
                _ => {
                    let Some(path) = ctx.file_path else {
                        bail!("no file path available for a path header");
                    };
                    let line_break = ctx.document.dominant_line_break(ctx.selections);
                    copy::header_text(header, path, ctx.relative_path, line_break)
                }
            };
            let body =
                copy::copy_with_line_numbers(ctx.document, ctx.selections, &delimiter, format);
            Ok(Outcome::Copy(format!("{header_block}{body}")))
        }
        Command::CopyDeleteNumbers => Ok(Outcome::Copy(copy::copy_without_line_numbers(
            ctx.document,
            ctx.selections,
            &matcher,
        ))),
    }
}
