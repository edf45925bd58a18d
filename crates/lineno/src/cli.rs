//! Command-line surface over the command registry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing::debug;

use crate::app::command::{self, Command, CommandContext, Outcome};
use crate::app::copy::{CopyFormat, Header};
use crate::app::document::Document;
use crate::app::transform::InsertFormat;
use crate::domain::model::{Position, Selection};
use crate::domain::text;
use crate::infra::clipboard::SystemClipboard;
use crate::infra::config::Config;
use crate::infra::workspace;
use crate::ui::app::UiApp;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Annotate, strip, and copy line-numbered text",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Insert file line numbers on the selected lines
    Insert {
        file: PathBuf,
        /// 1-based lines to touch, e.g. `3` or `2-8,14`; whole file when absent
        #[arg(long)]
        lines: Option<String>,
        /// Remove the selection-wide minimum indent while inserting
        #[arg(long)]
        delete_indent: bool,
        /// Rewrite the file instead of printing the result
        #[arg(long, short = 'i')]
        in_place: bool,
    },
    /// Insert line numbers counting from a chosen start value
    InsertFrom {
        file: PathBuf,
        #[arg(long)]
        lines: Option<String>,
        /// Start value; prompts interactively when absent
        #[arg(long)]
        start: Option<i64>,
        #[arg(long)]
        delete_indent: bool,
        #[arg(long, short = 'i')]
        in_place: bool,
    },
    /// Delete number prefixes from the selected lines
    StripNumbers {
        file: PathBuf,
        #[arg(long)]
        lines: Option<String>,
        #[arg(long, short = 'i')]
        in_place: bool,
    },
    /// Delete numbered lines whose payload is blank
    StripBlankLines {
        file: PathBuf,
        #[arg(long)]
        lines: Option<String>,
        #[arg(long, short = 'i')]
        in_place: bool,
    },
    /// Delete the common indent following number prefixes
    StripIndent {
        file: PathBuf,
        #[arg(long)]
        lines: Option<String>,
        #[arg(long, short = 'i')]
        in_place: bool,
    },
    /// Copy selected lines with generated line numbers
    Copy {
        file: PathBuf,
        #[arg(long)]
        lines: Option<String>,
        #[arg(long, value_enum, default_value = "none")]
        header: Header,
        #[arg(long, value_enum, default_value = "no-format")]
        format: CopyFormat,
        /// Print to stdout instead of the clipboard
        #[arg(long)]
        stdout: bool,
    },
    /// Copy selected lines with existing number prefixes removed
    CopyStripped {
        file: PathBuf,
        #[arg(long)]
        lines: Option<String>,
        #[arg(long)]
        stdout: bool,
    },
    /// Open the interactive session on a file
    Ui { file: PathBuf },
    /// Generate shell completions
    Completions { shell: Shell },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Cmd::Insert {
            file,
            lines,
            delete_indent,
            in_place,
        } => run_edit(
            &file,
            lines.as_deref(),
            Command::InsertFileNumbers(insert_format(delete_indent)),
            None,
            in_place,
        ),
        Cmd::InsertFrom {
            file,
            lines,
            start,
            delete_indent,
            in_place,
        } => {
            let start = start.or_else(prompt_start);
            run_edit(
                &file,
                lines.as_deref(),
                Command::InsertInputNumbers(insert_format(delete_indent)),
                start,
                in_place,
            )
        }
        Cmd::StripNumbers {
            file,
            lines,
            in_place,
        } => run_edit(
            &file,
            lines.as_deref(),
            Command::DeleteLineNumbers,
            None,
            in_place,
        ),
        Cmd::StripBlankLines {
            file,
            lines,
            in_place,
        } => run_edit(
            &file,
            lines.as_deref(),
            Command::DeleteBlankLines,
            None,
            in_place,
        ),
        Cmd::StripIndent {
            file,
            lines,
            in_place,
        } => run_edit(
            &file,
            lines.as_deref(),
            Command::DeleteIndent,
            None,
            in_place,
        ),
        Cmd::Copy {
            file,
            lines,
            header,
            format,
            stdout,
        } => run_copy(
            &file,
            lines.as_deref(),
            Command::CopyWithNumbers { header, format },
            stdout,
        ),
        Cmd::CopyStripped {
            file,
            lines,
            stdout,
        } => run_copy(&file, lines.as_deref(), Command::CopyDeleteNumbers, stdout),
        Cmd::Ui { file } => UiApp::open(&file)?.run(),
        Cmd::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "lineno", &mut io::stdout());
            Ok(())
        }
    }
}

fn insert_format(delete_indent: bool) -> InsertFormat {
    if delete_indent {
        InsertFormat::DeleteIndent
    } else {
        InsertFormat::NoFormat
    }
}

fn run_edit(
    file: &Path,
    lines: Option<&str>,
    cmd: Command,
    start: Option<i64>,
    in_place: bool,
) -> Result<()> {
    let (document, config, selections) = load_target(file, lines)?;
    let ctx = CommandContext {
        document: &document,
        selections: &selections,
        config: &config,
        file_path: None,
        relative_path: None,
    };
    match command::execute(cmd, &ctx, start)? {
        Outcome::Edits(batch) => {
            debug!(edits = batch.len(), "applying edit batch");
            let edited = document.apply(&batch);
            write_result(file, &edited.to_text(), in_place)
        }
        Outcome::Cancelled => {
            debug!("input cancelled; no edit performed");
            if !in_place {
                print!("{}", document.to_text());
            }
            Ok(())
        }
        Outcome::Copy(_) => bail!("edit command produced copy output"),
    }
}

fn run_copy(file: &Path, lines: Option<&str>, cmd: Command, to_stdout: bool) -> Result<()> {
    let (document, config, selections) = load_target(file, lines)?;
    let absolute = std::path::absolute(file)
        .with_context(|| format!("failed to resolve {}", file.display()))?;
    let path_display = absolute.display().to_string();
    let relative_display = workspace::relative_path(&absolute);
    let ctx = CommandContext {
        document: &document,
        selections: &selections,
        config: &config,
        file_path: Some(&path_display),
        relative_path: Some(&relative_display),
    };
    match command::execute(cmd, &ctx, None)? {
        Outcome::Copy(rendered) => {
            if to_stdout {
                print!("{rendered}");
            } else {
                SystemClipboard::new().write(&rendered)?;
                debug!(bytes = rendered.len(), "copied to clipboard");
            }
            Ok(())
        }
        _ => bail!("copy command produced no text"),
    }
}

fn load_target(file: &Path, lines: Option<&str>) -> Result<(Document, Config, Vec<Selection>)> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let document = Document::parse(&source);
    let selections = parse_selections(lines, &document)?;
    let config = Config::load()?;
    Ok((document, config, selections))
}

fn write_result(file: &Path, text: &str, in_place: bool) -> Result<()> {
    if in_place {
        fs::write(file, text).with_context(|| format!("failed to write {}", file.display()))?;
    } else {
        print!("{text}");
    }
    Ok(())
}

/// Parse `--lines`: comma-separated 1-based `N` or `A-B` ranges. Without a
/// spec, the whole file is one selection swept through the final line's
/// text, so the phantom line after a trailing break stays out.
fn parse_selections(spec: Option<&str>, document: &Document) -> Result<Vec<Selection>> {
    let line_count = document.line_count();
    let Some(spec) = spec else {
        let last = line_count - 1;
        let column = document.line(last).map(|line| line.char_len()).unwrap_or(0);
        return Ok(vec![Selection::new(
            Position::new(0, 0),
            Position::new(last, column),
        )]);
    };

    let mut selections = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (first, last) = match part.split_once('-') {
            Some((a, b)) => (parse_line_number(a)?, parse_line_number(b)?),
            None => {
                let number = parse_line_number(part)?;
                (number, number)
            }
        };
        if first > last {
            bail!("invalid line range '{part}': start exceeds end");
        }
        if last > line_count {
            bail!("line {last} is past the end of the file ({line_count} lines)");
        }
        selections.push(Selection::lines(first - 1, last - 1));
    }
    if selections.is_empty() {
        bail!("no usable line ranges in '{spec}'");
    }
    Ok(selections)
}

fn parse_line_number(raw: &str) -> Result<usize> {
    let number: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid line number '{}'", raw.trim()))?;
    if number == 0 {
        bail!("line numbers are 1-based");
    }
    Ok(number)
}

/// Ask for a start value on the terminal. Empty input means the default of
/// 1; anything that is not an integer, or a cancelled prompt, means no edit.
fn prompt_start() -> Option<i64> {
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("start number (default 1)".into()),
        DefaultPromptSegment::Empty,
    );
    let mut editor = Reedline::create();
    match editor.read_line(&prompt) {
        Ok(Signal::Success(buffer)) => {
            let trimmed = buffer.trim();
            if trimmed.is_empty() {
                return Some(1);
            }
            text::parse_integer(trimmed)
        }
        _ => None,
    }
}
