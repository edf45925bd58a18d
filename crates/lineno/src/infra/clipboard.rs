//! Clipboard integration utilities.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Text sink for copy commands: the system clipboard when one is reachable,
/// shell clipboard utilities otherwise (headless sessions, SSH).
pub struct SystemClipboard {
    backend: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            backend: arboard::Clipboard::new().ok(),
        }
    }

    /// Write `text`, dropping the native backend permanently if it fails and
    /// retrying through the platform fallbacks.
    pub fn write(&mut self, text: &str) -> Result<()> {
        if let Some(backend) = self.backend.as_mut()
            && backend.set_text(text.to_owned()).is_ok()
        {
            return Ok(());
        }

        self.backend = None;
        for argv in FALLBACK_COMMANDS {
            match pipe_through(argv, text) {
                Ok(()) => {
                    debug!(command = argv[0], "copied via fallback clipboard utility");
                    return Ok(());
                }
                Err(error) => debug!(command = argv[0], %error, "clipboard fallback failed"),
            }
        }

        Err(anyhow!(
            "failed to copy text to clipboard using available backends"
        ))
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn pipe_through(argv: &[&str], text: &str) -> Result<()> {
    let (program, args) = argv
        .split_first()
        .context("clipboard command missing program")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn clipboard command: {program}"))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .context("failed to write clipboard contents")?;
    }

    let status = child
        .wait()
        .with_context(|| format!("clipboard command did not exit cleanly: {program}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("clipboard command exited with status {status}"))
    }
}

#[cfg(target_os = "macos")]
const FALLBACK_COMMANDS: &[&[&str]] = &[&["pbcopy"]];

#[cfg(all(unix, not(target_os = "macos")))]
const FALLBACK_COMMANDS: &[&[&str]] = &[&["xclip", "-selection", "clipboard"], &["wl-copy"]];

#[cfg(target_os = "windows")]
const FALLBACK_COMMANDS: &[&[&str]] =
    &[&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]];

#[cfg(not(any(unix, target_os = "windows")))]
const FALLBACK_COMMANDS: &[&[&str]] = &[];
