//! Application loop for the TUI.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use crate::app::command::{self, Command, CommandContext, Outcome};
use crate::app::document::Document;
use crate::app::selection::visit_lines;
use crate::domain::model::{Position, Selection};
use crate::domain::text;
use crate::infra::clipboard::SystemClipboard;
use crate::infra::config::Config;
use crate::infra::workspace;
use crate::ui::menu::{Menu, MenuState};

const TICK_RATE: Duration = Duration::from_millis(120);

/// Interactive single-file session: sweep line selections, pick a command
/// from the menu, apply edits in memory or copy to the clipboard.
pub struct UiApp {
    config: Config,
    path: PathBuf,
    path_display: String,
    relative_display: String,
    document: Document,
    clipboard: SystemClipboard,
    menu: MenuState,
    menu_component: Menu,
    prompt: PromptState,
    selections: Vec<Selection>,
    cursor: usize,
    anchor: Option<usize>,
    offset: usize,
    dirty: bool,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl UiApp {
    pub fn open(path: &Path) -> Result<Self> {
        let config = Config::load()?;
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let absolute = std::path::absolute(path)
            .with_context(|| format!("failed to resolve {}", path.display()))?;
        let relative_display = workspace::relative_path(&absolute);
        Ok(Self {
            config,
            path_display: absolute.display().to_string(),
            path: absolute,
            relative_display,
            document: Document::parse(&source),
            clipboard: SystemClipboard::new(),
            menu: MenuState::default(),
            menu_component: Menu,
            prompt: PromptState::default(),
            selections: Vec::new(),
            cursor: 0,
            anchor: None,
            offset: 0,
            dirty: false,
            status: None,
            should_quit: false,
        })
    }

    /// Launch the terminal UI and enter the event loop.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.hide_cursor().ok();

        let event_loop_result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        event_loop_result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev)?;
            }
        }
        Ok(())
    }

    fn tick(&mut self) {
        if let Some(status) = &self.status
            && status.is_expired()
        {
            self.status = None;
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            self.handle_key_event(key)?;
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.prompt.is_open() {
            self.handle_prompt_key(key);
            return Ok(());
        }
        if self.menu.is_open() {
            self.handle_menu_key(key);
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Char('s') => {
                    self.save()?;
                }
                _ => {}
            }
            return Ok(());
        }

        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Esc => {
                self.anchor = None;
                self.selections.clear();
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Up => self.move_cursor(-1, shift),
            KeyCode::Down => self.move_cursor(1, shift),
            KeyCode::Char('g') if !shift => self.jump_cursor(0),
            KeyCode::Char('G') => self.jump_cursor(self.document.line_count().saturating_sub(1)),
            KeyCode::Char(ch) => {
                let lowered = ch.to_ascii_lowercase();
                if Some(lowered) == binding_char(&self.config.keybindings.up) {
                    self.move_cursor(-1, shift);
                } else if Some(lowered) == binding_char(&self.config.keybindings.down) {
                    self.move_cursor(1, shift);
                } else if Some(ch) == binding_char(&self.config.keybindings.select) {
                    self.commit_selection();
                } else if Some(ch) == binding_char(&self.config.keybindings.menu) {
                    self.menu.open();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.menu.close(),
            KeyCode::Char('j') | KeyCode::Down => self.menu.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.menu.move_cursor(-1),
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                if let Some(command) = self.menu.descend() {
                    self.menu.close();
                    self.run_command(command);
                }
            }
            KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
                if !self.menu.ascend() {
                    self.menu.close();
                }
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.prompt.cancel();
            }
            KeyCode::Enter => {
                if let Some((command, input)) = self.prompt.take() {
                    // A cleared or non-integer input aborts without a word.
                    if let Some(start) = text::parse_integer(&input) {
                        self.execute_command(command, Some(start));
                    }
                }
            }
            KeyCode::Backspace => {
                self.prompt.pop_char();
            }
            KeyCode::Char(ch) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.prompt.push_char(ch);
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        let max = self.document.line_count().saturating_sub(1);
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(max);
    }

    fn jump_cursor(&mut self, line: usize) {
        self.anchor = None;
        self.cursor = line.min(self.document.line_count().saturating_sub(1));
    }

    fn commit_selection(&mut self) {
        let anchor = self.anchor.take().unwrap_or(self.cursor);
        let first = anchor.min(self.cursor);
        let last = anchor.max(self.cursor);
        self.selections.push(Selection::lines(first, last));
        let count = last - first + 1;
        self.set_status(
            StatusLevel::Info,
            format!(
                "Selection {} added ({count} lines)",
                self.selections.len()
            ),
        );
    }

    fn run_command(&mut self, command: Command) {
        if command.needs_start_value() {
            self.prompt.open(command);
        } else {
            self.execute_command(command, None);
        }
    }

    fn execute_command(&mut self, command: Command, start: Option<i64>) {
        let selections = self.effective_selections();
        let ctx = CommandContext {
            document: &self.document,
            selections: &selections,
            config: &self.config,
            file_path: Some(&self.path_display),
            relative_path: Some(&self.relative_display),
        };
        match command::execute(command, &ctx, start) {
            Ok(Outcome::Edits(batch)) => {
                if batch.is_empty() {
                    self.set_status(StatusLevel::Info, "No lines affected");
                    return;
                }
                let count = batch.len();
                self.document = self.document.apply(&batch);
                self.dirty = true;
                self.selections.clear();
                self.anchor = None;
                self.cursor = self
                    .cursor
                    .min(self.document.line_count().saturating_sub(1));
                self.set_status(StatusLevel::Success, format!("Applied {count} line edits"));
            }
            Ok(Outcome::Copy(rendered)) => match self.clipboard.write(&rendered) {
                Ok(()) => self.set_status(
                    StatusLevel::Success,
                    format!("Copied {} bytes to clipboard", rendered.len()),
                ),
                Err(err) => self.set_status(StatusLevel::Error, err.to_string()),
            },
            Ok(Outcome::Cancelled) => {}
            Err(err) => self.set_status(StatusLevel::Error, err.to_string()),
        }
    }

    /// The committed selections, or the cursor line when none exist: a bare
    /// caret still selects its line.
    fn effective_selections(&self) -> Vec<Selection> {
        if !self.selections.is_empty() {
            return self.selections.clone();
        }
        let column = self
            .document
            .line(self.cursor)
            .map(|line| line.char_len())
            .unwrap_or(0);
        vec![Selection::new(
            Position::new(self.cursor, 0),
            Position::new(self.cursor, column),
        )]
    }

    fn save(&mut self) -> Result<()> {
        fs::write(&self.path, self.document.to_text())
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        self.dirty = false;
        self.set_status(StatusLevel::Success, "File saved");
        Ok(())
    }

    fn set_status<S: Into<String>>(&mut self, level: StatusLevel, message: S) {
        self.status = Some(StatusMessage::new(level, message.into()));
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let size = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
            .split(size);

        self.render_document(frame, layout[0]);
        self.render_hints(frame, layout[1]);
        self.render_status(frame, layout[2]);

        let mark = self.config.defaults.submenu_mark();
        self.menu_component.render(frame, size, &self.menu, &mark);
        self.render_prompt(frame, size);
    }

    fn render_document(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let title = if self.dirty {
            format!("{} [+]", self.relative_display)
        } else {
            self.relative_display.clone()
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = inner.height as usize;
        if height == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }

        let selected: HashSet<usize> = visit_lines(&self.selections).collect();
        let pending = self
            .anchor
            .map(|anchor| (anchor.min(self.cursor), anchor.max(self.cursor)));
        let gutter_width = self.document.line_count().to_string().len();

        let mut rows: Vec<Line> = Vec::with_capacity(height);
        for index in self.offset..(self.offset + height).min(self.document.line_count()) {
            let Some(line) = self.document.line(index) else {
                break;
            };
            let mut text_style = Style::default();
            if selected.contains(&index) {
                text_style = text_style.fg(Color::Yellow);
            }
            if let Some((first, last)) = pending
                && index >= first
                && index <= last
            {
                text_style = text_style.fg(Color::Magenta);
            }
            if index == self.cursor {
                text_style = text_style.add_modifier(Modifier::REVERSED);
            }
            rows.push(Line::from(vec![
                Span::styled(
                    format!("{:>gutter_width$} ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(line.text.clone(), text_style),
            ]));
        }
        frame.render_widget(Paragraph::new(rows), inner);
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect) {
        let hints = Paragraph::new(Line::from(vec![
            Span::styled("j/k", Style::default().fg(Color::Cyan)),
            Span::raw(" move · "),
            Span::styled("shift+j/k", Style::default().fg(Color::Cyan)),
            Span::raw(" extend · "),
            Span::styled("space", Style::default().fg(Color::Cyan)),
            Span::raw(" select · "),
            Span::styled(":", Style::default().fg(Color::Cyan)),
            Span::raw(" menu · "),
            Span::styled("ctrl+s", Style::default().fg(Color::Cyan)),
            Span::raw(" save · "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(hints, area);
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect) {
        let line = match &self.status {
            Some(status) => {
                let style = match status.level {
                    StatusLevel::Info => Style::default().fg(Color::Gray),
                    StatusLevel::Success => Style::default().fg(Color::Green),
                    StatusLevel::Error => Style::default().fg(Color::Red),
                };
                Line::styled(status.text.clone(), style)
            }
            None => Line::styled(
                format!(
                    "{} selections · press {} for commands",
                    self.selections.len(),
                    self.config.keybindings.menu
                ),
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_prompt(&self, frame: &mut Frame<'_>, area: Rect) {
        if !self.prompt.is_open() {
            return;
        }
        let width = area.width.saturating_sub(10).clamp(20, 40);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + area.height / 2,
            width,
            height: 3,
        };
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title("Start Number")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        let input = Paragraph::new(self.prompt.input()).style(Style::default().fg(Color::White));
        frame.render_widget(input, inner);
    }
}

fn binding_char(binding: &str) -> Option<char> {
    match binding {
        "space" => Some(' '),
        _ => {
            let mut chars = binding.chars();
            let ch = chars.next()?;
            chars.next().is_none().then_some(ch)
        }
    }
}

/// Input overlay for the start-number prompt, prefilled with `1`.
#[derive(Debug, Default)]
struct PromptState {
    pending: Option<Command>,
    input: String,
}

impl PromptState {
    fn open(&mut self, command: Command) {
        self.pending = Some(command);
        self.input = "1".to_string();
    }

    fn cancel(&mut self) {
        self.pending = None;
        self.input.clear();
    }

    fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    fn input(&self) -> &str {
        &self.input
    }

    fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    fn pop_char(&mut self) {
        self.input.pop();
    }

    fn take(&mut self) -> Option<(Command, String)> {
        let command = self.pending.take()?;
        Some((command, std::mem::take(&mut self.input)))
    }
}

#[derive(Debug)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: Instant::now() + Duration::from_secs(4),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusLevel {
    Info,
    Success,
    Error,
}
