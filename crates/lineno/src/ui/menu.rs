//! Hierarchical quick-pick menu over the command registry.
//!
//! The menu is a static tree of labeled nodes walked iteratively with a path
//! stack; every leaf names a [`Command`]. Nothing here executes anything.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

use crate::app::command::Command;
use crate::app::copy::{CopyFormat, Header};
use crate::app::transform::InsertFormat;

/// A menu entry: either a submenu or a runnable command.
#[derive(Debug, Clone, Copy)]
pub enum MenuNode {
    Submenu {
        label: &'static str,
        children: &'static [MenuNode],
    },
    Action {
        label: &'static str,
        command: Command,
    },
}

impl MenuNode {
    fn label(&self) -> &'static str {
        match self {
            MenuNode::Submenu { label, .. } | MenuNode::Action { label, .. } => label,
        }
    }
}

const fn copy_menu(header: Header) -> [MenuNode; 4] {
    [
        MenuNode::Action {
            label: "No Format",
            command: Command::CopyWithNumbers {
                header,
                format: CopyFormat::NoFormat,
            },
        },
        MenuNode::Action {
            label: "Delete Indent",
            command: Command::CopyWithNumbers {
                header,
                format: CopyFormat::DeleteIndent,
            },
        },
        MenuNode::Action {
            label: "Delete Blank Line",
            command: Command::CopyWithNumbers {
                header,
                format: CopyFormat::DeleteBlankLine,
            },
        },
        MenuNode::Action {
            label: "Delete Indent + Blank Line",
            command: Command::CopyWithNumbers {
                header,
                format: CopyFormat::DeleteIndentBlankLine,
            },
        },
    ]
}

static COPY_NO_HEADER: [MenuNode; 4] = copy_menu(Header::None);
static COPY_FILENAME: [MenuNode; 4] = copy_menu(Header::FileName);
static COPY_FULL_PATH: [MenuNode; 4] = copy_menu(Header::FullPath);
static COPY_RELATIVE_PATH: [MenuNode; 4] = copy_menu(Header::RelativePath);

static INSERT_FILE: [MenuNode; 2] = [
    MenuNode::Action {
        label: "No Format",
        command: Command::InsertFileNumbers(InsertFormat::NoFormat),
    },
    MenuNode::Action {
        label: "Delete Indent",
        command: Command::InsertFileNumbers(InsertFormat::DeleteIndent),
    },
];

static INSERT_INPUT: [MenuNode; 2] = [
    MenuNode::Action {
        label: "No Format",
        command: Command::InsertInputNumbers(InsertFormat::NoFormat),
    },
    MenuNode::Action {
        label: "Delete Indent",
        command: Command::InsertInputNumbers(InsertFormat::DeleteIndent),
    },
];

static EDIT_NUMBER_TEXT: [MenuNode; 2] = [
    MenuNode::Action {
        label: "Delete Blank Line",
        command: Command::DeleteBlankLines,
    },
    MenuNode::Action {
        label: "Delete Indent",
        command: Command::DeleteIndent,
    },
];

static EDIT: [MenuNode; 4] = [
    MenuNode::Submenu {
        label: "Insert File Line Number",
        children: &INSERT_FILE,
    },
    MenuNode::Submenu {
        label: "Insert Input Start Number",
        children: &INSERT_INPUT,
    },
    MenuNode::Action {
        label: "Delete Line Number",
        command: Command::DeleteLineNumbers,
    },
    MenuNode::Submenu {
        label: "Edit Line Number Text",
        children: &EDIT_NUMBER_TEXT,
    },
];

static COPY: [MenuNode; 4] = [
    MenuNode::Submenu {
        label: "Copy No Header",
        children: &COPY_NO_HEADER,
    },
    MenuNode::Submenu {
        label: "Copy Header FileName",
        children: &COPY_FILENAME,
    },
    MenuNode::Submenu {
        label: "Copy Header FullPath",
        children: &COPY_FULL_PATH,
    },
    MenuNode::Submenu {
        label: "Copy Header RelativePath",
        children: &COPY_RELATIVE_PATH,
    },
];

/// The root of the quick-pick tree.
pub static MENU: [MenuNode; 3] = [
    MenuNode::Submenu {
        label: "Edit",
        children: &EDIT,
    },
    MenuNode::Submenu {
        label: "Copy With LineNumber",
        children: &COPY,
    },
    MenuNode::Action {
        label: "Copy Delete Line Number",
        command: Command::CopyDeleteNumbers,
    },
];

/// Navigation state: the path of submenu indices from the root plus a cursor
/// within the current level.
#[derive(Debug, Default)]
pub struct MenuState {
    open: bool,
    path: Vec<usize>,
    cursor: usize,
}

impl MenuState {
    pub fn open(&mut self) {
        self.open = true;
        self.path.clear();
        self.cursor = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Entries of the level the path currently points at.
    pub fn items(&self) -> &'static [MenuNode] {
        let mut items: &'static [MenuNode] = &MENU;
        for &index in &self.path {
            match items.get(index) {
                Some(MenuNode::Submenu { children, .. }) => items = children,
                _ => break,
            }
        }
        items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.items().len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor as isize + delta;
        self.cursor = cursor.rem_euclid(len as isize) as usize;
    }

    /// Enter the highlighted entry: descend into a submenu, or yield the
    /// command of a leaf.
    pub fn descend(&mut self) -> Option<Command> {
        match self.items().get(self.cursor) {
            Some(MenuNode::Submenu { .. }) => {
                self.path.push(self.cursor);
                self.cursor = 0;
                None
            }
            Some(MenuNode::Action { command, .. }) => Some(*command),
            None => None,
        }
    }

    /// Step back one level. `false` when already at the root.
    pub fn ascend(&mut self) -> bool {
        match self.path.pop() {
            Some(previous) => {
                self.cursor = previous;
                true
            }
            None => false,
        }
    }

    /// Title trail of the current level, `Line Number | Edit | ...`.
    pub fn breadcrumb(&self) -> String {
        let mut trail = String::from("Line Number");
        let mut items: &'static [MenuNode] = &MENU;
        for &index in &self.path {
            if let Some(node) = items.get(index) {
                trail.push_str(" | ");
                trail.push_str(node.label());
                if let MenuNode::Submenu { children, .. } = node {
                    items = children;
                }
            }
        }
        trail
    }
}

/// Visual component rendering the menu overlay.
#[derive(Debug, Default)]
pub struct Menu;

impl Menu {
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &MenuState, submenu_mark: &str) {
        if !state.is_open() {
            return;
        }

        let items = state.items();
        let width = area.width.saturating_sub(8).clamp(24, 60);
        let height = (items.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(state.breadcrumb())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let rows: Vec<ListItem> = items
            .iter()
            .map(|node| {
                let mut spans = vec![Span::raw(node.label())];
                if matches!(node, MenuNode::Submenu { .. }) {
                    spans.push(Span::styled(
                        format!("  {submenu_mark}"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(rows)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(Some(state.cursor()));
        frame.render_stateful_widget(list, popup, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_leaf_resolves_through_the_registry() {
        fn walk(nodes: &[MenuNode], leaves: &mut Vec<Command>) {
            for node in nodes {
                match node {
                    MenuNode::Submenu { children, .. } => walk(children, leaves),
                    MenuNode::Action { command, .. } => leaves.push(*command),
                }
            }
        }
        let mut leaves = Vec::new();
        walk(&MENU, &mut leaves);
        // Seven edit commands, sixteen copy combinations, one strip-copy.
        assert_eq!(leaves.len(), 24);
        for command in leaves {
            assert_eq!(Command::from_id(&command.id()).unwrap(), command);
        }
    }

    #[test]
    fn descend_and_ascend_walk_the_tree() {
        let mut state = MenuState::default();
        state.open();
        assert!(state.descend().is_none());
        assert_eq!(state.breadcrumb(), "Line Number | Edit");

        // "Delete Line Number" is the third entry of the Edit level.
        state.move_cursor(2);
        let command = state.descend().unwrap();
        assert_eq!(command, Command::DeleteLineNumbers);

        assert!(state.ascend());
        assert_eq!(state.breadcrumb(), "Line Number");
        assert!(!state.ascend());
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = MenuState::default();
        state.open();
        state.move_cursor(-1);
        assert_eq!(state.cursor(), MENU.len() - 1);
        state.move_cursor(1);
        assert_eq!(state.cursor(), 0);
    }
}
