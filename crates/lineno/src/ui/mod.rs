//! Terminal UI: event loop and quick-pick menu.

pub mod app;
pub mod menu;
