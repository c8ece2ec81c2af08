// TUI widget modules for each panel.

pub mod auto_panel;
pub mod board;
pub mod help_bar;
pub mod selectors;
pub mod status_bar;
