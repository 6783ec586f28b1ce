//! Presentation layer: screens, widgets, theme and key handling.

/// Command registry mapping keys to actions.
#[allow(missing_docs)]
pub mod commands;
/// Event handling helpers.
pub mod events;
/// Color theme.
pub mod theme;
/// Screens and the application orchestrator.
pub mod ui;
/// Reusable UI widgets.
#[allow(missing_docs)]
pub mod widgets;

pub use ui::App;
