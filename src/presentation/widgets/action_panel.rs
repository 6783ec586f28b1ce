//! Attachment/action panel modal for the conversation screen.
//!
//! Visual affordance only: the original wires no behavior behind the
//! grid, so activating an entry simply closes the panel.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::presentation::theme::Theme;

/// Grid entries, as the original action sheet lists them.
pub const PANEL_ACTIONS: [&str; 7] = [
    "照片",
    "视频",
    "通话",
    "视频通话",
    "文件",
    "个人名片",
    "群名片",
];

const COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPanelResult {
    /// The panel stays open.
    Open,
    /// The panel was dismissed.
    Closed,
}

#[derive(Debug, Default)]
pub struct ActionPanelState {
    selected: usize,
}

impl ActionPanelState {
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: 0 }
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Handles a key while the panel is open.
    pub fn handle_key(&mut self, key: KeyEvent) -> ActionPanelResult {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => ActionPanelResult::Closed,
            KeyCode::Left => {
                self.selected = self.selected.saturating_sub(1);
                ActionPanelResult::Open
            }
            KeyCode::Right => {
                self.selected = (self.selected + 1).min(PANEL_ACTIONS.len() - 1);
                ActionPanelResult::Open
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(COLUMNS);
                ActionPanelResult::Open
            }
            KeyCode::Down => {
                self.selected = (self.selected + COLUMNS).min(PANEL_ACTIONS.len() - 1);
                ActionPanelResult::Open
            }
            _ => ActionPanelResult::Open,
        }
    }
}

pub struct ActionPanel {
    theme: Theme,
}

impl ActionPanel {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(&self, state: &ActionPanelState, area: Rect, buf: &mut Buffer) {
        let rows = PANEL_ACTIONS.len().div_ceil(COLUMNS);
        let height = u16::try_from(rows + 2).unwrap_or(u16::MAX);

        // Slide up from the bottom edge, over the composer.
        let panel = Rect::new(
            area.x,
            area.y + area.height.saturating_sub(height),
            area.width,
            height.min(area.height),
        );
        Clear.render(panel, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let row_areas = Layout::vertical(vec![Constraint::Length(1); rows]).split(inner);
        for (row_index, row_area) in row_areas.iter().enumerate() {
            let cells = Layout::horizontal(vec![Constraint::Ratio(1, 4); COLUMNS]).split(*row_area);
            for (col_index, cell) in cells.iter().enumerate() {
                let index = row_index * COLUMNS + col_index;
                let Some(label) = PANEL_ACTIONS.get(index) else {
                    break;
                };
                let style = if index == state.selected() {
                    self.theme.selection_style
                } else {
                    Style::default()
                };
                Paragraph::new(Span::styled(*label, style))
                    .alignment(Alignment::Center)
                    .render(*cell, buf);
            }
        }
    }
}
