//! Contact list widget for the contacts tab.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::entities::{Contact, index_rail};
use crate::presentation::theme::Theme;

const QUICK_ACTIONS: [&str; 3] = ["新的朋友", "仅人群聊", "我的好友"];
const RAIL_WIDTH: u16 = 2;

#[derive(Debug, Default)]
pub struct ContactListState {
    selected: usize,
    offset: usize,
}

impl ContactListState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: 0,
            offset: 0,
        }
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub const fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }
}

pub struct ContactList {
    theme: Theme,
}

impl ContactList {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(
        &self,
        contacts: &[&Contact],
        state: &mut ContactListState,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let [actions_area, header_area, list_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        self.render_quick_actions(actions_area, buf);

        Paragraph::new(Span::styled("通讯", self.theme.dimmed_style)).render(header_area, buf);

        let [rows_area, rail_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(RAIL_WIDTH)])
                .areas(list_area);

        self.render_rows(contacts, state, rows_area, buf);
        self.render_rail(rail_area, buf);
    }

    fn render_quick_actions(&self, area: Rect, buf: &mut Buffer) {
        let segments =
            Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(Rect::new(
                area.x,
                area.y,
                area.width,
                1,
            ));
        for (label, segment) in QUICK_ACTIONS.iter().zip(segments.iter()) {
            Paragraph::new(Span::styled(
                *label,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(*segment, buf);
        }
    }

    fn render_rows(
        &self,
        contacts: &[&Contact],
        state: &mut ContactListState,
        area: Rect,
        buf: &mut Buffer,
    ) {
        if contacts.is_empty() {
            Paragraph::new("No contacts found")
                .style(self.theme.dimmed_style)
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        state.clamp(contacts.len());
        let visible = area.height as usize;
        if state.selected < state.offset {
            state.offset = state.selected;
        } else if state.selected >= state.offset + visible {
            state.offset = state.selected + 1 - visible;
        }

        for (row, (i, contact)) in contacts
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(visible)
            .enumerate()
        {
            let y = area.y + u16::try_from(row).unwrap_or(0);
            let style = if i == state.selected {
                self.theme.selection_style
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(format!("{} ", contact.index_letter()), self.theme.dimmed_style),
                Span::styled(contact.name().to_string(), style),
            ]);
            Paragraph::new(line)
                .style(style)
                .render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }

    fn render_rail(&self, area: Rect, buf: &mut Buffer) {
        // The rail is taller than most terminals; render every letter that
        // fits and let the tail fall off, mirroring the mobile affordance.
        for (i, letter) in index_rail().enumerate() {
            if i >= area.height as usize {
                break;
            }
            let y = area.y + u16::try_from(i).unwrap_or(0);
            Paragraph::new(Span::styled(letter.to_string(), self.theme.dimmed_style))
                .render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}
