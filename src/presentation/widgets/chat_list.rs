//! Chat list widget for the chats tab.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::entities::ChatSummary;
use crate::presentation::theme::Theme;

// Two text rows plus a spacing row per card.
const ROWS_PER_CARD: usize = 3;

#[derive(Debug, Default)]
pub struct ChatListState {
    selected: usize,
    offset: usize,
}

impl ChatListState {
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

    /// Clamps the selection after the filter shrank the list.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }
}

pub struct ChatList<'a> {
    theme: Theme,
    timestamp_format: &'a str,
}

impl<'a> ChatList<'a> {
    #[must_use]
    pub const fn new(theme: Theme, timestamp_format: &'a str) -> Self {
        Self {
            theme,
            timestamp_format,
        }
    }

    pub fn render(
        &self,
        chats: &[&ChatSummary],
        state: &mut ChatListState,
        area: Rect,
        buf: &mut Buffer,
    ) {
        if area.height == 0 {
            return;
        }
        if chats.is_empty() {
            Paragraph::new("No chats found")
                .style(self.theme.dimmed_style)
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        state.clamp(chats.len());
        let visible = (area.height as usize / ROWS_PER_CARD).max(1);
        if state.selected < state.offset {
            state.offset = state.selected;
        } else if state.selected >= state.offset + visible {
            state.offset = state.selected + 1 - visible;
        }

        for (row, (i, chat)) in chats
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(visible)
            .enumerate()
        {
            let y = area.y + u16::try_from(row * ROWS_PER_CARD).unwrap_or(0);
            if y + 1 >= area.y + area.height {
                break;
            }
            let selected = i == state.selected;
            self.render_card(chat, selected, Rect::new(area.x, y, area.width, 2), buf);
        }
    }

    fn render_card(&self, chat: &ChatSummary, selected: bool, area: Rect, buf: &mut Buffer) {
        let base = if selected {
            self.theme.selection_style
        } else {
            Style::default()
        };

        let mut title_spans = vec![Span::styled(
            chat.name().to_string(),
            base.add_modifier(Modifier::BOLD),
        )];
        if chat.is_group() {
            title_spans.push(Span::styled(" [群]", self.theme.dimmed_style));
        }
        let title = Line::from(title_spans);
        let time = Line::from(Span::styled(
            chat.formatted_time(self.timestamp_format),
            self.theme.dimmed_style,
        ))
        .alignment(Alignment::Right);

        let top = Rect::new(area.x, area.y, area.width, 1);
        Paragraph::new(title).style(base).render(top, buf);
        Paragraph::new(time).render(top, buf);

        let preview = Line::from(Span::styled(
            chat.last_message().to_string(),
            self.theme.dimmed_style,
        ));
        let bottom = Rect::new(area.x, area.y + 1, area.width, 1);
        Paragraph::new(preview).style(base).render(bottom, buf);

        if chat.has_unread() {
            let badge = Line::from(Span::styled(
                format!(" {} ", chat.unread_count()),
                self.theme.badge_style,
            ))
            .alignment(Alignment::Right);
            Paragraph::new(badge).render(bottom, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        let mut state = ChatListState::new();

        state.select_previous();
        assert_eq!(state.selected(), 0);

        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected(), 2);
    }

    #[test]
    fn test_clamp_after_filter() {
        let mut state = ChatListState::new();
        state.select_next(6);
        state.select_next(6);
        state.select_next(6);
        assert_eq!(state.selected(), 3);

        state.clamp(2);
        assert_eq!(state.selected(), 1);

        state.clamp(0);
        assert_eq!(state.selected(), 0);
    }
}
