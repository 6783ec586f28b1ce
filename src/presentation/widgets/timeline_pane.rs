//! Timeline pane widget for the conversation screen.
//!
//! Renders entries in their stored newest-first order, anchored to the
//! bottom of the viewport like an inverted mobile chat list: index 0 ends
//! up directly above the composer. Incoming messages sit left, outgoing
//! right, dividers centered.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::domain::entities::{ChatEntry, MessageEntry};
use crate::presentation::theme::Theme;

const SCROLL_AMOUNT: usize = 3;

// Bubble text occupies at most this share of the pane width.
const BUBBLE_WIDTH_PERCENT: u16 = 70;

pub struct TimelinePaneState {
    scroll_from_bottom: usize,
    content_rows: usize,
    viewport_rows: usize,
}

impl TimelinePaneState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scroll_from_bottom: 0,
            content_rows: 0,
            viewport_rows: 0,
        }
    }

    /// Scrolls toward older entries.
    pub fn scroll_up(&mut self) {
        let max = self.content_rows.saturating_sub(self.viewport_rows);
        self.scroll_from_bottom = (self.scroll_from_bottom + SCROLL_AMOUNT).min(max);
    }

    /// Scrolls toward the newest entry.
    pub const fn scroll_down(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(SCROLL_AMOUNT);
    }

    /// Snaps back to the newest entry.
    pub const fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    #[must_use]
    pub const fn is_at_bottom(&self) -> bool {
        self.scroll_from_bottom == 0
    }
}

impl Default for TimelinePaneState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TimelinePane {
    theme: Theme,
}

impl TimelinePane {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(
        &self,
        entries: &[ChatEntry],
        state: &mut TimelinePaneState,
        area: Rect,
        buf: &mut Buffer,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bubble_width =
            (usize::from(area.width) * usize::from(BUBBLE_WIDTH_PERCENT) / 100).max(1);

        // Display order is oldest at the top, so walk the stored
        // newest-first list in reverse while building rows.
        let mut rows: Vec<Line<'static>> = Vec::new();
        for entry in entries.iter().rev() {
            match entry {
                ChatEntry::Divider(divider) => {
                    rows.push(
                        Line::from(Span::styled(
                            format!(" {} ", divider.label()),
                            self.theme.dimmed_style,
                        ))
                        .alignment(Alignment::Center),
                    );
                }
                ChatEntry::Message(message) => {
                    self.push_message_rows(&mut rows, message, bubble_width);
                }
            }
            rows.push(Line::default());
        }
        // Drop the trailing spacer so the newest entry hugs the composer.
        rows.pop();

        state.content_rows = rows.len();
        state.viewport_rows = area.height as usize;
        let max_scroll = rows.len().saturating_sub(area.height as usize);
        state.scroll_from_bottom = state.scroll_from_bottom.min(max_scroll);

        let end = rows.len() - state.scroll_from_bottom;
        let start = end.saturating_sub(area.height as usize);
        let window = &rows[start..end];

        // Bottom-anchor short conversations instead of top-filling.
        let offset_y = (area.height as usize).saturating_sub(window.len());
        for (i, line) in window.iter().enumerate() {
            let y = area.y + u16::try_from(offset_y + i).unwrap_or(0);
            let row = Rect::new(area.x, y, area.width, 1);
            Paragraph::new(line.clone()).render(row, buf);
        }
    }

    fn push_message_rows(
        &self,
        rows: &mut Vec<Line<'static>>,
        message: &MessageEntry,
        bubble_width: usize,
    ) {
        let (alignment, bubble_style) = if message.is_outgoing() {
            (Alignment::Right, self.theme.outgoing_style)
        } else {
            (Alignment::Left, self.theme.incoming_style)
        };

        if !message.is_outgoing() {
            rows.push(
                Line::from(Span::styled(
                    message.author_name().to_string(),
                    self.theme.dimmed_style,
                ))
                .alignment(alignment),
            );
        }

        for segment in wrap_width(message.text(), bubble_width) {
            rows.push(
                Line::from(Span::styled(format!(" {segment} "), bubble_style))
                    .alignment(alignment),
            );
        }
    }
}

// CJK-aware greedy wrap on display columns.
fn wrap_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for logical in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for ch in logical.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
        lines.push(current);
    }

    lines
}

/// Empty-state hint rendered when a conversation has no history.
pub struct EmptyTimeline {
    theme: Theme,
}

impl EmptyTimeline {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Widget for EmptyTimeline {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let hint = Paragraph::new("No messages yet")
            .style(self.theme.dimmed_style)
            .alignment(Alignment::Center);
        let y = area.y + area.height / 2;
        hint.render(Rect::new(area.x, y, area.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TimestampDivider;

    fn pane() -> TimelinePane {
        TimelinePane::new(Theme::default())
    }

    fn seed() -> Vec<ChatEntry> {
        vec![
            MessageEntry::new("3", "ok", true, "Me").into(),
            TimestampDivider::new("2", "12分钟前").into(),
            MessageEntry::new("1", "hello", false, "妈妈").into(),
        ]
    }

    fn rendered_rows(entries: &[ChatEntry], width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let mut state = TimelinePaneState::new();
        pane().render(entries, &mut state, area, &mut buf);

        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_wrap_width_cjk() {
        assert_eq!(wrap_width("记得早点回家", 8), vec!["记得早点", "回家"]);
        assert_eq!(wrap_width("ab", 8), vec!["ab"]);
        assert_eq!(wrap_width("a\nb", 8), vec!["a", "b"]);
    }

    #[test]
    fn test_alignment_of_rendered_bubbles() {
        let rows = rendered_rows(&seed(), 30, 10);

        let incoming_row = rows
            .iter()
            .find(|row| row.contains("hello"))
            .expect("incoming bubble rendered");
        assert!(incoming_row.trim_end().ends_with("hello"));
        assert!(incoming_row.starts_with(' '));

        let outgoing_row = rows
            .iter()
            .find(|row| row.contains("ok"))
            .expect("outgoing bubble rendered");
        assert!(outgoing_row.trim_end().ends_with("ok"));
        assert!(outgoing_row.len() - outgoing_row.trim_end().len() <= 1);
    }

    #[test]
    fn test_newest_entry_renders_lowest() {
        let rows = rendered_rows(&seed(), 30, 10);

        let hello_y = rows.iter().position(|r| r.contains("hello")).unwrap();
        let divider_y = rows.iter().position(|r| r.contains("12分钟前")).unwrap();
        let ok_y = rows.iter().position(|r| r.contains("ok")).unwrap();

        assert!(hello_y < divider_y);
        assert!(divider_y < ok_y);
        assert_eq!(ok_y, rows.len() - 1);
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        let mut state = TimelinePaneState::new();

        pane().render(&seed(), &mut state, area, &mut buf);
        for _ in 0..10 {
            state.scroll_up();
        }
        let mut buf = Buffer::empty(area);
        pane().render(&seed(), &mut state, area, &mut buf);

        assert!(state.scroll_from_bottom <= state.content_rows);

        state.scroll_to_bottom();
        assert!(state.is_at_bottom());
    }
}
