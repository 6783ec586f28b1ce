//! Composer bar widget for the conversation screen.
//!
//! Editing state lives in a [`TextArea`]; the semantic draft lives in the
//! timeline controller. Every edit surfaces as
//! [`ComposerAction::DraftChanged`] so the screen can forward the new text
//! to the controller, which stays the single source of truth for the
//! send/panel affordance.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthChar;

use crate::application::services::ComposerAffordance;
use crate::domain::keybinding::Action;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::theme::Theme;

const PLACEHOLDER_TEXT: &str = "Type a message...";
const AFFORDANCE_WIDTH: u16 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerAction {
    /// The edit buffer changed; the new full text is attached.
    DraftChanged(String),
    /// The send affordance was triggered with a usable draft.
    Send,
    /// The panel affordance was triggered with a blank draft.
    OpenActionPanel,
    /// Esc on an empty buffer: leave the composer.
    ExitInput,
}

pub struct ComposerState<'a> {
    textarea: TextArea<'a>,
    focused: bool,
    scroll_offset: usize,
}

impl ComposerState<'_> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            focused: false,
            scroll_offset: 0,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textarea.is_empty()
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    pub fn set_content(&mut self, content: &str) {
        self.clear();
        self.textarea.insert_str(content);
    }

    /// Handles a key event. Returns the action the screen should apply.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        registry: &CommandRegistry,
    ) -> Option<ComposerAction> {
        if (key.code == KeyCode::Enter && !key.modifiers.contains(KeyModifiers::SHIFT))
            || registry.find_action(key) == Some(Action::SendMessage)
        {
            // The bar exposes exactly one action: send when the draft is
            // usable, the panel when it is blank.
            return if self.value().trim().is_empty() {
                Some(ComposerAction::OpenActionPanel)
            } else {
                Some(ComposerAction::Send)
            };
        }

        match registry.find_action(key) {
            Some(Action::Cancel) => {
                if self.is_empty() {
                    return Some(ComposerAction::ExitInput);
                }
                self.clear();
                return Some(ComposerAction::DraftChanged(self.value()));
            }
            Some(Action::OpenActionPanel) => return Some(ComposerAction::OpenActionPanel),
            Some(Action::ClearInput) => {
                self.clear();
                return Some(ComposerAction::DraftChanged(self.value()));
            }
            _ => {}
        }

        let edited = match key.code {
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.textarea.insert_newline();
                true
            }
            KeyCode::Backspace => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    self.textarea.delete_word()
                } else {
                    self.textarea.delete_char()
                }
            }
            KeyCode::Delete => self.textarea.delete_next_char(),
            KeyCode::Left => {
                self.textarea.move_cursor(CursorMove::Back);
                false
            }
            KeyCode::Right => {
                self.textarea.move_cursor(CursorMove::Forward);
                false
            }
            KeyCode::Up => {
                self.textarea.move_cursor(CursorMove::Up);
                false
            }
            KeyCode::Down => {
                self.textarea.move_cursor(CursorMove::Down);
                false
            }
            KeyCode::Home => {
                self.textarea.move_cursor(CursorMove::Head);
                false
            }
            KeyCode::End => {
                self.textarea.move_cursor(CursorMove::End);
                false
            }
            _ => false,
        };

        edited.then(|| ComposerAction::DraftChanged(self.value()))
    }

    // Wraps logical lines to the viewport width, CJK-aware, and returns
    // the visual cursor position alongside.
    fn wrapped_lines(&self, width: usize) -> (Vec<String>, usize, usize) {
        let (cursor_row, cursor_col) = self.textarea.cursor();
        let mut visual = Vec::new();
        let mut v_cursor = (0, 0);

        for (row, line) in self.textarea.lines().iter().enumerate() {
            let mut current = String::new();
            let mut current_width = 0;

            for (col, ch) in line.chars().enumerate() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width {
                    visual.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                if row == cursor_row && col == cursor_col {
                    v_cursor = (visual.len(), current_width);
                }
                current.push(ch);
                current_width += ch_width;
            }

            if row == cursor_row && cursor_col == line.chars().count() {
                if current_width >= width && width > 0 {
                    visual.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                v_cursor = (visual.len(), current_width);
            }
            visual.push(current);
        }

        (visual, v_cursor.0, v_cursor.1)
    }

    fn render_text(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let width = area.width as usize;
        if width == 0 || area.height == 0 {
            return;
        }

        let (visual_lines, v_cursor_row, v_cursor_col) = self.wrapped_lines(width);
        let height = area.height as usize;

        if v_cursor_row >= self.scroll_offset + height {
            self.scroll_offset = v_cursor_row - height + 1;
        } else if v_cursor_row < self.scroll_offset {
            self.scroll_offset = v_cursor_row;
        }

        if self.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER_TEXT).style(theme.dimmed_style);
            placeholder.render(area, buf);
        } else {
            for (i, line) in visual_lines
                .iter()
                .enumerate()
                .skip(self.scroll_offset)
                .take(height)
            {
                let y = area.y + u16::try_from(i - self.scroll_offset).unwrap_or(0);
                let mut x = area.x;
                for ch in line.chars() {
                    let ch_width = u16::try_from(ch.width().unwrap_or(0)).unwrap_or(0);
                    if x + ch_width > area.x + area.width {
                        break;
                    }
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol(&ch.to_string());
                        cell.set_style(theme.base_style);
                    }
                    x += ch_width;
                }
            }
        }

        if self.focused && v_cursor_row >= self.scroll_offset {
            let y = area.y + u16::try_from(v_cursor_row - self.scroll_offset).unwrap_or(0);
            let x = area.x + u16::try_from(v_cursor_col).unwrap_or(0);
            if x < area.x + area.width
                && y < area.y + area.height
                && let Some(cell) = buf.cell_mut((x, y))
            {
                cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
                if cell.symbol().is_empty() {
                    cell.set_symbol(" ");
                }
            }
        }
    }
}

impl Default for ComposerState<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the composer bar: the edit field plus the single affordance
/// control the current draft exposes.
pub struct Composer {
    theme: Theme,
}

impl Composer {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(
        &self,
        state: &mut ComposerState<'_>,
        affordance: ComposerAffordance,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let border_style = if state.is_focused() {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [text_area, affordance_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(AFFORDANCE_WIDTH)])
                .areas(inner);

        state.render_text(text_area, buf, &self.theme);

        let label = match affordance {
            ComposerAffordance::Send => Line::from(Span::styled(
                "  Send ⏎  ",
                Style::default()
                    .bg(self.theme.accent)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )),
            ComposerAffordance::ActionPanel => Line::from(Span::styled(
                "  [+]  ",
                self.theme.dimmed_style,
            )),
        };
        Paragraph::new(label)
            .right_aligned()
            .render(affordance_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut ComposerState<'_>, registry: &CommandRegistry, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)), registry);
        }
    }

    #[test]
    fn test_typing_reports_draft_changes() {
        let mut state = ComposerState::new();
        let registry = CommandRegistry::default();

        let action = state.handle_key(key(KeyCode::Char('h')), &registry);
        assert_eq!(action, Some(ComposerAction::DraftChanged("h".to_string())));

        let action = state.handle_key(key(KeyCode::Char('i')), &registry);
        assert_eq!(action, Some(ComposerAction::DraftChanged("hi".to_string())));
    }

    #[test]
    fn test_enter_sends_when_draft_usable() {
        let mut state = ComposerState::new();
        let registry = CommandRegistry::default();
        type_str(&mut state, &registry, "在吗");

        let action = state.handle_key(key(KeyCode::Enter), &registry);
        assert_eq!(action, Some(ComposerAction::Send));
    }

    #[test]
    fn test_enter_opens_panel_when_blank() {
        let mut state = ComposerState::new();
        let registry = CommandRegistry::default();

        let action = state.handle_key(key(KeyCode::Enter), &registry);
        assert_eq!(action, Some(ComposerAction::OpenActionPanel));

        type_str(&mut state, &registry, "   ");
        let action = state.handle_key(key(KeyCode::Enter), &registry);
        assert_eq!(action, Some(ComposerAction::OpenActionPanel));
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut state = ComposerState::new();
        let registry = CommandRegistry::default();
        type_str(&mut state, &registry, "hello");

        let action = state.handle_key(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT),
            &registry,
        );
        assert_eq!(
            action,
            Some(ComposerAction::DraftChanged("hello\n".to_string()))
        );
    }

    #[test]
    fn test_esc_clears_then_exits() {
        let mut state = ComposerState::new();
        let registry = CommandRegistry::default();
        type_str(&mut state, &registry, "draft");

        let action = state.handle_key(key(KeyCode::Esc), &registry);
        assert_eq!(
            action,
            Some(ComposerAction::DraftChanged(String::new()))
        );

        let action = state.handle_key(key(KeyCode::Esc), &registry);
        assert_eq!(action, Some(ComposerAction::ExitInput));
    }

    #[test]
    fn test_cjk_wrap_positions() {
        let mut state = ComposerState::new();
        state.set_content("记得早点回家");

        // Each CJK glyph is two columns wide; a width of 8 fits four.
        let (lines, _, _) = state.wrapped_lines(8);
        assert_eq!(lines, vec!["记得早点", "回家"]);
    }
}
