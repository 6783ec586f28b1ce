//! Profile tab widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::entities::Account;
use crate::presentation::theme::Theme;

/// Menu entries below the profile card. Logout is appended separately.
pub const MENU_ITEMS: [&str; 5] = ["我的收藏", "联系客服", "帮助中心", "设置", "会员"];
const LOGOUT_LABEL: &str = "退出登录";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileMenuAction {
    /// A plain menu entry was activated.
    Selected(&'static str),
    /// The logout entry was activated.
    Logout,
}

#[derive(Debug, Default)]
pub struct ProfileMenuState {
    selected: usize,
}

impl ProfileMenuState {
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: 0 }
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(MENU_ITEMS.len());
    }

    pub const fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Resolves the highlighted entry into an action.
    #[must_use]
    pub const fn activate(&self) -> ProfileMenuAction {
        if self.selected == MENU_ITEMS.len() {
            ProfileMenuAction::Logout
        } else {
            ProfileMenuAction::Selected(MENU_ITEMS[self.selected])
        }
    }
}

pub struct ProfileMenu {
    theme: Theme,
}

impl ProfileMenu {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(
        &self,
        account: &Account,
        state: &ProfileMenuState,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let [card_area, _, menu_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        self.render_card(account, card_area, buf);
        self.render_menu(state, menu_area, buf);
    }

    fn render_card(&self, account: &Account, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        let name = Line::from(Span::styled(
            account.nickname().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        let handle = Line::from(Span::styled(
            format!("@{}", account.username()),
            self.theme.dimmed_style,
        ));
        Paragraph::new(vec![name, handle]).render(inner, buf);
    }

    fn render_menu(&self, state: &ProfileMenuState, area: Rect, buf: &mut Buffer) {
        let entries = MENU_ITEMS
            .iter()
            .copied()
            .chain(std::iter::once(LOGOUT_LABEL));

        for (i, label) in entries.enumerate() {
            if i >= area.height as usize {
                break;
            }
            let y = area.y + u16::try_from(i).unwrap_or(0);
            let mut style = if i == state.selected() {
                self.theme.selection_style
            } else {
                Style::default()
            };
            if label == LOGOUT_LABEL {
                style = style.fg(Color::Red);
            }
            Paragraph::new(Span::styled(format!("  {label}"), style))
                .style(style)
                .render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_and_activation() {
        let mut state = ProfileMenuState::new();
        assert_eq!(state.activate(), ProfileMenuAction::Selected("我的收藏"));

        for _ in 0..10 {
            state.select_next();
        }
        assert_eq!(state.selected(), MENU_ITEMS.len());
        assert_eq!(state.activate(), ProfileMenuAction::Logout);

        state.select_previous();
        assert_eq!(state.activate(), ProfileMenuAction::Selected("会员"));
    }
}
