//! Bottom tab bar of the shell screen.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
};

use crate::presentation::theme::Theme;

/// The three tabs of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellTab {
    /// Chat list.
    #[default]
    Chats,
    /// Contact directory.
    Contacts,
    /// Profile menu.
    Profile,
}

impl ShellTab {
    /// All tabs in bar order.
    pub const ALL: [Self; 3] = [Self::Chats, Self::Contacts, Self::Profile];

    /// Returns the bar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chats => "● Chats",
            Self::Contacts => "☰ Contacts",
            Self::Profile => "◉ Profile",
        }
    }

    /// Returns the next tab, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Chats => Self::Contacts,
            Self::Contacts => Self::Profile,
            Self::Profile => Self::Chats,
        }
    }

    /// Returns the previous tab, wrapping.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Chats => Self::Profile,
            Self::Contacts => Self::Chats,
            Self::Profile => Self::Contacts,
        }
    }
}

pub struct TabBar {
    theme: Theme,
    active: ShellTab,
}

impl TabBar {
    #[must_use]
    pub const fn new(theme: Theme, active: ShellTab) -> Self {
        Self { theme, active }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let segments = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

        for (tab, segment) in ShellTab::ALL.into_iter().zip(segments.iter()) {
            let style = if tab == self.active {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                self.theme.dimmed_style
            };
            Paragraph::new(Span::styled(tab.label(), style))
                .alignment(Alignment::Center)
                .render(*segment, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(ShellTab::Chats.next(), ShellTab::Contacts);
        assert_eq!(ShellTab::Profile.next(), ShellTab::Chats);
        assert_eq!(ShellTab::Chats.previous(), ShellTab::Profile);

        let mut tab = ShellTab::default();
        for _ in 0..3 {
            tab = tab.next();
        }
        assert_eq!(tab, ShellTab::Chats);
    }
}
