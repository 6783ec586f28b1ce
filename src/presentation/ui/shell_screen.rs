//! Tabbed shell screen: chats, contacts, profile.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
};
use tracing::debug;

use crate::application::services::SearchService;
use crate::domain::entities::{Account, ChatId, ChatSummary, Contact};
use crate::domain::keybinding::Action;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ChatList, ChatListState, ContactList, ContactListState, ProfileMenu, ProfileMenuAction,
    ProfileMenuState, ShellTab, TabBar, TextInput,
};

const SETTINGS_LABEL: &str = "设置";
const SETTINGS_STUB_TEXT: &str = "这是设置页面";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    None,
    /// Open the conversation screen for a chat.
    OpenChat {
        id: ChatId,
        name: String,
    },
    Logout,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellFocus {
    List,
    Search,
}

pub struct ShellScreenState {
    account: Account,
    chats: Vec<ChatSummary>,
    contacts: Vec<Contact>,
    tab: ShellTab,
    focus: ShellFocus,
    search_input: TextInput,
    search_service: SearchService,
    chat_list_state: ChatListState,
    contact_list_state: ContactListState,
    profile_state: ProfileMenuState,
    status: Option<String>,
    theme: Theme,
    timestamp_format: String,
}

impl ShellScreenState {
    #[must_use]
    pub fn new(
        account: Account,
        chats: Vec<ChatSummary>,
        contacts: Vec<Contact>,
        theme: Theme,
        timestamp_format: String,
    ) -> Self {
        Self {
            account,
            chats,
            contacts,
            tab: ShellTab::default(),
            focus: ShellFocus::List,
            search_input: TextInput::new("Search").placeholder("搜索"),
            search_service: SearchService::new(),
            chat_list_state: ChatListState::new(),
            contact_list_state: ContactListState::new(),
            profile_state: ProfileMenuState::new(),
            status: None,
            theme,
            timestamp_format,
        }
    }

    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    #[must_use]
    pub const fn active_tab(&self) -> ShellTab {
        self.tab
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        self.search_input.value()
    }

    fn filtered_chats(&self) -> Vec<&ChatSummary> {
        self.search_service
            .filter_chats(&self.chats, self.search_input.value())
    }

    fn filtered_contacts(&self) -> Vec<&Contact> {
        self.search_service
            .filter_contacts(&self.contacts, self.search_input.value())
    }

    fn switch_tab(&mut self, tab: ShellTab) {
        self.tab = tab;
        self.focus = ShellFocus::List;
        self.search_input.clear();
        self.search_input.set_focused(false);
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent, registry: &CommandRegistry) -> ShellAction {
        self.status = None;

        if self.focus == ShellFocus::Search {
            return self.handle_search_key(key);
        }

        match registry.find_action(key) {
            Some(Action::Quit) => return ShellAction::Quit,
            Some(Action::Logout) => return ShellAction::Logout,
            Some(Action::NextTab) => self.switch_tab(self.tab.next()),
            Some(Action::PrevTab) => self.switch_tab(self.tab.previous()),
            Some(Action::FocusSearch)
                if matches!(self.tab, ShellTab::Chats | ShellTab::Contacts) =>
            {
                self.focus = ShellFocus::Search;
                self.search_input.set_focused(true);
            }
            Some(Action::NavigateDown) => match self.tab {
                ShellTab::Chats => self.chat_list_state.select_next(self.filtered_chats().len()),
                ShellTab::Contacts => self
                    .contact_list_state
                    .select_next(self.filtered_contacts().len()),
                ShellTab::Profile => self.profile_state.select_next(),
            },
            Some(Action::NavigateUp) => match self.tab {
                ShellTab::Chats => self.chat_list_state.select_previous(),
                ShellTab::Contacts => self.contact_list_state.select_previous(),
                ShellTab::Profile => self.profile_state.select_previous(),
            },
            Some(Action::Select) => return self.activate_selection(),
            _ => {}
        }

        ShellAction::None
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> ShellAction {
        match key.code {
            KeyCode::Esc => {
                self.search_input.clear();
                self.focus = ShellFocus::List;
                self.search_input.set_focused(false);
            }
            KeyCode::Enter | KeyCode::Tab => {
                self.focus = ShellFocus::List;
                self.search_input.set_focused(false);
            }
            KeyCode::Char(c) => self.search_input.input_char(c),
            KeyCode::Backspace => self.search_input.backspace(),
            KeyCode::Delete => self.search_input.delete(),
            KeyCode::Left => self.search_input.move_left(),
            KeyCode::Right => self.search_input.move_right(),
            _ => {}
        }

        match self.tab {
            ShellTab::Chats => self.chat_list_state.clamp(self.filtered_chats().len()),
            ShellTab::Contacts => self
                .contact_list_state
                .clamp(self.filtered_contacts().len()),
            ShellTab::Profile => {}
        }

        ShellAction::None
    }

    fn activate_selection(&mut self) -> ShellAction {
        match self.tab {
            ShellTab::Chats => {
                let filtered = self.filtered_chats();
                filtered
                    .get(self.chat_list_state.selected())
                    .map_or(ShellAction::None, |chat| ShellAction::OpenChat {
                        id: chat.id().clone(),
                        name: chat.name().to_string(),
                    })
            }
            ShellTab::Contacts => {
                if let Some(contact) = self
                    .filtered_contacts()
                    .get(self.contact_list_state.selected())
                {
                    debug!(contact = %contact.name(), "Contact selected");
                }
                ShellAction::None
            }
            ShellTab::Profile => match self.profile_state.activate() {
                ProfileMenuAction::Logout => ShellAction::Logout,
                ProfileMenuAction::Selected(label) => {
                    debug!(entry = %label, "Profile menu entry selected");
                    self.status = Some(if label == SETTINGS_LABEL {
                        SETTINGS_STUB_TEXT.to_string()
                    } else {
                        format!("{label}：敬请期待")
                    });
                    ShellAction::None
                }
            },
        }
    }

    fn render_inner(&mut self, registry: &CommandRegistry, area: Rect, buf: &mut Buffer) {
        let [header_area, content_area, tab_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(header_area, buf);

        match self.tab {
            ShellTab::Chats => {
                let [search_area, list_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Fill(1)])
                        .areas(content_area);
                (&self.search_input).render(search_area, buf);
                let filtered = self
                    .search_service
                    .filter_chats(&self.chats, self.search_input.value());
                ChatList::new(self.theme, &self.timestamp_format).render(
                    &filtered,
                    &mut self.chat_list_state,
                    list_area,
                    buf,
                );
            }
            ShellTab::Contacts => {
                let [search_area, list_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Fill(1)])
                        .areas(content_area);
                (&self.search_input).render(search_area, buf);
                let filtered = self
                    .search_service
                    .filter_contacts(&self.contacts, self.search_input.value());
                ContactList::new(self.theme).render(
                    &filtered,
                    &mut self.contact_list_state,
                    list_area,
                    buf,
                );
            }
            ShellTab::Profile => {
                ProfileMenu::new(self.theme).render(
                    &self.account,
                    &self.profile_state,
                    content_area,
                    buf,
                );
            }
        }

        TabBar::new(self.theme, self.tab).render(tab_area, buf);
        self.render_footer(registry, footer_area, buf);
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            "唯会",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(area, buf);

        Paragraph::new(Span::styled(
            self.account.nickname().to_string(),
            self.theme.dimmed_style,
        ))
        .alignment(Alignment::Right)
        .render(area, buf);
    }

    fn render_footer(&self, registry: &CommandRegistry, area: Rect, buf: &mut Buffer) {
        if let Some(status) = &self.status {
            Paragraph::new(Span::styled(status.clone(), self.theme.dimmed_style))
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        let mut hints = vec!["Tab: Switch".to_string()];
        if matches!(self.tab, ShellTab::Chats | ShellTab::Contacts) {
            hints.push("/: Search".to_string());
        }
        if self.tab == ShellTab::Chats {
            hints.push("Enter: Open".to_string());
        }
        if let Some(label) = registry.label(Action::Logout) {
            hints.push(format!("{label}: Logout"));
        }
        if let Some(label) = registry.label(Action::Quit) {
            hints.push(format!("{label}: Quit"));
        }
        Paragraph::new(Span::styled(hints.join(" · "), self.theme.dimmed_style))
            .render(area, buf);
    }

    /// Renders the shell into the buffer.
    pub fn render(&mut self, registry: &CommandRegistry, area: Rect, buf: &mut Buffer) {
        self.render_inner(registry, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shell() -> ShellScreenState {
        let when = Utc.with_ymd_and_hms(2024, 5, 20, 14, 44, 0).unwrap();
        ShellScreenState::new(
            Account::new("Me", "demo"),
            vec![
                ChatSummary::new("1", "妈妈", "好的,去吧", when),
                ChatSummary::new("5", "Leo", "Noooooo", when),
            ],
            vec![Contact::new("c1", "妈妈"), Contact::new("c4", "Leo")],
            Theme::default(),
            "%-I:%M %p".to_string(),
        )
    }

    #[test]
    fn test_open_selected_chat() {
        let mut shell = shell();
        let registry = CommandRegistry::default();

        let action = shell.handle_key(key(KeyCode::Enter), &registry);

        assert_eq!(
            action,
            ShellAction::OpenChat {
                id: ChatId::from("1"),
                name: "妈妈".to_string(),
            }
        );
    }

    #[test]
    fn test_navigate_then_open() {
        let mut shell = shell();
        let registry = CommandRegistry::default();

        shell.handle_key(key(KeyCode::Down), &registry);
        let action = shell.handle_key(key(KeyCode::Enter), &registry);

        assert!(matches!(
            action,
            ShellAction::OpenChat { id, .. } if id == ChatId::from("5")
        ));
    }

    #[test]
    fn test_search_filters_chats() {
        let mut shell = shell();
        let registry = CommandRegistry::default();

        shell.handle_key(key(KeyCode::Char('/')), &registry);
        shell.handle_key(key(KeyCode::Char('L')), &registry);
        shell.handle_key(key(KeyCode::Char('e')), &registry);
        shell.handle_key(key(KeyCode::Char('o')), &registry);
        shell.handle_key(key(KeyCode::Enter), &registry);

        let action = shell.handle_key(key(KeyCode::Enter), &registry);
        assert!(matches!(
            action,
            ShellAction::OpenChat { id, .. } if id == ChatId::from("5")
        ));
    }

    #[test]
    fn test_tab_cycle_clears_search() {
        let mut shell = shell();
        let registry = CommandRegistry::default();

        shell.handle_key(key(KeyCode::Char('/')), &registry);
        shell.handle_key(key(KeyCode::Char('x')), &registry);
        shell.handle_key(key(KeyCode::Enter), &registry);
        shell.handle_key(key(KeyCode::Tab), &registry);

        assert_eq!(shell.active_tab(), ShellTab::Contacts);
        assert_eq!(shell.search_query(), "");
    }

    #[test]
    fn test_logout_from_profile_menu() {
        let mut shell = shell();
        let registry = CommandRegistry::default();

        shell.handle_key(key(KeyCode::Tab), &registry);
        shell.handle_key(key(KeyCode::Tab), &registry);
        assert_eq!(shell.active_tab(), ShellTab::Profile);

        for _ in 0..10 {
            shell.handle_key(key(KeyCode::Down), &registry);
        }
        let action = shell.handle_key(key(KeyCode::Enter), &registry);
        assert_eq!(action, ShellAction::Logout);
    }

    #[test]
    fn test_logout_binding() {
        let mut shell = shell();
        let registry = CommandRegistry::default();

        let action = shell.handle_key(
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            &registry,
        );
        assert_eq!(action, ShellAction::Logout);
    }
}
