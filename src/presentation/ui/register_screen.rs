//! Registration screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::RegisterRequest;
use crate::presentation::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterState {
    Input,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegisterFocus {
    Nickname,
    Username,
    Password,
    Confirm,
    Agreement,
}

impl RegisterFocus {
    const fn next(self) -> Self {
        match self {
            Self::Nickname => Self::Username,
            Self::Username => Self::Password,
            Self::Password => Self::Confirm,
            Self::Confirm => Self::Agreement,
            Self::Agreement => Self::Nickname,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Nickname => Self::Agreement,
            Self::Username => Self::Nickname,
            Self::Password => Self::Username,
            Self::Confirm => Self::Password,
            Self::Agreement => Self::Confirm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAction {
    None,
    Submit,
    SwitchToLogin,
}

/// Registration screen UI.
pub struct RegisterScreen {
    nickname_input: TextInput,
    username_input: TextInput,
    password_input: TextInput,
    confirm_input: TextInput,
    agreement_accepted: bool,
    focus: RegisterFocus,
    state: RegisterState,
    error_message: Option<String>,
}

impl RegisterScreen {
    /// Creates new registration screen.
    #[must_use]
    pub fn new() -> Self {
        let mut nickname_input = TextInput::new("Nickname").placeholder("Nickname");
        nickname_input.set_focused(true);

        Self {
            nickname_input,
            username_input: TextInput::new("Username").placeholder("Username or phone number"),
            password_input: TextInput::new("Password").password().placeholder("Password"),
            confirm_input: TextInput::new("Confirm Password")
                .password()
                .placeholder("Repeat password"),
            agreement_accepted: false,
            focus: RegisterFocus::Nickname,
            state: RegisterState::Input,
            error_message: None,
        }
    }

    /// Returns current state.
    #[must_use]
    pub const fn state(&self) -> RegisterState {
        self.state
    }

    /// Builds the registration request from the form.
    #[must_use]
    pub fn request(&self) -> RegisterRequest {
        let request = RegisterRequest::new(
            self.nickname_input.value().to_string(),
            self.username_input.value().to_string(),
            self.password_input.value().to_string(),
            self.confirm_input.value().to_string(),
        );
        if self.agreement_accepted {
            request.with_agreement()
        } else {
            request
        }
    }

    /// Sets error state with a message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = RegisterState::Error;
        self.error_message = Some(message.into());
    }

    /// Resets to input state.
    pub fn reset(&mut self) {
        self.state = RegisterState::Input;
        self.error_message = None;
    }

    fn set_focus(&mut self, focus: RegisterFocus) {
        self.focus = focus;
        self.nickname_input
            .set_focused(focus == RegisterFocus::Nickname);
        self.username_input
            .set_focused(focus == RegisterFocus::Username);
        self.password_input
            .set_focused(focus == RegisterFocus::Password);
        self.confirm_input
            .set_focused(focus == RegisterFocus::Confirm);
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> RegisterAction {
        if self.state == RegisterState::Error {
            self.reset();
        }

        match key.code {
            KeyCode::Esc => return RegisterAction::SwitchToLogin,
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return RegisterAction::SwitchToLogin;
            }
            KeyCode::F(2) => {
                self.password_input.toggle_reveal();
                self.confirm_input.toggle_reveal();
                return RegisterAction::None;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.set_focus(self.focus.next());
                return RegisterAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.set_focus(self.focus.previous());
                return RegisterAction::None;
            }
            KeyCode::Enter => {
                if self.focus == RegisterFocus::Agreement {
                    self.agreement_accepted = !self.agreement_accepted;
                    return RegisterAction::None;
                }
                return RegisterAction::Submit;
            }
            KeyCode::Char(' ') if self.focus == RegisterFocus::Agreement => {
                self.agreement_accepted = !self.agreement_accepted;
                return RegisterAction::None;
            }
            _ => {}
        }

        let input = match self.focus {
            RegisterFocus::Nickname => &mut self.nickname_input,
            RegisterFocus::Username => &mut self.username_input,
            RegisterFocus::Password => &mut self.password_input,
            RegisterFocus::Confirm => &mut self.confirm_input,
            RegisterFocus::Agreement => return RegisterAction::None,
        };
        match key.code {
            KeyCode::Char(c) => input.input_char(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_start(),
            KeyCode::End => input.move_end(),
            _ => {}
        }

        RegisterAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(20),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 唯会 · Register ");

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let areas = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<8>(inner);

        (&self.nickname_input).render(areas[0], buf);
        (&self.username_input).render(areas[1], buf);
        (&self.password_input).render(areas[2], buf);
        (&self.confirm_input).render(areas[3], buf);

        let checkbox = if self.agreement_accepted { "[x]" } else { "[ ]" };
        let agreement_style = if self.focus == RegisterFocus::Agreement {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let agreement_line = Line::from(vec![
            Span::styled(checkbox, agreement_style),
            Span::raw(" I have read and accept the privacy policy and service agreement"),
        ]);
        Paragraph::new(agreement_line).render(areas[5], buf);

        let status = match self.state {
            RegisterState::Input => Line::from(vec![
                Span::styled("Enter: Register", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Esc: Back to Login", Style::default().fg(Color::DarkGray)),
            ]),
            RegisterState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Unknown error");
                Line::from(Span::styled(
                    format!("Error: {msg}"),
                    Style::default().fg(Color::Red),
                ))
            }
        };
        Paragraph::new(status).render(areas[7], buf);
    }
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &RegisterScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(screen: &mut RegisterScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_fill_form() {
        let mut screen = RegisterScreen::new();
        type_str(&mut screen, "小明");
        screen.handle_key(key(KeyCode::Tab));
        type_str(&mut screen, "xiaoming");
        screen.handle_key(key(KeyCode::Tab));
        type_str(&mut screen, "hunter2!");
        screen.handle_key(key(KeyCode::Tab));
        type_str(&mut screen, "hunter2!");
        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(key(KeyCode::Char(' ')));

        let request = screen.request();
        assert_eq!(request.nickname, "小明");
        assert_eq!(request.username, "xiaoming");
        assert_eq!(request.password, request.confirm_password);
        assert!(request.agreement_accepted);
    }

    #[test]
    fn test_submit_from_any_input_field() {
        let mut screen = RegisterScreen::new();
        type_str(&mut screen, "名");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), RegisterAction::Submit);
    }

    #[test]
    fn test_switch_to_login() {
        let mut screen = RegisterScreen::new();
        assert_eq!(
            screen.handle_key(key(KeyCode::Esc)),
            RegisterAction::SwitchToLogin
        );
    }

    #[test]
    fn test_error_resets_on_next_key() {
        let mut screen = RegisterScreen::new();
        screen.set_error("the two passwords do not match");
        assert_eq!(screen.state(), RegisterState::Error);

        screen.handle_key(key(KeyCode::Char('a')));
        assert_eq!(screen.state(), RegisterState::Input);
    }
}
