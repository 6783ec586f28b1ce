//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::LoginRequest;
use crate::presentation::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginFocus {
    Username,
    Password,
    Agreement,
}

impl LoginFocus {
    const fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Agreement,
            Self::Agreement => Self::Username,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Username => Self::Agreement,
            Self::Password => Self::Username,
            Self::Agreement => Self::Password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
    SwitchToRegister,
}

/// Login screen UI.
pub struct LoginScreen {
    username_input: TextInput,
    password_input: TextInput,
    agreement_accepted: bool,
    focus: LoginFocus,
    state: LoginState,
    error_message: Option<String>,
}

impl LoginScreen {
    /// Creates new login screen.
    #[must_use]
    pub fn new() -> Self {
        let mut username_input =
            TextInput::new("Username").placeholder("Username or phone number");
        username_input.set_focused(true);
        let password_input = TextInput::new("Password").password().placeholder("Password");

        Self {
            username_input,
            password_input,
            agreement_accepted: false,
            focus: LoginFocus::Username,
            state: LoginState::Input,
            error_message: None,
        }
    }

    /// Returns current state.
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Builds the login request from the form.
    #[must_use]
    pub fn request(&self) -> LoginRequest {
        let request = LoginRequest::new(
            self.username_input.value().to_string(),
            self.password_input.value().to_string(),
        );
        if self.agreement_accepted {
            request.with_agreement()
        } else {
            request
        }
    }

    /// Sets error state with a message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
    }

    /// Resets to input state.
    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
    }

    fn set_focus(&mut self, focus: LoginFocus) {
        self.focus = focus;
        self.username_input
            .set_focused(focus == LoginFocus::Username);
        self.password_input
            .set_focused(focus == LoginFocus::Password);
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Error {
            self.reset();
        }

        match key.code {
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return LoginAction::SwitchToRegister;
            }
            KeyCode::F(2) => {
                self.password_input.toggle_reveal();
                return LoginAction::None;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.set_focus(self.focus.next());
                return LoginAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.set_focus(self.focus.previous());
                return LoginAction::None;
            }
            KeyCode::Enter => {
                if self.focus == LoginFocus::Agreement {
                    self.agreement_accepted = !self.agreement_accepted;
                    return LoginAction::None;
                }
                return LoginAction::Submit;
            }
            KeyCode::Char(' ') if self.focus == LoginFocus::Agreement => {
                self.agreement_accepted = !self.agreement_accepted;
                return LoginAction::None;
            }
            _ => {}
        }

        let input = match self.focus {
            LoginFocus::Username => &mut self.username_input,
            LoginFocus::Password => &mut self.password_input,
            LoginFocus::Agreement => return LoginAction::None,
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

        LoginAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(14),
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
            .title(" 唯会 · Login ");

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let areas = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<6>(inner);

        (&self.username_input).render(areas[0], buf);
        (&self.password_input).render(areas[1], buf);

        let checkbox = if self.agreement_accepted { "[x]" } else { "[ ]" };
        let agreement_style = if self.focus == LoginFocus::Agreement {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let agreement_line = Line::from(vec![
            Span::styled(checkbox, agreement_style),
            Span::raw(" I have read and accept the privacy policy and service agreement"),
        ]);
        Paragraph::new(agreement_line).render(areas[3], buf);

        let status = match self.state {
            LoginState::Input => Line::from(vec![
                Span::styled("Enter: Login", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Ctrl+R: Register", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("F2: Show Password", Style::default().fg(Color::DarkGray)),
            ]),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Unknown error");
                Line::from(Span::styled(
                    format!("Error: {msg}"),
                    Style::default().fg(Color::Red),
                ))
            }
        };
        Paragraph::new(status).render(areas[5], buf);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}
