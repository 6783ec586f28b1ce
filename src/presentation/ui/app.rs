//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, KeyEventKind,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info, warn};

use crate::application::use_cases::{LoginUseCase, RegisterUseCase};
use crate::domain::entities::{Account, ChatId};
use crate::domain::ports::{AuthPort, DirectoryPort};
use crate::infrastructure::AppConfig;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::events::is_quit_key;
use crate::presentation::theme::Theme;
use crate::presentation::ui::{
    ChatScreenAction, ChatScreenState, LoginAction, LoginScreen, RegisterAction, RegisterScreen,
    ShellAction, ShellScreenState,
};

enum Screen {
    Login(LoginScreen),
    Register(RegisterScreen),
    Shell(Box<ShellScreenState>),
    // The shell is parked while a conversation is open and restored on
    // exit; the conversation state itself is dropped, not kept.
    Chat {
        chat: Box<ChatScreenState>,
        shell: Box<ShellScreenState>,
    },
}

enum Transition {
    None,
    Quit,
    ToRegister,
    ToLogin,
    Logout,
    SubmitLogin,
    SubmitRegistration,
    OpenChat { id: ChatId, name: String },
    CloseChat,
}

pub struct App {
    screen: Screen,
    exiting: bool,
    login_use_case: LoginUseCase,
    register_use_case: RegisterUseCase,
    directory: Arc<dyn DirectoryPort>,
    registry: CommandRegistry,
    theme: Theme,
    timestamp_format: String,
    mouse: bool,
}

impl App {
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthPort>,
        directory: Arc<dyn DirectoryPort>,
        config: &AppConfig,
    ) -> Self {
        Self {
            screen: Screen::Login(LoginScreen::new()),
            exiting: false,
            login_use_case: LoginUseCase::new(auth_port.clone()),
            register_use_case: RegisterUseCase::new(auth_port),
            directory,
            registry: CommandRegistry::with_overrides(&config.keybindings),
            theme: Theme::new(&config.theme.accent_color),
            timestamp_format: config.ui.timestamp_format.clone(),
            mouse: config.mouse,
        }
    }

    /// Runs the application until the user quits.
    ///
    /// # Errors
    /// Returns error if the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        if self.mouse {
            execute!(std::io::stdout(), EnableMouseCapture)?;
        }

        let result = self.run_event_loop(terminal).await;

        if self.mouse && execute!(std::io::stdout(), DisableMouseCapture).is_err() {
            warn!("Failed to disable mouse capture");
        }

        info!("Application exiting normally");
        result
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            let Some(event) = terminal_events.next().await else {
                break;
            };

            match event? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    self.handle_key(key).await;
                }
                Event::Mouse(mouse) => self.handle_mouse(&mouse),
                _ => {}
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if is_quit_key(&key) {
            self.exiting = true;
            return;
        }

        // Screens report what should happen; transitions that replace
        // `self.screen` are applied after the borrow ends.
        let transition = match &mut self.screen {
            Screen::Login(login) => match login.handle_key(key) {
                LoginAction::Submit => Transition::SubmitLogin,
                LoginAction::SwitchToRegister => Transition::ToRegister,
                LoginAction::None => Transition::None,
            },
            Screen::Register(register) => match register.handle_key(key) {
                RegisterAction::Submit => Transition::SubmitRegistration,
                RegisterAction::SwitchToLogin => Transition::ToLogin,
                RegisterAction::None => Transition::None,
            },
            Screen::Shell(shell) => match shell.handle_key(key, &self.registry) {
                ShellAction::OpenChat { id, name } => Transition::OpenChat { id, name },
                ShellAction::Logout => Transition::Logout,
                ShellAction::Quit => Transition::Quit,
                ShellAction::None => Transition::None,
            },
            Screen::Chat { chat, .. } => match chat.handle_key(key, &self.registry) {
                ChatScreenAction::Exit => Transition::CloseChat,
                ChatScreenAction::Quit => Transition::Quit,
                ChatScreenAction::None => Transition::None,
            },
        };

        match transition {
            Transition::None => {}
            Transition::Quit => self.exiting = true,
            Transition::ToRegister => {
                self.screen = Screen::Register(RegisterScreen::new());
            }
            Transition::ToLogin => {
                self.screen = Screen::Login(LoginScreen::new());
            }
            Transition::Logout => {
                info!("Logged out");
                self.screen = Screen::Login(LoginScreen::new());
            }
            Transition::SubmitLogin => self.submit_login().await,
            Transition::SubmitRegistration => self.submit_registration().await,
            Transition::OpenChat { id, name } => self.open_chat(id, name).await,
            Transition::CloseChat => self.close_chat(),
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if let Screen::Chat { chat, .. } = &mut self.screen {
            match mouse.kind {
                MouseEventKind::ScrollUp => chat.scroll_timeline_up(),
                MouseEventKind::ScrollDown => chat.scroll_timeline_down(),
                _ => {}
            }
        }
    }

    async fn submit_login(&mut self) {
        let Screen::Login(login) = &self.screen else {
            return;
        };
        let request = login.request();

        match self.login_use_case.execute(request).await {
            Ok(account) => self.enter_shell(account).await,
            Err(e) => {
                if let Screen::Login(login) = &mut self.screen {
                    login.set_error(e.to_string());
                }
            }
        }
    }

    async fn submit_registration(&mut self) {
        let Screen::Register(register) = &self.screen else {
            return;
        };
        let request = register.request();

        match self.register_use_case.execute(request).await {
            Ok(account) => {
                // Land back on login, as the original flow does after its
                // success dialog.
                debug!(username = %account.username(), "Registration complete");
                self.screen = Screen::Login(LoginScreen::new());
            }
            Err(e) => {
                if let Screen::Register(register) = &mut self.screen {
                    register.set_error(e.to_string());
                }
            }
        }
    }

    async fn enter_shell(&mut self, account: Account) {
        let chats = self.directory.chats().await;
        let contacts = self.directory.contacts().await;
        self.screen = Screen::Shell(Box::new(ShellScreenState::new(
            account,
            chats,
            contacts,
            self.theme,
            self.timestamp_format.clone(),
        )));
    }

    async fn open_chat(&mut self, id: ChatId, name: String) {
        let seed = self.directory.conversation_seed(&id).await;

        let placeholder = Screen::Login(LoginScreen::new());
        let Screen::Shell(shell) = std::mem::replace(&mut self.screen, placeholder) else {
            return;
        };

        debug!(chat = %id, entries = seed.len(), "Opening conversation");
        let chat = Box::new(ChatScreenState::new(
            id,
            name,
            shell.account().nickname(),
            seed,
            self.theme,
        ));
        self.screen = Screen::Chat { chat, shell };
    }

    fn close_chat(&mut self) {
        let placeholder = Screen::Login(LoginScreen::new());
        if let Screen::Chat { shell, .. } = std::mem::replace(&mut self.screen, placeholder) {
            self.screen = Screen::Shell(shell);
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        match &mut self.screen {
            Screen::Login(login) => frame.render_widget(&*login, area),
            Screen::Register(register) => frame.render_widget(&*register, area),
            Screen::Shell(shell) => shell.render(&self.registry, area, frame.buffer_mut()),
            Screen::Chat { chat, .. } => chat.render(&self.registry, area, frame.buffer_mut()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{InMemoryAccounts, InMemoryDirectory};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(
            Arc::new(InMemoryAccounts::new()),
            Arc::new(InMemoryDirectory::new()),
            &AppConfig::default(),
        )
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await;
        }
    }

    async fn login_as_demo(app: &mut App) {
        type_str(app, "demo").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_str(app, "demo123").await;
        app.handle_key(key(KeyCode::Tab)).await;
        app.handle_key(key(KeyCode::Char(' '))).await;
        app.handle_key(key(KeyCode::BackTab)).await;
        app.handle_key(key(KeyCode::Enter)).await;
    }

    #[tokio::test]
    async fn test_login_flow_reaches_shell() {
        let mut app = app();
        assert!(matches!(app.screen, Screen::Login(_)));

        login_as_demo(&mut app).await;

        assert!(matches!(app.screen, Screen::Shell(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_stays_on_login() {
        let mut app = app();
        type_str(&mut app, "demo").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_str(&mut app, "wrong").await;
        app.handle_key(key(KeyCode::Tab)).await;
        app.handle_key(key(KeyCode::Char(' '))).await;
        app.handle_key(key(KeyCode::BackTab)).await;
        app.handle_key(key(KeyCode::Enter)).await;

        assert!(matches!(app.screen, Screen::Login(_)));
    }

    #[tokio::test]
    async fn test_open_chat_send_and_return() {
        let mut app = app();
        login_as_demo(&mut app).await;

        // Open the first chat and send a message.
        app.handle_key(key(KeyCode::Enter)).await;
        assert!(matches!(app.screen, Screen::Chat { .. }));

        type_str(&mut app, "在吗").await;
        app.handle_key(key(KeyCode::Enter)).await;
        if let Screen::Chat { chat, .. } = &app.screen {
            assert_eq!(chat.timeline().len(), 5);
            assert_eq!(
                chat.timeline().entries()[0].as_message().unwrap().text(),
                "在吗"
            );
        } else {
            panic!("expected chat screen");
        }

        // Esc leaves the conversation and discards its timeline.
        app.handle_key(key(KeyCode::Esc)).await;
        assert!(matches!(app.screen, Screen::Shell(_)));

        // Reopening seeds from the directory again: 4 entries, not 5.
        app.handle_key(key(KeyCode::Enter)).await;
        if let Screen::Chat { chat, .. } = &app.screen {
            assert_eq!(chat.timeline().len(), 4);
        } else {
            panic!("expected chat screen");
        }
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let mut app = app();
        login_as_demo(&mut app).await;

        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
            .await;

        assert!(matches!(app.screen, Screen::Login(_)));
    }

    #[tokio::test]
    async fn test_register_then_login_with_new_account() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
            .await;
        assert!(matches!(app.screen, Screen::Register(_)));

        type_str(&mut app, "小明").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_str(&mut app, "xiaoming").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_str(&mut app, "hunter2!").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_str(&mut app, "hunter2!").await;
        app.handle_key(key(KeyCode::Tab)).await;
        app.handle_key(key(KeyCode::Char(' '))).await;
        app.handle_key(key(KeyCode::BackTab)).await;
        app.handle_key(key(KeyCode::Enter)).await;
        assert!(matches!(app.screen, Screen::Login(_)));

        type_str(&mut app, "xiaoming").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_str(&mut app, "hunter2!").await;
        app.handle_key(key(KeyCode::Tab)).await;
        app.handle_key(key(KeyCode::Char(' '))).await;
        app.handle_key(key(KeyCode::BackTab)).await;
        app.handle_key(key(KeyCode::Enter)).await;
        assert!(matches!(app.screen, Screen::Shell(_)));
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await;
        assert!(app.exiting);
    }
}
