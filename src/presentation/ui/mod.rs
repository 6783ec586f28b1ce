//! Screens and the application orchestrator.

mod app;
mod chat_screen;
mod login_screen;
mod register_screen;
mod shell_screen;

pub use app::App;
pub use chat_screen::{ChatScreenAction, ChatScreenState};
pub use login_screen::{LoginAction, LoginScreen, LoginState};
pub use register_screen::{RegisterAction, RegisterScreen, RegisterState};
pub use shell_screen::{ShellAction, ShellScreenState};
