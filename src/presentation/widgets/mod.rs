//! Reusable UI widgets.

mod action_panel;
mod chat_list;
mod composer;
mod contact_list;
mod profile_menu;
mod tab_bar;
mod text_input;
mod timeline_pane;

pub use action_panel::{ActionPanel, ActionPanelResult, ActionPanelState, PANEL_ACTIONS};
pub use chat_list::{ChatList, ChatListState};
pub use composer::{Composer, ComposerAction, ComposerState};
pub use contact_list::{ContactList, ContactListState};
pub use profile_menu::{MENU_ITEMS, ProfileMenu, ProfileMenuAction, ProfileMenuState};
pub use tab_bar::{ShellTab, TabBar};
pub use text_input::TextInput;
pub use timeline_pane::{EmptyTimeline, TimelinePane, TimelinePaneState};
