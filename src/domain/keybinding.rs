use serde::{Deserialize, Serialize};

/// An input-independent command a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Quit,
    Logout,

    // Navigation / Focus
    NextTab,
    PrevTab,
    NavigateUp,
    NavigateDown,
    Select,
    Cancel,
    FocusSearch,

    // Timeline
    ScrollUp,
    ScrollDown,

    // Composer
    SendMessage,
    OpenActionPanel,
    ClearInput,
}
