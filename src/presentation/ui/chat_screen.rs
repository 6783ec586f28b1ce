//! Conversation screen.
//!
//! Hosts the timeline controller for one open chat. The controller owns
//! ordering, id and draft semantics; this screen translates key events
//! into controller calls and re-renders from its state.

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracing::{debug, trace};

use crate::application::services::{ConversationTimeline, TimelineEvent};
use crate::domain::entities::{ChatEntry, ChatId};
use crate::domain::keybinding::Action;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ActionPanel, ActionPanelResult, ActionPanelState, Composer, ComposerAction, ComposerState,
    EmptyTimeline, TimelinePane, TimelinePaneState,
};

const COMPOSER_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatScreenAction {
    None,
    /// Leave the conversation; its timeline is discarded.
    Exit,
    /// Quit the application.
    Quit,
}

pub struct ChatScreenState {
    chat_id: ChatId,
    title: String,
    timeline: ConversationTimeline,
    composer: ComposerState<'static>,
    pane_state: TimelinePaneState,
    panel: Option<ActionPanelState>,
    theme: Theme,
}

impl ChatScreenState {
    /// Opens a conversation seeded with its prior history.
    #[must_use]
    pub fn new(
        chat_id: ChatId,
        title: impl Into<String>,
        author_name: impl Into<String>,
        seed: Vec<ChatEntry>,
        theme: Theme,
    ) -> Self {
        let mut timeline = ConversationTimeline::new(author_name);
        timeline.initialize(seed);

        let mut composer = ComposerState::new();
        composer.set_focused(true);

        let mut state = Self {
            chat_id,
            title: title.into(),
            timeline,
            composer,
            pane_state: TimelinePaneState::new(),
            panel: None,
            theme,
        };
        state.process_timeline_events();
        state
    }

    #[must_use]
    pub const fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    #[must_use]
    pub const fn timeline(&self) -> &ConversationTimeline {
        &self.timeline
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel.is_some()
    }

    /// Scrolls the timeline toward older entries (mouse wheel).
    pub fn scroll_timeline_up(&mut self) {
        self.pane_state.scroll_up();
    }

    /// Scrolls the timeline toward the newest entry (mouse wheel).
    pub const fn scroll_timeline_down(&mut self) {
        self.pane_state.scroll_down();
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent, registry: &CommandRegistry) -> ChatScreenAction {
        if let Some(panel) = &mut self.panel {
            if panel.handle_key(key) == ActionPanelResult::Closed {
                self.panel = None;
            }
            return ChatScreenAction::None;
        }

        match registry.find_action(key) {
            Some(Action::ScrollUp) => {
                self.pane_state.scroll_up();
                return ChatScreenAction::None;
            }
            Some(Action::ScrollDown) => {
                self.pane_state.scroll_down();
                return ChatScreenAction::None;
            }
            // Plain characters stay with the composer even if rebound.
            Some(Action::Quit)
                if !(matches!(key.code, crossterm::event::KeyCode::Char(_))
                    && key.modifiers.is_empty()) =>
            {
                return ChatScreenAction::Quit;
            }
            _ => {}
        }

        match self.composer.handle_key(key, registry) {
            Some(ComposerAction::DraftChanged(text)) => {
                self.timeline.update_draft(text);
            }
            Some(ComposerAction::Send) => {
                if let Some(id) = self.timeline.send() {
                    debug!(chat = %self.chat_id, entry = %id, "Message sent");
                    self.composer.clear();
                }
            }
            Some(ComposerAction::OpenActionPanel) => {
                self.panel = Some(ActionPanelState::new());
            }
            Some(ComposerAction::ExitInput) => {
                debug!(chat = %self.chat_id, "Leaving conversation");
                return ChatScreenAction::Exit;
            }
            None => {}
        }

        self.process_timeline_events();
        ChatScreenAction::None
    }

    fn process_timeline_events(&mut self) {
        for event in self.timeline.take_events() {
            trace!(chat = %self.chat_id, ?event, "Timeline event");
            if event == TimelineEvent::EntriesChanged {
                self.pane_state.scroll_to_bottom();
            }
        }
    }

    /// Renders the conversation into the buffer.
    pub fn render(&mut self, registry: &CommandRegistry, area: Rect, buf: &mut Buffer) {
        let [header_area, timeline_area, composer_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(COMPOSER_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(Span::styled(
            format!("与 {} 的聊天", self.title),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(header_area, buf);

        if self.timeline.is_empty() {
            EmptyTimeline::new(self.theme).render(timeline_area, buf);
        } else {
            TimelinePane::new(self.theme).render(
                self.timeline.entries(),
                &mut self.pane_state,
                timeline_area,
                buf,
            );
        }

        Composer::new(self.theme).render(
            &mut self.composer,
            self.timeline.affordance(),
            composer_area,
            buf,
        );

        self.render_footer(registry, footer_area, buf);

        if let Some(panel) = &self.panel {
            ActionPanel::new(self.theme).render(panel, area, buf);
        }
    }

    fn render_footer(&self, registry: &CommandRegistry, area: Rect, buf: &mut Buffer) {
        let mut hints = vec![
            "Enter: Send / Panel".to_string(),
            "Shift+Enter: Newline".to_string(),
            "PgUp/PgDn: Scroll".to_string(),
            "Esc: Back".to_string(),
        ];
        if let Some(label) = registry.label(Action::Quit) {
            hints.push(format!("{label}: Quit"));
        }
        Paragraph::new(Line::from(Span::styled(
            hints.join(" · "),
            self.theme.dimmed_style,
        )))
        .render(area, buf);
    }
}
