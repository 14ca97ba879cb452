use crossterm::event::{Event, KeyEvent};
use tracing::debug;

use crate::domain::{InputEvent, InputSurface, Prompt, SurfaceOutcome};

use super::keymap::{map_key, KeyAction};

pub const THINKING_MESSAGE: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    InFlight,
}

/// State of the terminal panel: the prompt box, its cursor, and the last
/// thing shown in the response area.
pub struct App {
    surface: InputSurface,
    cursor: usize,
    response: String,
    state: QueryState,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            surface: InputSurface::new(),
            cursor: 0,
            response: String::new(),
            state: QueryState::Idle,
            should_quit: false,
        }
    }

    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the prompt to send when the event is a submission.
    pub fn handle_event(&mut self, event: Event) -> Option<Prompt> {
        match event {
            Event::Key(key) => self.handle_key(&key),
            Event::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.apply(InputEvent::Insert {
                    position: self.cursor,
                    text,
                });
                None
            }
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Prompt> {
        let len = self.surface.char_count();

        match map_key(key, self.cursor, len)? {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::CursorLeft => self.cursor = self.cursor.saturating_sub(1),
            KeyAction::CursorRight => self.cursor = (self.cursor + 1).min(len),
            KeyAction::CursorHome => self.cursor = 0,
            KeyAction::CursorEnd => self.cursor = len,
            KeyAction::Input(InputEvent::SubmitTriggered) => return self.submit(),
            KeyAction::Input(event) => self.apply(event),
        }

        None
    }

    /// Show the result of the query that was in flight.
    pub fn finish_query(&mut self, text: String) {
        self.state = QueryState::Idle;
        self.response = text;
    }

    fn submit(&mut self) -> Option<Prompt> {
        if self.state == QueryState::InFlight {
            debug!("Ignoring submission while a query is in flight");
            return None;
        }

        match self.surface.dispatch(InputEvent::SubmitTriggered) {
            SurfaceOutcome::Submitted(prompt) => {
                self.state = QueryState::InFlight;
                self.response = THINKING_MESSAGE.to_string();
                Some(prompt)
            }
            _ => None,
        }
    }

    fn apply(&mut self, event: InputEvent) {
        let cursor_after = match &event {
            InputEvent::Insert { position, text } | InputEvent::Replace { position, text, .. } => {
                position + text.chars().count()
            }
            InputEvent::Delete { position, .. } => *position,
            InputEvent::SubmitTriggered => self.cursor,
        };

        match self.surface.dispatch(event) {
            SurfaceOutcome::Applied => self.cursor = cursor_after,
            _ => debug!(
                "Edit rejected ({} characters remaining)",
                self.surface.remaining()
            ),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
