//! Terminal panel hosting the input surface.
//!
//! Queries run on their own tokio task so the render loop keeps drawing and
//! reading keys while a request is outstanding.

mod app;
mod keymap;
mod view;

pub use app::{App, QueryState, THINKING_MESSAGE};
pub use keymap::{is_submit_chord, map_key, KeyAction};
pub use view::PROMPT_LABEL;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, EventStream, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::SubmitQueryUseCase;
use crate::domain::Prompt;

type PanelTerminal = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(use_case: Arc<SubmitQueryUseCase>) -> Result<()> {
    let (mut terminal, enhanced_keys) = setup_terminal()?;
    let result = event_loop(&mut terminal, use_case).await;
    restore_terminal(&mut terminal, enhanced_keys)?;
    result
}

/// Returns the terminal and whether enhanced key reporting was switched on.
fn setup_terminal() -> Result<(PanelTerminal, bool)> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;

    // Shift+Enter only differs from Enter under enhanced key reporting.
    // Alt+Enter arrives as ESC CR everywhere and always submits.
    let enhanced_keys = match supports_keyboard_enhancement() {
        Ok(true) => execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )
        .map_err(|e| warn!("Failed to enable enhanced key reporting: {e}"))
        .is_ok(),
        Ok(false) => false,
        Err(e) => {
            debug!("Could not query keyboard enhancement support: {e}");
            false
        }
    };
    if !enhanced_keys {
        info!("Terminal cannot report Shift+Enter; submit with Alt+Enter");
    }

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok((terminal, enhanced_keys))
}

fn restore_terminal(terminal: &mut PanelTerminal, enhanced_keys: bool) -> Result<()> {
    if enhanced_keys {
        execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(terminal: &mut PanelTerminal, use_case: Arc<SubmitQueryUseCase>) -> Result<()> {
    let mut app = App::new();
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    info!("Panel ready");

    while !app.should_quit() {
        terminal.draw(|frame| view::render(frame, &app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => {
                    if let Some(prompt) = app.handle_event(event) {
                        spawn_query(Arc::clone(&use_case), prompt, tx.clone());
                    }
                }
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },
            Some(text) = rx.recv() => app.finish_query(text),
        }
    }

    Ok(())
}

fn spawn_query(use_case: Arc<SubmitQueryUseCase>, prompt: Prompt, tx: mpsc::UnboundedSender<String>) {
    tokio::spawn(async move {
        let text = use_case.execute(prompt).await;
        if tx.send(text).is_err() {
            debug!("Panel closed before the reply arrived");
        }
    });
}
