//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values. This is the only
//! module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw:
//!
//! - **Waiting on the backend** (initializing or processing): draws every
//!   ~80ms to animate the indicator.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! Background work never blocks the loop: effects returned by `update()` are
//! executed as spawned tasks that report back through an action channel.

mod component;
mod components;
mod event;
pub mod render;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::Backend;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{Session, SessionState};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig, backend: Arc<dyn Backend>) -> std::io::Result<()> {
    let mut session = Session::new(&config.greeting);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions completed by background tasks
    let (tx, rx) = mpsc::channel();

    // Probe the backend once at startup so the title bar reflects reality
    let effect = update(&mut session, Action::CheckStatus);
    let mut should_quit = handle_effect(effect, &backend, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let waiting = matches!(
            session.state,
            SessionState::Initializing | SessionState::Processing
        );
        if waiting {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &session, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if waiting {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C and Esc always quit
            if matches!(tui_event, TuiEvent::ForceQuit | TuiEvent::Escape) {
                if update(&mut session, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Session-level commands map straight to actions
            let command = match &tui_event {
                TuiEvent::Initialize => Some(Action::Initialize),
                TuiEvent::ClearChat => Some(Action::ClearChat),
                TuiEvent::CheckStatus => Some(Action::CheckStatus),
                _ => None,
            };
            if let Some(action) = command {
                let effect = update(&mut session, action);
                should_quit |= handle_effect(effect, &backend, &tx);
                continue;
            }

            // F1-F4: pre-fill the input with a configured example query and,
            // when a send would be accepted, submit it right away
            if let TuiEvent::ExampleQuery(index) = tui_event {
                if let Some(example) = config.example_queries.get(index) {
                    tui.input_box.set_text(&example.text);
                    if session.state == SessionState::Ready
                        && let Some(InputEvent::Submit(text)) =
                            tui.input_box.handle_event(&TuiEvent::Submit)
                    {
                        let effect = update(&mut session, Action::SendMessage(text));
                        should_quit |= handle_effect(effect, &backend, &tx);
                    }
                }
                continue;
            }

            // Scroll events go to the message list
            if matches!(
                tui_event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::ScrollToBottom
            ) {
                tui.message_list.handle_event(&tui_event);
                continue;
            }

            // End with nothing typed jumps the transcript to the bottom and
            // re-pins auto-scroll; with text in the buffer it stays cursor movement
            if matches!(tui_event, TuiEvent::CursorEnd) && tui.input_box.buffer.is_empty() {
                tui.message_list.handle_event(&TuiEvent::ScrollToBottom);
                continue;
            }

            // Enter is only forwarded when a send would be accepted;
            // otherwise the typed text stays in the buffer
            if matches!(tui_event, TuiEvent::Submit) && session.state != SessionState::Ready {
                debug!("Submit ignored in state {:?}", session.state);
                continue;
            }

            // Everything else is text editing
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&tui_event) {
                let effect = update(&mut session, Action::SendMessage(text));
                should_quit |= handle_effect(effect, &backend, &tx);
            }
        }

        if should_quit {
            break;
        }

        // Apply completions reported by background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut session, action);
            should_quit |= handle_effect(effect, &backend, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Execute an effect by spawning the backend call it names. The task reports
/// its outcome back through the action channel. Returns true on `Quit`.
fn handle_effect(effect: Effect, backend: &Arc<dyn Backend>, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::SpawnInitialize => {
            info!("Spawning initialize request");
            let backend = backend.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match backend.initialize().await {
                    Ok(reply) => Action::InitializeOk(reply.message),
                    Err(e) => Action::InitializeErr(e),
                };
                if tx.send(action).is_err() {
                    warn!("Failed to send initialize result: receiver dropped");
                }
            });
        }
        Effect::SpawnChat(query) => {
            info!("Spawning chat request");
            let backend = backend.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = match backend.chat(&query).await {
                    Ok(reply) => Action::ResponseOk(reply),
                    Err(e) => Action::ResponseErr(e),
                };
                if tx.send(action).is_err() {
                    warn!("Failed to send chat result: receiver dropped");
                }
            });
        }
        Effect::SpawnStatus => {
            debug!("Spawning status probe");
            let backend = backend.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = backend.status().await;
                if tx.send(Action::StatusResult(result)).is_err() {
                    warn!("Failed to send status result: receiver dropped");
                }
            });
        }
    }
    false
}
