//! Event polling, dispatching, and the UI rendering loop.
//!
//! The loop owns the terminal. Terminal input is read on a background task and
//! forwarded over a channel; key presses are resolved against the current view
//! state and turned into [`SessionController`] calls. Calls that reach the
//! network run on their own tasks so the loop keeps drawing while they are in
//! flight, and every state change wakes the loop through the revision channel.

mod keybindings;
mod lifecycle;

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_textarea::Input as TAInput;

use crate::api::{HttpTutorApi, TutorApi};
use crate::core::controller::SessionController;
use crate::core::dialogs::{Dialogs, StateDialogs};
use crate::core::state::{StateHandle, ViewState};
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;
use crate::utils::input::sanitize_text_input;
use crate::utils::logging::TranscriptLog;

use keybindings::{resolve_key, KeyAction, KeyContext};
use lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

/// Rows kept out of a page scroll: title, input borders and one line of input.
const PAGE_CHROME_ROWS: u16 = 4;

#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub api_base: String,
    /// Language code to select as soon as the list has loaded.
    pub language: Option<String>,
    pub transcript: Option<String>,
}

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

fn spawn_startup(controller: SessionController, language: Option<String>) {
    tokio::spawn(async move {
        controller.load_languages().await;
        if let Some(code) = language {
            controller.select_language_code(&code).await;
        }
    });
}

async fn draw_frame(
    terminal: &mut ChatTerminal,
    state: &StateHandle,
    theme: &Theme,
) -> std::io::Result<()> {
    state
        .update_quiet(|view| terminal.draw(|f| ui(f, view, theme)).map(|_| ()))
        .await
}

pub async fn run_chat(options: ChatOptions) -> Result<(), Box<dyn Error>> {
    let ChatOptions {
        api_base,
        language,
        transcript,
    } = options;

    let transcript = TranscriptLog::new(transcript)?;
    let state = StateHandle::new(ViewState::new(transcript));
    let api: Arc<dyn TutorApi> = Arc::new(HttpTutorApi::new(api_base.clone()));
    let dialogs: Arc<dyn Dialogs> = Arc::new(StateDialogs::new(state.clone()));
    let controller = SessionController::new(api, dialogs, state.clone());

    info!(api_base = %api_base, "starting chat");
    spawn_startup(controller.clone(), language);

    let theme = Theme::from_env();
    let mut terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);
    let mut revisions = state.subscribe();

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if state.read(|view| view.exit_requested).await {
            break 'main_loop Ok(());
        }

        if let Err(err) = draw_frame(&mut terminal, &state, &theme).await {
            break 'main_loop Err(err.into());
        }

        tokio::select! {
            event = event_rx.recv() => match event {
                Some(UiEvent::Crossterm(event)) => {
                    let page = terminal
                        .size()
                        .map(|size| size.height.saturating_sub(PAGE_CHROME_ROWS).max(1))
                        .unwrap_or(1);
                    handle_event(&controller, event, page).await;
                }
                None => break 'main_loop Ok(()),
            },
            changed = revisions.changed() => {
                if changed.is_err() {
                    break 'main_loop Ok(());
                }
            }
        }
    };

    event_reader_handle.abort();
    restore_terminal(&mut terminal)?;
    info!("chat ended");
    result
}

async fn handle_event(controller: &SessionController, event: Event, page: u16) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            handle_key(controller, key, page).await;
        }
        Event::Paste(text) => {
            let text = sanitize_text_input(&text);
            controller
                .state()
                .update(|view| {
                    if view.prompts.is_empty() && view.busy.is_none() && !view.evaluation_visible() {
                        view.textarea_mut().insert_str(text);
                    }
                })
                .await;
        }
        // Resizes only need a redraw, which the loop does after every event.
        _ => {}
    }
}

async fn handle_key(controller: &SessionController, key: KeyEvent, page: u16) {
    let state = controller.state();
    let ctx = state.read(KeyContext::from_state).await;
    let action = resolve_key(ctx, key);
    debug!(?action, "key resolved");

    match action {
        KeyAction::Quit => {
            state.update(|view| view.exit_requested = true).await;
        }
        KeyAction::ResolvePrompt(accepted) => {
            if let Some(prompt) = state.update(|view| view.prompts.pop_front()).await {
                prompt.resolve(accepted);
            }
        }
        KeyAction::PickerUp => {
            state.update(|view| view.language_picker.move_up()).await;
        }
        KeyAction::PickerDown => {
            state.update(|view| view.language_picker.move_down()).await;
        }
        KeyAction::SelectLanguage => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.select_highlighted_language().await });
        }
        KeyAction::ReturnToChat => {
            state.update(|view| view.show_chat()).await;
        }
        KeyAction::Submit => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit_input().await });
        }
        KeyAction::InsertNewline => {
            state.update(|view| view.textarea_mut().insert_newline()).await;
        }
        KeyAction::Evaluate => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.request_evaluation().await });
        }
        KeyAction::NewConversation => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.start_new_conversation().await });
        }
        KeyAction::ClearConversation => {
            let controller = controller.clone();
            tokio::spawn(async move { controller.clear_conversation().await });
        }
        KeyAction::ChangeLanguage => controller.show_language_selection().await,
        KeyAction::ScrollUp => {
            state.update(|view| view.scroll_up(page)).await;
        }
        KeyAction::ScrollDown => {
            state.update(|view| view.scroll_down(page)).await;
        }
        KeyAction::CloseEvaluation => controller.close_evaluation().await,
        KeyAction::NewSession => controller.start_new_session().await,
        KeyAction::Edit(key) => {
            state
                .update(|view| {
                    view.textarea_mut().input(TAInput::from(key));
                })
                .await;
        }
        KeyAction::Ignore => {}
    }
}
