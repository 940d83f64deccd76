//! The language-practice session workflow.
//!
//! [`SessionController`] owns no UI. It mutates [`ViewState`] through a
//! [`StateHandle`], talks to the tutor through [`TutorApi`], and raises
//! blocking prompts through [`Dialogs`]. Every remote call is a single
//! attempt: failures turn into an alert or a placeholder message and are
//! never propagated to the caller.
//!
//! Session creation and message sends are not serialized against each other.
//! A message sent while a new session is still being created goes out with
//! whatever session id is current at that moment.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{ChatRequest, EvaluateRequest, Language, TutorApi};
use crate::core::dialogs::Dialogs;
use crate::core::evaluation::EvaluationReport;
use crate::core::message::{ChatMessage, CHAT_FALLBACK_REPLY};
use crate::core::state::{LanguageStatus, StateHandle, ViewState};
use crate::utils::logging::TranscriptLog;

pub const LANGUAGES_ERROR: &str = "Error loading languages. Please refresh the page.";
pub const SESSION_ERROR: &str = "Error creating new session. Please try again.";
pub const NO_SESSION_TO_EVALUATE: &str = "No active session to evaluate.";
pub const EVALUATION_ERROR: &str = "Error getting evaluation. Please try again.";
pub const NO_SESSION_TO_CLEAR: &str = "No active session to clear.";
pub const CLEAR_ERROR: &str = "Error clearing conversation. Please try again.";
pub const NEW_CONVERSATION_PROMPT: &str =
    "Are you sure you want to start a new conversation? This will clear your current chat history.";
pub const SENDING_LABEL: &str = "Sending message...";
pub const ANALYZING_LABEL: &str = "Analyzing your conversation...";

#[derive(Clone)]
pub struct SessionController {
    api: Arc<dyn TutorApi>,
    dialogs: Arc<dyn Dialogs>,
    state: StateHandle,
}

impl SessionController {
    pub fn new(api: Arc<dyn TutorApi>, dialogs: Arc<dyn Dialogs>, state: StateHandle) -> Self {
        Self {
            api,
            dialogs,
            state,
        }
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    /// Fetch the language list once. A failure leaves a permanent message in
    /// place of the selector.
    pub async fn load_languages(&self) {
        self.state
            .update(|state| state.language_status = LanguageStatus::Loading)
            .await;

        match self.api.list_languages().await {
            Ok(languages) => {
                info!(count = languages.len(), "languages loaded");
                self.state
                    .update(|state| state.set_languages(languages))
                    .await;
            }
            Err(err) => {
                warn!(error = %err, "failed to load languages");
                self.state
                    .update(|state| {
                        state.language_status = LanguageStatus::Failed(LANGUAGES_ERROR.to_string())
                    })
                    .await;
            }
        }
    }

    /// Pick `language`, open a session for it and switch to the chat view.
    ///
    /// The view switches even when session creation fails; sending stays
    /// disabled until a session exists.
    pub async fn select_language(&self, language: Language) {
        info!(code = %language.code, "language selected");
        self.state
            .update(|state| {
                state.language_picker.select_id(&language.code);
                state.selected_language = Some(language);
            })
            .await;

        self.create_session().await;

        self.state.update(|state| state.show_chat()).await;
    }

    /// Select by language code. Returns false when the code is unknown.
    pub async fn select_language_code(&self, code: &str) -> bool {
        let language = self
            .state
            .read(|state| state.find_language(code).cloned())
            .await;
        match language {
            Some(language) => {
                self.select_language(language).await;
                true
            }
            None => {
                warn!(code, "unknown language code");
                false
            }
        }
    }

    /// Select whatever the language picker currently highlights.
    pub async fn select_highlighted_language(&self) {
        if let Some(language) = self.state.read(|state| state.highlighted_language()).await {
            self.select_language(language).await;
        }
    }

    /// Ask the backend for a fresh session id. On failure the previous id is
    /// kept and the user is alerted.
    pub async fn create_session(&self) -> bool {
        match self.api.create_session().await {
            Ok(session_id) => {
                debug!(%session_id, "session created");
                self.state
                    .update(|state| state.session_id = Some(session_id))
                    .await;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to create session");
                self.dialogs.alert(SESSION_ERROR).await;
                false
            }
        }
    }

    /// Send `text` to the tutor.
    ///
    /// Blank text, or a missing session or language, makes this a no-op. The
    /// user's line is echoed into the log before the request goes out, and a
    /// failed request is answered with [`CHAT_FALLBACK_REPLY`] rather than the
    /// underlying error.
    pub async fn send_message(&self, text: &str) {
        let text = text.to_string();
        self.dispatch_message(move |_| text).await;
    }

    /// Send whatever is in the input box. The text is taken and the box
    /// cleared under the same lock that echoes it, so a repeated submit finds
    /// nothing left to send.
    pub async fn submit_input(&self) {
        self.dispatch_message(ViewState::take_input).await;
    }

    async fn dispatch_message(&self, take_text: impl FnOnce(&mut ViewState) -> String) {
        let outgoing = self
            .state
            .update(|state| {
                let session_id = state.session_id.clone()?;
                let language = state.selected_language.as_ref()?.code.clone();
                let text = take_text(state);
                let message = text.trim();
                if message.is_empty() {
                    return None;
                }
                let echo = ChatMessage::user(message);
                state.push_message(echo.clone());
                state.clear_input();
                state.busy = Some(SENDING_LABEL.to_string());
                let request = ChatRequest {
                    session_id,
                    message: message.to_string(),
                    language,
                };
                Some((request, echo, state.transcript().clone()))
            })
            .await;

        let Some((request, echo, transcript)) = outgoing else {
            debug!("nothing to send");
            return;
        };
        record_message(&transcript, &echo);

        let reply = match self.api.send_chat(request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "chat request failed");
                CHAT_FALLBACK_REPLY.to_string()
            }
        };

        let reply = ChatMessage::assistant(reply);
        let transcript = self
            .state
            .update(|state| {
                state.push_message(reply.clone());
                state.busy = None;
                state.transcript().clone()
            })
            .await;
        record_message(&transcript, &reply);
    }

    /// Empty the chat log and, if it had content, mark the break in the
    /// transcript.
    async fn clear_log(&self, marker: &str) {
        let (cleared, transcript) = self
            .state
            .update(|state| (state.clear_messages(), state.transcript().clone()))
            .await;
        if cleared {
            record_marker(&transcript, marker);
        }
    }

    pub async fn request_evaluation(&self) {
        let session_id = self.state.read(|state| state.session_id.clone()).await;
        let Some(session_id) = session_id else {
            self.dialogs.alert(NO_SESSION_TO_EVALUATE).await;
            return;
        };

        self.state
            .update(|state| state.busy = Some(ANALYZING_LABEL.to_string()))
            .await;

        let result = self.api.evaluate(EvaluateRequest { session_id }).await;

        self.state.update(|state| state.busy = None).await;

        match result {
            Ok(evaluation) => {
                let report = EvaluationReport::from_evaluation(evaluation);
                info!(score = report.score, "evaluation received");
                self.state
                    .update(|state| state.show_evaluation(report))
                    .await;
            }
            Err(err) => {
                warn!(error = %err, "evaluation request failed");
                self.dialogs.alert(EVALUATION_ERROR).await;
            }
        }
    }

    /// Dismiss the evaluation and keep chatting.
    pub async fn close_evaluation(&self) {
        self.state.update(|state| state.close_evaluation()).await;
    }

    /// Go back to the selector without touching the session or the log.
    pub async fn show_language_selection(&self) {
        self.state
            .update(|state| state.show_language_selection())
            .await;
    }

    /// Start over in the same language after the user confirms.
    pub async fn start_new_conversation(&self) {
        if !self.dialogs.confirm(NEW_CONVERSATION_PROMPT).await {
            return;
        }

        self.create_session().await;
        self.clear_log("New conversation").await;
    }

    /// Drop the session, the language and the log, and return to the selector.
    pub async fn start_new_session(&self) {
        let (cleared, transcript) = self
            .state
            .update(|state| (state.reset_session(), state.transcript().clone()))
            .await;
        if cleared {
            record_marker(&transcript, "Session ended");
        }
    }

    /// Ask the backend to forget the history of the current session, then
    /// clear the local log. The session id is kept.
    pub async fn clear_conversation(&self) {
        let session_id = self.state.read(|state| state.session_id.clone()).await;
        let Some(session_id) = session_id else {
            self.dialogs.alert(NO_SESSION_TO_CLEAR).await;
            return;
        };

        match self.api.clear_session(&session_id).await {
            Ok(()) => self.clear_log("Conversation cleared").await,
            Err(err) => {
                warn!(error = %err, "failed to clear session");
                self.dialogs.alert(CLEAR_ERROR).await;
            }
        }
    }
}

// Transcript writes touch the disk, so they happen after the state lock is
// released.
fn record_message(transcript: &TranscriptLog, message: &ChatMessage) {
    if let Err(err) = transcript.log_message(message) {
        warn!(error = %err, "failed to write transcript");
    }
}

fn record_marker(transcript: &TranscriptLog, marker: &str) {
    if let Err(err) = transcript.log_marker(marker) {
        warn!(error = %err, "failed to write transcript");
    }
}
