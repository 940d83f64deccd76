//! Blocking user prompts raised by the session controller.
//!
//! The controller never talks to a rendering surface directly. Alerts and
//! confirmations go through [`Dialogs`]; the terminal shell answers them with
//! modal overlays via [`StateDialogs`], tests answer them from a script.

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::core::state::StateHandle;

#[async_trait]
pub trait Dialogs: Send + Sync {
    /// Show `message` and return once the user has acknowledged it.
    async fn alert(&self, message: &str);

    /// Ask a yes/no question. Dismissing the prompt counts as "no".
    async fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Alert,
    Confirm,
}

/// A prompt waiting for the user, queued on the view state.
#[derive(Debug)]
pub struct PendingPrompt {
    pub kind: PromptKind,
    pub message: String,
    responder: Option<oneshot::Sender<bool>>,
}

impl PendingPrompt {
    pub fn new(kind: PromptKind, message: impl Into<String>) -> (Self, oneshot::Receiver<bool>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                kind,
                message: message.into(),
                responder: Some(tx),
            },
            rx,
        )
    }

    pub fn resolve(mut self, accepted: bool) {
        if let Some(tx) = self.responder.take() {
            // The waiting operation may already be gone; nothing to do then.
            let _ = tx.send(accepted);
        }
    }
}

/// [`Dialogs`] backed by the prompt queue on [`crate::core::state::ViewState`].
#[derive(Clone)]
pub struct StateDialogs {
    state: StateHandle,
}

impl StateDialogs {
    pub fn new(state: StateHandle) -> Self {
        Self { state }
    }

    async fn ask(&self, kind: PromptKind, message: &str) -> bool {
        let (prompt, answer) = PendingPrompt::new(kind, message);
        self.state.update(|state| state.prompts.push_back(prompt)).await;
        answer.await.unwrap_or(false)
    }
}

#[async_trait]
impl Dialogs for StateDialogs {
    async fn alert(&self, message: &str) {
        self.ask(PromptKind::Alert, message).await;
    }

    async fn confirm(&self, message: &str) -> bool {
        self.ask(PromptKind::Confirm, message).await
    }
}
