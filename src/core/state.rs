//! Observable UI state shared between the session controller and the renderer.
//!
//! [`ViewState`] is plain data. [`StateHandle`] wraps it in an async mutex and
//! bumps a revision counter after every update so the render loop knows when
//! to redraw.

use std::collections::VecDeque;
use std::sync::Arc;

use ratatui::style::{Modifier, Style};
use tokio::sync::{watch, Mutex};
use tui_textarea::TextArea;

use crate::api::Language;
use crate::core::dialogs::PendingPrompt;
use crate::core::evaluation::EvaluationReport;
use crate::core::message::ChatMessage;
use crate::ui::picker::PickerState;
use crate::utils::logging::TranscriptLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    LanguageSelection,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageStatus {
    #[default]
    Loading,
    Ready,
    /// Shown in place of the selector; there is no retry.
    Failed(String),
}

pub struct ViewState {
    pub screen: Screen,
    pub languages: Vec<Language>,
    pub language_status: LanguageStatus,
    pub language_picker: PickerState,
    pub selected_language: Option<Language>,
    pub session_id: Option<String>,
    messages: Vec<ChatMessage>,
    pub evaluation: Option<EvaluationReport>,
    pub evaluation_open: bool,
    /// Loading overlay label while a chat or evaluation call is in flight.
    pub busy: Option<String>,
    pub prompts: VecDeque<PendingPrompt>,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub exit_requested: bool,
    transcript: TranscriptLog,
    textarea: TextArea<'static>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(TranscriptLog::disabled())
    }
}

impl ViewState {
    pub fn new(transcript: TranscriptLog) -> Self {
        Self {
            screen: Screen::LanguageSelection,
            languages: Vec::new(),
            language_status: LanguageStatus::Loading,
            language_picker: PickerState::default(),
            selected_language: None,
            session_id: None,
            messages: Vec::new(),
            evaluation: None,
            evaluation_open: false,
            busy: None,
            prompts: VecDeque::new(),
            scroll_offset: 0,
            auto_scroll: true,
            exit_requested: false,
            transcript,
            textarea: fresh_textarea(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn transcript(&self) -> &TranscriptLog {
        &self.transcript
    }

    pub fn set_languages(&mut self, languages: Vec<Language>) {
        self.language_picker = PickerState::for_languages(&languages);
        self.languages = languages;
        self.language_status = LanguageStatus::Ready;
    }

    pub fn find_language(&self, code: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|language| language.code.eq_ignore_ascii_case(code))
    }

    pub fn highlighted_language(&self) -> Option<Language> {
        let code = self.language_picker.selected_id()?;
        self.find_language(code).cloned()
    }

    /// Append to the chat log and follow it to the bottom. Writing the
    /// transcript is left to the caller, outside the state lock.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.auto_scroll = true;
    }

    /// Empty the chat log. Returns whether anything was removed.
    pub fn clear_messages(&mut self) -> bool {
        let had_messages = !self.messages.is_empty();
        self.messages.clear();
        self.scroll_offset = 0;
        self.auto_scroll = true;
        had_messages
    }

    pub fn show_chat(&mut self) {
        self.screen = Screen::Chat;
    }

    pub fn show_language_selection(&mut self) {
        self.screen = Screen::LanguageSelection;
    }

    pub fn show_evaluation(&mut self, report: EvaluationReport) {
        self.evaluation = Some(report);
        self.evaluation_open = true;
    }

    pub fn close_evaluation(&mut self) {
        self.evaluation_open = false;
    }

    /// Whether the evaluation modal is currently displayed.
    pub fn evaluation_visible(&self) -> bool {
        self.evaluation_open && self.evaluation.is_some()
    }

    /// Full reset back to the language selector. Returns whether the chat
    /// log had anything in it.
    pub fn reset_session(&mut self) -> bool {
        self.close_evaluation();
        self.evaluation = None;
        self.show_language_selection();
        self.session_id = None;
        self.selected_language = None;
        self.clear_messages()
    }

    pub fn can_send(&self) -> bool {
        self.session_id.is_some() && self.selected_language.is_some()
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Remove and return the input box contents.
    pub fn take_input(&mut self) -> String {
        let text = self.input_text();
        self.clear_input();
        text
    }

    pub fn set_input_text(&mut self, text: &str) {
        let mut textarea = TextArea::from(text.split('\n').map(str::to_string));
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);
        self.textarea = textarea;
    }

    pub fn clear_input(&mut self) {
        self.textarea = fresh_textarea();
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    pub fn input_line_count(&self) -> usize {
        self.textarea.lines().len().max(1)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }
}

fn fresh_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    textarea
}

/// Cloneable handle to the shared [`ViewState`].
#[derive(Clone)]
pub struct StateHandle {
    inner: Arc<Mutex<ViewState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl StateHandle {
    pub fn new(state: ViewState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(state)),
            revision: Arc::new(revision),
        }
    }

    /// Mutate the state and notify observers. Never hold this across I/O.
    pub async fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let result = {
            let mut guard = self.inner.lock().await;
            f(&mut guard)
        };
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
        result
    }

    /// Mutate without notifying. Used by the renderer for scroll bookkeeping
    /// so drawing a frame does not schedule another one.
    pub async fn update_quiet<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }

    pub async fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    /// Receiver that changes whenever [`StateHandle::update`] runs.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}
