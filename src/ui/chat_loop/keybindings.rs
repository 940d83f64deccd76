//! Mode-aware key resolution.
//!
//! Resolution is a pure function of a [`KeyContext`] snapshot and the key, so
//! precedence between overlays can be tested without a terminal. Overlays are
//! consulted top-down: Ctrl+C, then a pending prompt, then the busy overlay,
//! then the evaluation modal, and finally the active screen.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::dialogs::PromptKind;
use crate::core::state::{Screen, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub screen: Screen,
    pub prompt: Option<PromptKind>,
    pub busy: bool,
    pub evaluation_open: bool,
    pub has_session: bool,
}

impl KeyContext {
    pub fn from_state(state: &ViewState) -> Self {
        Self {
            screen: state.screen,
            prompt: state.prompts.front().map(|prompt| prompt.kind),
            busy: state.busy.is_some(),
            evaluation_open: state.evaluation_visible(),
            has_session: state.can_send(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ResolvePrompt(bool),
    PickerUp,
    PickerDown,
    SelectLanguage,
    ReturnToChat,
    Submit,
    InsertNewline,
    Evaluate,
    NewConversation,
    ClearConversation,
    ChangeLanguage,
    ScrollUp,
    ScrollDown,
    CloseEvaluation,
    NewSession,
    /// Forward to the input box.
    Edit(KeyEvent),
    Ignore,
}

pub fn resolve_key(ctx: KeyContext, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('c')) {
        return KeyAction::Quit;
    }

    if let Some(kind) = ctx.prompt {
        return resolve_prompt_key(kind, key);
    }

    if ctx.busy {
        return KeyAction::Ignore;
    }

    if ctx.evaluation_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => KeyAction::CloseEvaluation,
            KeyCode::Char('n') | KeyCode::Char('N') if !ctrl => KeyAction::NewSession,
            _ => KeyAction::Ignore,
        };
    }

    match ctx.screen {
        Screen::LanguageSelection => resolve_picker_key(ctx, key),
        Screen::Chat => resolve_chat_key(key),
    }
}

fn resolve_prompt_key(kind: PromptKind, key: KeyEvent) -> KeyAction {
    match kind {
        PromptKind::Alert => match key.code {
            KeyCode::Enter | KeyCode::Esc => KeyAction::ResolvePrompt(true),
            _ => KeyAction::Ignore,
        },
        PromptKind::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::ResolvePrompt(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                KeyAction::ResolvePrompt(false)
            }
            _ => KeyAction::Ignore,
        },
    }
}

fn resolve_picker_key(ctx: KeyContext, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Up => KeyAction::PickerUp,
        KeyCode::Down => KeyAction::PickerDown,
        KeyCode::Enter => KeyAction::SelectLanguage,
        KeyCode::Esc if ctx.has_session => KeyAction::ReturnToChat,
        _ => KeyAction::Ignore,
    }
}

fn resolve_chat_key(key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Enter if alt => KeyAction::InsertNewline,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Char('e') if ctrl => KeyAction::Evaluate,
        KeyCode::Char('n') if ctrl => KeyAction::NewConversation,
        KeyCode::Char('l') if ctrl => KeyAction::ClearConversation,
        KeyCode::Char('g') if ctrl => KeyAction::ChangeLanguage,
        KeyCode::PageUp => KeyAction::ScrollUp,
        KeyCode::PageDown => KeyAction::ScrollDown,
        _ => KeyAction::Edit(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat() -> KeyContext {
        KeyContext {
            screen: Screen::Chat,
            prompt: None,
            busy: false,
            evaluation_open: false,
            has_session: true,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn enter_sends_and_alt_enter_breaks_line() {
        assert_eq!(resolve_key(chat(), key(KeyCode::Enter)), KeyAction::Submit);
        assert_eq!(
            resolve_key(chat(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)),
            KeyAction::InsertNewline
        );
    }

    #[test]
    fn chat_shortcuts() {
        assert_eq!(resolve_key(chat(), ctrl('e')), KeyAction::Evaluate);
        assert_eq!(resolve_key(chat(), ctrl('n')), KeyAction::NewConversation);
        assert_eq!(resolve_key(chat(), ctrl('l')), KeyAction::ClearConversation);
        assert_eq!(resolve_key(chat(), ctrl('g')), KeyAction::ChangeLanguage);
        assert_eq!(resolve_key(chat(), key(KeyCode::PageUp)), KeyAction::ScrollUp);
        let typed = key(KeyCode::Char('n'));
        assert_eq!(resolve_key(chat(), typed), KeyAction::Edit(typed));
    }

    #[test]
    fn busy_overlay_swallows_everything_but_quit() {
        let ctx = KeyContext { busy: true, ..chat() };
        assert_eq!(resolve_key(ctx, key(KeyCode::Enter)), KeyAction::Ignore);
        assert_eq!(resolve_key(ctx, ctrl('e')), KeyAction::Ignore);
        assert_eq!(resolve_key(ctx, ctrl('c')), KeyAction::Quit);
    }

    #[test]
    fn prompt_takes_precedence_over_busy() {
        let ctx = KeyContext {
            busy: true,
            prompt: Some(PromptKind::Alert),
            ..chat()
        };
        assert_eq!(
            resolve_key(ctx, key(KeyCode::Enter)),
            KeyAction::ResolvePrompt(true)
        );
    }

    #[test]
    fn confirm_prompt_answers() {
        let ctx = KeyContext {
            prompt: Some(PromptKind::Confirm),
            ..chat()
        };
        assert_eq!(
            resolve_key(ctx, key(KeyCode::Char('y'))),
            KeyAction::ResolvePrompt(true)
        );
        assert_eq!(
            resolve_key(ctx, key(KeyCode::Esc)),
            KeyAction::ResolvePrompt(false)
        );
        assert_eq!(resolve_key(ctx, key(KeyCode::Enter)), KeyAction::Ignore);
    }

    #[test]
    fn evaluation_modal_keys() {
        let ctx = KeyContext {
            evaluation_open: true,
            ..chat()
        };
        assert_eq!(resolve_key(ctx, key(KeyCode::Esc)), KeyAction::CloseEvaluation);
        assert_eq!(
            resolve_key(ctx, key(KeyCode::Char('n'))),
            KeyAction::NewSession
        );
        assert_eq!(resolve_key(ctx, ctrl('e')), KeyAction::Ignore);
    }

    #[test]
    fn picker_escape_needs_a_session() {
        let ctx = KeyContext {
            screen: Screen::LanguageSelection,
            has_session: false,
            ..chat()
        };
        assert_eq!(resolve_key(ctx, key(KeyCode::Esc)), KeyAction::Ignore);
        assert_eq!(resolve_key(ctx, key(KeyCode::Down)), KeyAction::PickerDown);
        assert_eq!(
            resolve_key(ctx, key(KeyCode::Enter)),
            KeyAction::SelectLanguage
        );

        let ctx = KeyContext {
            has_session: true,
            ..ctx
        };
        assert_eq!(resolve_key(ctx, key(KeyCode::Esc)), KeyAction::ReturnToChat);
    }
}
