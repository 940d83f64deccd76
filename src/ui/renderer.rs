use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::core::dialogs::{PendingPrompt, PromptKind};
use crate::core::evaluation::{EvaluationReport, Section};
use crate::core::state::{LanguageStatus, Screen, ViewState};
use crate::ui::layout::{centered_fixed, centered_rect, max_scroll, transcript_lines};
use crate::ui::theme::Theme;

const MAX_INPUT_LINES: u16 = 6;

pub fn ui(f: &mut Frame, state: &mut ViewState, theme: &Theme) {
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        f.area(),
    );

    match state.screen {
        Screen::LanguageSelection => render_language_selection(f, state, theme),
        Screen::Chat => render_chat(f, state, theme),
    }

    if state.evaluation_visible() {
        if let Some(report) = state.evaluation.as_ref() {
            render_evaluation(f, report, theme);
        }
    }

    if let Some(label) = state.busy.as_deref() {
        render_busy(f, label, theme);
    }

    if let Some(prompt) = state.prompts.front() {
        render_prompt(f, prompt, theme);
    }
}

fn render_language_selection(f: &mut Frame, state: &ViewState, theme: &Theme) {
    let area = centered_rect(60, 70, f.area());
    let title = if state.language_picker.title.is_empty() {
        "Choose a language to practice".to_string()
    } else {
        state.language_picker.title.clone()
    };

    let hint = if state.can_send() {
        "↑/↓ to move • Enter to select • Esc to return to chat • Ctrl+C to quit"
    } else {
        "↑/↓ to move • Enter to select • Ctrl+C to quit"
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.modal_border_style)
        .title(Span::styled(title, theme.title_style))
        .title_bottom(Span::styled(hint, theme.hint_style));

    match &state.language_status {
        LanguageStatus::Loading => {
            let paragraph = Paragraph::new(Span::styled("Loading languages...", theme.hint_style))
                .block(block);
            f.render_widget(paragraph, area);
        }
        LanguageStatus::Failed(message) => {
            let paragraph = Paragraph::new(Span::styled(message.as_str(), theme.error_style))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
        LanguageStatus::Ready => {
            let items: Vec<ListItem> = state
                .language_picker
                .items
                .iter()
                .map(|item| ListItem::new(Span::styled(item.label.clone(), theme.picker_item_style)))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(theme.picker_selected_style)
                .highlight_symbol("› ");
            let mut list_state = ListState::default();
            if !state.language_picker.items.is_empty() {
                list_state.select(Some(state.language_picker.selected));
            }
            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn render_chat(f: &mut Frame, state: &mut ViewState, theme: &Theme) {
    let input_lines = u16::try_from(state.input_line_count())
        .unwrap_or(MAX_INPUT_LINES)
        .min(MAX_INPUT_LINES);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(input_lines + 2), // +2 for borders
        ])
        .split(f.area());

    let language = state
        .selected_language
        .as_ref()
        .map(|language| language.name.as_str())
        .unwrap_or("no language");
    let title = format!(
        "Parlance v{} - Practicing {} • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        language,
        state.transcript().status_string()
    );

    let log_area = chunks[0];
    let available_height = log_area.height.saturating_sub(1); // title row
    let lines = transcript_lines(state.messages(), theme, log_area.width);
    let max_offset = max_scroll(lines.len(), available_height);
    if state.auto_scroll || state.scroll_offset >= max_offset {
        state.scroll_offset = max_offset;
        state.auto_scroll = true;
    }

    let log = Paragraph::new(lines)
        .block(Block::default().title(Span::styled(title, theme.title_style)))
        .scroll((state.scroll_offset, 0));
    f.render_widget(log, log_area);

    let input_title = if state.can_send() {
        "Type your message (Enter to send, Alt+Enter for new line, Ctrl+E to evaluate, Ctrl+C to quit)"
    } else {
        "No active session (Ctrl+G to choose a language, Ctrl+C to quit)"
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(input_title, theme.hint_style));

    let textarea = state.textarea_mut();
    textarea.set_block(input_block);
    textarea.set_style(theme.input_text_style);
    f.render_widget(state.textarea(), chunks[1]);
}

fn render_evaluation(f: &mut Frame, report: &EvaluationReport, theme: &Theme) {
    let area = centered_rect(80, 80, f.area());
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Score: ", theme.section_heading_style),
        Span::styled(report.score_label(), theme.score_style),
    ]));
    lines.push(Line::default());

    heading(&mut lines, "Summary", theme);
    lines.push(Line::from(report.summary.clone()));
    lines.push(Line::default());

    heading(&mut lines, "Strengths", theme);
    bullet_section(&mut lines, &report.strengths, theme.placeholder_style);

    heading(&mut lines, "Mistakes", theme);
    match report.mistakes.placeholder() {
        Some(text) => {
            lines.push(Line::from(Span::styled(text, theme.positive_placeholder_style)));
        }
        None => {
            for mistake in report.mistakes.items() {
                let mut header = vec![
                    Span::raw("❌ "),
                    Span::styled(mistake.original.clone(), theme.mistake_original_style),
                ];
                if let Some(kind) = mistake.kind.as_deref() {
                    header.push(Span::styled(format!("  [{kind}]"), theme.hint_style));
                }
                lines.push(Line::from(header));
                lines.push(Line::from(vec![
                    Span::raw("✅ "),
                    Span::styled(mistake.correction.clone(), theme.mistake_correction_style),
                ]));
                lines.push(Line::from(format!("   {}", mistake.explanation)));
            }
        }
    }
    lines.push(Line::default());

    heading(&mut lines, "Suggestions", theme);
    bullet_section(&mut lines, &report.suggestions, theme.placeholder_style);

    heading(&mut lines, "Areas for improvement", theme);
    bullet_section(&mut lines, &report.areas_for_improvement, theme.placeholder_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.modal_border_style)
        .title(Span::styled("Conversation evaluation", theme.title_style))
        .title_bottom(Span::styled(
            "Enter/Esc to keep chatting • n for a new session",
            theme.hint_style,
        ));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn heading(lines: &mut Vec<Line<'_>>, title: &'static str, theme: &Theme) {
    lines.push(Line::from(Span::styled(title, theme.section_heading_style)));
}

fn bullet_section(lines: &mut Vec<Line<'_>>, section: &Section<String>, placeholder_style: Style) {
    match section.placeholder() {
        Some(text) => lines.push(Line::from(Span::styled(text, placeholder_style))),
        None => {
            for item in section.items() {
                lines.push(Line::from(format!("• {item}")));
            }
        }
    }
    lines.push(Line::default());
}

fn render_busy(f: &mut Frame, label: &str, theme: &Theme) {
    let width = u16::try_from(label.chars().count() + 6).unwrap_or(u16::MAX);
    let area = centered_fixed(width, 3, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(Span::styled(label.to_string(), theme.busy_style))
            .centered()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.modal_border_style),
            ),
        area,
    );
}

fn render_prompt(f: &mut Frame, prompt: &PendingPrompt, theme: &Theme) {
    let (title, hint, style) = match prompt.kind {
        PromptKind::Alert => ("Notice", "Enter to dismiss", theme.error_style),
        PromptKind::Confirm => ("Confirm", "y to confirm • n/Esc to cancel", theme.title_style),
    };

    let full = f.area();
    let width = full.width.saturating_sub(4).min(60);
    let inner_width = usize::from(width.saturating_sub(2));
    let body_lines = crate::ui::layout::wrap_text(&prompt.message, inner_width).len();
    let height = u16::try_from(body_lines + 2).unwrap_or(u16::MAX);
    let area: Rect = centered_fixed(width, height, full);

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(prompt.message.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .title(Span::styled(title, style))
                    .title_bottom(Span::styled(hint, theme.hint_style)),
            ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Evaluation, Language, Mistake};
    use crate::core::message::ChatMessage;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &mut ViewState, width: u16, height: u16) -> String {
        let theme = Theme::monochrome();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|f| ui(f, state, &theme))
            .expect("draw frame");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn language_screen_shows_loading_then_failure() {
        let mut state = ViewState::default();
        assert!(draw(&mut state, 80, 20).contains("Loading languages..."));

        state.language_status =
            LanguageStatus::Failed("Error loading languages. Please refresh the page.".into());
        assert!(draw(&mut state, 80, 20).contains("Error loading languages."));
    }

    #[test]
    fn language_screen_lists_names() {
        let mut state = ViewState::default();
        state.set_languages(vec![
            Language::new("es", "Spanish"),
            Language::new("fr", "French"),
        ]);
        let screen = draw(&mut state, 80, 20);
        assert!(screen.contains("Spanish"));
        assert!(screen.contains("French"));
    }

    #[test]
    fn chat_follows_the_newest_message() {
        let mut state = ViewState::default();
        state.selected_language = Some(Language::new("es", "Spanish"));
        state.session_id = Some("s-1".into());
        state.show_chat();
        for i in 0..30 {
            state.push_message(ChatMessage::user(format!("message {i}")));
        }

        let screen = draw(&mut state, 60, 20);
        assert!(screen.contains("Practicing Spanish"));
        assert!(screen.contains("message 29"));
        assert!(!screen.contains("message 0 "));
        assert!(state.scroll_offset > 0);
    }

    #[test]
    fn evaluation_modal_shows_placeholders() {
        let mut state = ViewState::default();
        state.show_chat();
        state.show_evaluation(EvaluationReport::from_evaluation(Evaluation {
            overall_score: Some(72.0),
            ..Evaluation::default()
        }));

        let screen = draw(&mut state, 100, 40);
        assert!(screen.contains("Score: 72"));
        assert!(screen.contains("No mistakes found! Great job!"));
        assert!(screen.contains("Keep practicing!"));
    }

    #[test]
    fn evaluation_modal_marks_mistakes() {
        let mut state = ViewState::default();
        state.show_chat();
        state.show_evaluation(EvaluationReport::from_evaluation(Evaluation {
            mistakes: Some(vec![Mistake {
                message: Some("yo soy cansado".into()),
                correction: Some("yo estoy cansado".into()),
                explanation: None,
                kind: Some("grammar".into()),
            }]),
            ..Evaluation::default()
        }));

        let screen = draw(&mut state, 100, 40);
        assert!(screen.contains("yo soy cansado"));
        assert!(screen.contains("yo estoy cansado"));
        assert!(screen.contains("[grammar]"));
        assert!(screen.contains("No explanation provided."));
    }

    #[test]
    fn busy_and_prompt_overlays_render() {
        let mut state = ViewState::default();
        state.show_chat();
        state.busy = Some("Sending message...".into());
        assert!(draw(&mut state, 80, 20).contains("Sending message..."));

        state.busy = None;
        let (prompt, _answer) = PendingPrompt::new(PromptKind::Confirm, "Start over?");
        state.prompts.push_back(prompt);
        let screen = draw(&mut state, 80, 20);
        assert!(screen.contains("Start over?"));
        assert!(screen.contains("Confirm"));
    }
}
