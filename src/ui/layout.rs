//! Pre-wrapping of the chat log into terminal lines.
//!
//! The chat view scrolls by line, so the log is wrapped here with
//! display-width awareness instead of letting `Paragraph` wrap it; that keeps
//! the scroll math and the rendered output in agreement.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::message::ChatMessage;
use crate::ui::theme::Theme;

const USER_LABEL: &str = "You";
const ASSISTANT_LABEL: &str = "Tutor";

/// Word-wrap `text` to `width` display columns. Words wider than the line are
/// split. Explicit newlines are kept; an empty input yields one empty line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in raw_line.split(' ') {
            let word_width = word.width();
            let needs_space = !current.is_empty();
            let projected = current_width + usize::from(needs_space) + word_width;

            if projected <= width {
                if needs_space {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        out.push(current);
    }

    out
}

/// Render the chat log as styled, already-wrapped lines.
pub fn transcript_lines(messages: &[ChatMessage], theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (index, message) in messages.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }

        let (label, label_style, text_style) = if message.is_user() {
            (USER_LABEL, theme.user_prefix_style, theme.user_text_style)
        } else {
            (
                ASSISTANT_LABEL,
                theme.assistant_prefix_style,
                theme.assistant_text_style,
            )
        };

        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::raw("  "),
            Span::styled(message.time_label(), theme.timestamp_style),
        ]));

        for chunk in wrap_text(&message.content, usize::from(width)) {
            lines.push(Line::from(Span::styled(chunk, text_style)));
        }
    }

    lines
}

/// Largest valid scroll offset for `total` lines in a viewport of `height`.
pub fn max_scroll(total: usize, height: u16) -> u16 {
    let overflow = total.saturating_sub(usize::from(height));
    u16::try_from(overflow).unwrap_or(u16::MAX)
}

/// A rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// A rectangle `width` wide and `height` tall centered in `area`, clamped to it.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn keeps_explicit_newlines_and_empty_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn splits_words_longer_than_the_line() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn measures_wide_characters_by_display_width() {
        // Each of these occupies two columns.
        let lines = wrap_text("日本語です", 4);
        assert_eq!(lines, vec!["日本", "語で", "す"]);
        assert!(lines.iter().all(|line| line.width() <= 4));
    }

    #[test]
    fn transcript_has_header_and_spacer_per_message() {
        let theme = Theme::dark_default();
        let messages = vec![ChatMessage::user("hola"), ChatMessage::assistant("¡Hola!")];
        let lines = transcript_lines(&messages, &theme, 40);

        // header, body, spacer, header, body
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].spans[0].content, USER_LABEL);
        assert_eq!(lines[3].spans[0].content, ASSISTANT_LABEL);
        assert_eq!(lines[4].spans[0].content, "¡Hola!");
    }

    #[test]
    fn max_scroll_never_underflows() {
        assert_eq!(max_scroll(3, 10), 0);
        assert_eq!(max_scroll(25, 10), 15);
    }

    #[test]
    fn centered_fixed_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_fixed(50, 50, area), area);
    }
}
