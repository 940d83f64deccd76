use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chat log
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_prefix_style: Style,
    pub assistant_text_style: Style,
    pub timestamp_style: Style,

    // Chrome
    pub title_style: Style,
    pub hint_style: Style,
    pub input_border_style: Style,
    pub input_text_style: Style,
    pub error_style: Style,

    // Language picker
    pub picker_item_style: Style,
    pub picker_selected_style: Style,

    // Evaluation modal
    pub score_style: Style,
    pub section_heading_style: Style,
    pub placeholder_style: Style,
    pub mistake_original_style: Style,
    pub mistake_correction_style: Style,
    pub positive_placeholder_style: Style,

    // Overlays
    pub modal_border_style: Style,
    pub busy_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_prefix_style: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::White),
            timestamp_style: Style::default().fg(Color::DarkGray),

            title_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            hint_style: Style::default().fg(Color::DarkGray),
            input_border_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            error_style: Style::default().fg(Color::LightRed),

            picker_item_style: Style::default().fg(Color::White),
            picker_selected_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            score_style: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            section_heading_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            placeholder_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            mistake_original_style: Style::default().fg(Color::LightRed),
            mistake_correction_style: Style::default().fg(Color::LightGreen),
            positive_placeholder_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::ITALIC),

            modal_border_style: Style::default().fg(Color::Cyan),
            busy_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// No colors at all; used when `NO_COLOR` is set.
    pub fn monochrome() -> Self {
        let plain = Style::default();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let italic = Style::default().add_modifier(Modifier::ITALIC);
        Theme {
            background_color: Color::Reset,
            user_prefix_style: bold,
            user_text_style: plain,
            assistant_prefix_style: bold,
            assistant_text_style: plain,
            timestamp_style: Style::default().add_modifier(Modifier::DIM),
            title_style: bold,
            hint_style: Style::default().add_modifier(Modifier::DIM),
            input_border_style: plain,
            input_text_style: plain,
            error_style: bold,
            picker_item_style: plain,
            picker_selected_style: Style::default().add_modifier(Modifier::REVERSED),
            score_style: bold,
            section_heading_style: Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            placeholder_style: italic,
            mistake_original_style: plain,
            mistake_correction_style: bold,
            positive_placeholder_style: italic,
            modal_border_style: plain,
            busy_style: bold,
        }
    }

    /// Pick a theme based on the environment.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()) {
            Self::monochrome()
        } else {
            Self::dark_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monochrome_has_no_foreground_colors() {
        let theme = Theme::monochrome();
        for style in [
            theme.user_text_style,
            theme.assistant_text_style,
            theme.error_style,
            theme.mistake_original_style,
            theme.picker_selected_style,
        ] {
            assert_eq!(style.fg, None);
            assert_eq!(style.bg, None);
        }
    }

    #[test]
    fn selected_picker_item_stands_out() {
        let theme = Theme::dark_default();
        assert_ne!(theme.picker_selected_style, theme.picker_item_style);
    }
}
