use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{BorderType, Padding};

/// Read-only styling shared by every render call of a session.
#[derive(Clone, Debug)]
pub struct Theme {
    pub title: Style,
    pub status: Style,
    pub help: Style,
    pub row_title: Style,
    pub row_description: Style,
    pub selected_title: Style,
    pub selected_description: Style,
    pub filter_prompt: Style,
    pub match_count: Style,

    pub modal_border: Style,
    pub modal_border_type: BorderType,
    pub modal_padding: Padding,
    pub modal_width: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Indexed(230))
                .bg(Color::Indexed(62))
                .add_modifier(Modifier::BOLD),
            status: Style::default().fg(Color::Gray),
            help: Style::default().fg(Color::DarkGray),
            row_title: Style::default().fg(Color::White),
            row_description: Style::default().fg(Color::Gray),
            selected_title: Style::default()
                .fg(Color::Indexed(170))
                .add_modifier(Modifier::BOLD),
            selected_description: Style::default().fg(Color::Indexed(168)),
            filter_prompt: Style::default().fg(Color::Yellow),
            match_count: Style::default().fg(Color::Cyan),

            modal_border: Style::default().fg(Color::Indexed(63)),
            modal_border_type: BorderType::Rounded,
            modal_padding: Padding::new(2, 2, 1, 1),
            modal_width: 60,
        }
    }
}
