use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn bindings(state: &AppState) -> Vec<(&'static str, &'static str)> {
    let reviewing = state.session.as_ref().map_or(false, |s| s.is_submitted());
    match state.screen {
        Screen::Gate => vec![("Tab", "next field"), ("Enter", "confirm"), ("Esc", "quit")],
        Screen::Setup => vec![
            ("↑/↓", "question set"),
            ("←/→", "count"),
            ("Enter", "start"),
            ("q", "quit"),
        ],
        Screen::Quiz if reviewing => vec![
            ("←/→", "prev/next"),
            ("PgUp/PgDn", "jump 5"),
            ("Esc", "results"),
            ("Ctrl+Q", "quit"),
        ],
        Screen::Quiz => vec![
            ("a-z", "answer"),
            ("↑/↓", "option"),
            ("Space", "select"),
            ("←/→", "prev/next"),
            ("Ctrl+S", "finish"),
            ("Ctrl+Q", "quit"),
        ],
        Screen::Results => vec![
            ("↑/↓", "scroll"),
            ("r", "review"),
            ("n", "new test"),
            ("q", "quit"),
        ],
    }
}

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings(state).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
