use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::session::format_elapsed;
use crate::state::{AppState, Screen};

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let title_text = format!("[ {} ]", state.title());

    let right = match (&state.session, state.screen) {
        (Some(session), Screen::Quiz | Screen::Results) => {
            format!(" {}  {} ", state.user_name, format_elapsed(session.elapsed_seconds()))
        }
        _ if !state.user_name.is_empty() => format!(" {} ", state.user_name),
        _ => String::new(),
    };

    let available = area.width as usize;
    let title_len = title_text.chars().count();
    let right_len = right.chars().count();
    let center_pad = available.saturating_sub(title_len) / 2;
    let right_pad = available.saturating_sub(center_pad + title_len + right_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        Span::styled(
            title_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(right_pad)),
        Span::styled(right, Style::default().fg(Color::Rgb(200, 200, 120))),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    f.render_widget(widget, area);
}
