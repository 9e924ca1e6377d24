use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, QuestionStatus};

pub fn status_icon(status: QuestionStatus) -> (&'static str, Color) {
    match status {
        QuestionStatus::Unanswered => ("○", Color::White),
        QuestionStatus::Answered => ("●", Color::LightBlue),
        QuestionStatus::Correct => ("✓", Color::Green),
        QuestionStatus::Incorrect => ("✗", Color::Red),
    }
}

pub fn draw_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(session) = &state.session else {
        return;
    };

    let visible = area.height.saturating_sub(1) as usize;
    let current = session.cursor();
    // Keep the current question on screen.
    let scroll = current.saturating_sub(visible.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for idx in (0..session.len()).skip(scroll).take(visible) {
        let (icon, color) = status_icon(state.question_status(idx));
        let is_current = idx == current;
        let bg = if is_current { Color::DarkGray } else { Color::Reset };
        let style = if is_current {
            Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(bg)
        };

        lines.push(Line::from(vec![
            Span::styled(if is_current { " ▸ " } else { "   " }, style),
            Span::styled(format!("{} ", icon), Style::default().fg(color).bg(bg)),
            Span::styled(format!("Question {:>2}", idx + 1), style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .title(format!(" {} Questions ", session.len()))
        .title_style(Style::default().add_modifier(Modifier::BOLD));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
