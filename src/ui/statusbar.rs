use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::raw(" ")];

    match (&state.session, state.screen) {
        (Some(session), Screen::Quiz) if !session.is_submitted() => {
            spans.push(Span::styled(
                format!("● {} answered", session.answered_count()),
                Style::default().fg(Color::LightBlue),
            ));
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("○ {} left", state.unanswered_count()),
                Style::default().fg(Color::White),
            ));
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("{}% done", session.progress_percent()),
                Style::default().fg(Color::Yellow),
            ));
        }
        (Some(_), Screen::Quiz | Screen::Results) => {
            if let Some(report) = &state.report {
                spans.push(Span::styled(
                    format!("✓ {} correct", report.correct),
                    Style::default().fg(Color::Green),
                ));
                spans.push(Span::raw("   "));
                spans.push(Span::styled(
                    format!("✗ {} wrong", report.total - report.correct),
                    Style::default().fg(Color::Red),
                ));
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled("reviewing", Style::default().fg(Color::DarkGray)));
        }
        _ => {
            spans.push(Span::styled(
                format!(
                    "{} tests taken · average {}%",
                    state.stats.tests_taken,
                    state.stats.average_percent()
                ),
                Style::default().fg(Color::White),
            ));
        }
    }

    spans.push(Span::raw("   "));
    spans.push(Span::styled("[?] help", Style::default().fg(Color::DarkGray)));

    let widget =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
