use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, GateFocus};
use crate::ui::dialog::centered_rect;

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn draw_gate(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            state.title().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if state.gate.requires_passcode() {
        let focused = state.gate_focus == GateFocus::Passcode;
        let cursor = if focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled("Passcode: ", field_style(focused)),
            Span::styled(
                format!("[{:<20}]", format!("{}{}", "*".repeat(state.gate_passcode.chars().count()), cursor)),
                field_style(focused),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let focused = state.gate_focus == GateFocus::Name;
    let cursor = if focused { "▏" } else { "" };
    lines.push(Line::from(vec![
        Span::styled("Your name: ", field_style(focused)),
        Span::styled(
            format!("[{:<20}]", format!("{}{}", state.gate_name, cursor)),
            field_style(focused),
        ),
    ]));
    lines.push(Line::from(""));

    match &state.gate_error {
        Some(err) => lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Enter to continue, Esc to quit",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let rect = centered_rect(50, lines.len() as u16 + 3, area);
    let block = Block::default().borders(Borders::ALL).title(" Sign in ");
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, rect);
}
