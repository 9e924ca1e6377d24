use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};
use ratatui::Frame;

use crate::scorer::{OptionMark, Verdict};
use crate::session::format_elapsed;
use crate::state::AppState;
use crate::ui::question::{basis_lines, mark_style, option_line};
use crate::ui::sidebar::status_icon;

fn legend() -> Line<'static> {
    let mut spans = vec![Span::raw("Legend: ")];
    for (mark, label) in [
        (OptionMark::CorrectlyChosen, "your correct answer"),
        (OptionMark::IncorrectlyChosen, "your wrong answer"),
        (OptionMark::Missed, "correct, not chosen"),
    ] {
        let (icon, style) = mark_style(mark);
        spans.push(Span::styled(format!("[{}]", icon), style));
        spans.push(Span::raw(format!(" {}   ", label)));
    }
    Line::from(spans)
}

pub fn result_lines(state: &AppState) -> Vec<Line<'static>> {
    let (Some(session), Some(report)) = (&state.session, &state.report) else {
        return vec![Line::from("No results yet.")];
    };

    let score_color = if report.percent >= 50 { Color::Green } else { Color::Red };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{}/{} ({}%)", report.correct, report.total, report.percent),
                Style::default().fg(score_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   time {}", format_elapsed(session.elapsed_seconds())),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    if let Some(verdict) = Verdict::from_percent(report.percent) {
        lines.push(Line::from(Span::styled(
            verdict.message(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let stats = &state.stats;
    lines.push(Line::from(Span::styled(
        format!(
            "{}: {} tests, {} of {} correct overall, average {}%",
            if stats.name.is_empty() { state.user_name.as_str() } else { stats.name.as_str() },
            stats.tests_taken,
            stats.total_correct,
            stats.total_questions,
            stats.average_percent()
        ),
        Style::default().fg(Color::DarkGray),
    )));
    for notice in &state.notices {
        lines.push(Line::from(Span::styled(notice.clone(), Style::default().fg(Color::Red))));
    }
    lines.push(Line::from(""));
    lines.push(legend());

    for (idx, question) in session.questions().iter().enumerate() {
        let (icon, color) = status_icon(state.question_status(idx));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", icon), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{}. {}", idx + 1, question.text),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        for (oi, option) in question.options.iter().enumerate() {
            lines.push(option_line(oi, option, question, session, false));
        }
        lines.extend(basis_lines(question));
    }
    lines
}

pub fn draw_results(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = result_lines(state);
    let total = lines.len();
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = state.results_scroll.min(total.saturating_sub(visible));

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .title(" Results ")
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(2));
    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    f.render_widget(widget, area);

    if total > visible {
        let mut scrollbar_state = ScrollbarState::new(total).position(scroll);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}
