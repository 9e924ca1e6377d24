use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::AppState;

pub fn draw_setup(f: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let mut sets: Vec<Line> = Vec::new();
    for (idx, set) in state.sets.iter().enumerate() {
        let selected = idx == state.selected_set;
        let style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        sets.push(Line::from(vec![
            Span::styled(if selected { " ▸ " } else { "   " }, style),
            Span::styled(set.title.clone(), style),
            Span::styled(
                format!("  ({} questions, {})", set.len(), set.name),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    let sets_block = Block::default()
        .borders(Borders::RIGHT)
        .title(" Question sets ")
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(Paragraph::new(sets).block(sets_block), columns[0]);

    let available = state.current_set().map_or(0, |s| s.len());
    let mut info = vec![
        Line::from(vec![
            Span::raw("Questions per test: "),
            Span::styled(
                format!("◂ {} ▸", state.count()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  of {}", available), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start",
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(Span::styled("Your stats", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("  tests taken      {}", state.stats.tests_taken)),
        Line::from(format!(
            "  correct answers  {} / {}",
            state.stats.total_correct, state.stats.total_questions
        )),
        Line::from(format!("  average          {}%", state.stats.average_percent())),
    ];
    if let Some(last) = state.stats.last_percent {
        info.push(Line::from(format!("  last test        {}%", last)));
    }

    if !state.notices.is_empty() {
        info.push(Line::from(""));
        info.push(Line::from(Span::styled(
            "Notices",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        for notice in &state.notices {
            info.push(Line::from(Span::styled(
                format!("  {}", notice),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let info_block = Block::default().padding(Padding::new(2, 1, 1, 0));
    let widget = Paragraph::new(info).block(info_block).wrap(Wrap { trim: false });
    f.render_widget(widget, columns[1]);
}
