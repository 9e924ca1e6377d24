use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::{AnswerOption, Question};
use crate::scorer::{classify, OptionMark};
use crate::session::QuizSession;
use crate::state::AppState;
use crate::ui::markdown::markdown_to_lines;

pub fn mark_style(mark: OptionMark) -> (&'static str, Style) {
    match mark {
        OptionMark::CorrectlyChosen => ("✓", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        OptionMark::IncorrectlyChosen => ("✗", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        OptionMark::Missed => ("!", Style::default().fg(Color::Yellow)),
        OptionMark::Neutral => (" ", Style::default().fg(Color::DarkGray)),
    }
}

/// One option row. Before submission it shows the selection box; after,
/// the option's mark against the correct answer.
pub fn option_line(
    idx: usize,
    option: &AnswerOption,
    question: &Question,
    session: &QuizSession,
    highlighted: bool,
) -> Line<'static> {
    let key = (b'a' + (idx % 26) as u8) as char;
    let selected = session.selected(&question.id);
    let chosen = session.is_selected(&question.id, &option.id);

    let (marker, style) = if session.is_submitted() {
        let (icon, style) = mark_style(classify(option, selected));
        (format!("[{}]", icon), style)
    } else {
        let marker = match (question.is_multi_select(), chosen) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(•)",
            (false, false) => "( )",
        };
        let style = if chosen {
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        (marker.to_string(), style)
    };

    let style = if highlighted {
        style.bg(Color::DarkGray)
    } else {
        style
    };

    Line::from(vec![
        Span::styled(format!(" {} ", key), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{} ", marker), style),
        Span::styled(format!("{}. {}", option.id, option.text), style),
    ])
}

pub fn basis_lines(question: &Question) -> Vec<Line<'static>> {
    let Some(basis) = &question.basis else {
        return Vec::new();
    };
    let mut spans = vec![
        Span::styled("Basis: ", Style::default().fg(Color::DarkGray)),
        Span::styled(basis.label.clone(), Style::default().add_modifier(Modifier::ITALIC)),
    ];
    if let Some(href) = &basis.href {
        spans.push(Span::styled(
            format!("  <{}>", href),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        ));
    }
    vec![Line::from(spans)]
}

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(session) = &state.session else {
        return;
    };
    let Some(question) = session.current_question() else {
        let p = Paragraph::new("No questions").block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(
            format!("Question {} of {}", session.cursor() + 1, session.len()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            if question.is_multi_select() {
                "   select all that apply"
            } else {
                "   select one"
            },
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(""));
    lines.extend(markdown_to_lines(&question.text));
    lines.push(Line::from(""));

    for (idx, option) in question.options.iter().enumerate() {
        let highlighted = !session.is_submitted() && idx == state.option_cursor;
        lines.push(option_line(idx, option, question, session, highlighted));
    }

    if session.is_submitted() {
        lines.push(Line::from(""));
        lines.extend(basis_lines(question));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(2)))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
