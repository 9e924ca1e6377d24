use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, Dialog};

pub fn draw_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(dialog) = state.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::ConfirmSubmit => draw_confirm_submit(f, area, state),
        Dialog::NotAllAnswered(left) => draw_not_all_answered(f, area, *left),
        Dialog::ConfirmQuit => draw_confirm_quit(f, area),
        Dialog::Help => draw_help(f, area),
    }
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn heading(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!("   {}", text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn confirm_cancel() -> Line<'static> {
    Line::from(vec![
        Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
    ])
}

fn render_box(f: &mut Frame, area: Rect, width: u16, lines: Vec<Line>, color: Color, title: &str) {
    let rect = centered_rect(width, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    if !title.is_empty() {
        block = block.title(format!(" {} ", title));
    }
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn draw_confirm_submit(f: &mut Frame, area: Rect, state: &AppState) {
    let total = state.session.as_ref().map_or(0, |s| s.len());
    let lines = vec![
        Line::from(""),
        heading("Finish the test?", Color::Yellow),
        Line::from(""),
        Line::from(format!("   All {} questions are answered.", total)),
        Line::from("   Answers cannot be changed afterwards."),
        Line::from(""),
        confirm_cancel(),
    ];
    render_box(f, area, 46, lines, Color::Yellow, "");
}

fn draw_not_all_answered(f: &mut Frame, area: Rect, left: usize) {
    let lines = vec![
        Line::from(""),
        heading("Cannot finish yet", Color::Yellow),
        Line::from(""),
        Line::from(format!("   {} question(s) still unanswered.", left)),
        Line::from(""),
        Line::from(Span::styled("            [OK]", Style::default().fg(Color::Green))),
    ];
    render_box(f, area, 42, lines, Color::Yellow, "");
}

fn draw_confirm_quit(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        heading("Quit?", Color::Yellow),
        Line::from(""),
        Line::from("   Unfinished tests are not counted."),
        Line::from(""),
        confirm_cancel(),
    ];
    render_box(f, area, 42, lines, Color::Yellow, "");
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        heading("Key Bindings", Color::Cyan),
        Line::from(""),
        Line::from("   ↑/↓        Move between options / sets"),
        Line::from("   ←/→        Previous/Next question"),
        Line::from("   PgUp/PgDn  Jump 5 questions"),
        Line::from("   Home/End   First/Last question"),
        Line::from("   a-z        Select/toggle option"),
        Line::from("   Space      Select highlighted option"),
        Line::from("   Ctrl+S     Finish the test"),
        Line::from("   r / n      Review / new test (results)"),
        Line::from("   Ctrl+Q     Quit"),
        Line::from("   ?          This help"),
        Line::from(""),
        Line::from(Span::styled("        [Esc] Close", Style::default().fg(Color::DarkGray))),
    ];
    render_box(f, area, 48, lines, Color::Cyan, "Help");
}
