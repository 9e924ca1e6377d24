use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Render question text. Plain text passes through as one line per
/// paragraph; emphasis, inline code and lists get terminal styling.
pub fn markdown_to_lines(text: &str) -> Vec<Line<'static>> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut styles: Vec<Style> = vec![Style::default()];

    let flush = |spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        if !spans.is_empty() {
            lines.push(Line::from(std::mem::take(spans)));
        }
    };

    for event in Parser::new_ext(text, opts) {
        let top = *styles.last().unwrap_or(&Style::default());
        match event {
            Event::Start(Tag::Strong) => styles.push(top.add_modifier(Modifier::BOLD)),
            Event::Start(Tag::Emphasis) => styles.push(top.add_modifier(Modifier::ITALIC)),
            Event::Start(Tag::Strikethrough) => styles.push(top.add_modifier(Modifier::CROSSED_OUT)),
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough) => {
                styles.pop();
            }
            Event::Start(Tag::Heading { level, .. }) => {
                let modifier = if level == HeadingLevel::H1 {
                    Modifier::BOLD | Modifier::UNDERLINED
                } else {
                    Modifier::BOLD
                };
                styles.push(top.add_modifier(modifier));
            }
            Event::End(TagEnd::Heading(_)) => {
                styles.pop();
                flush(&mut spans, &mut lines);
                lines.push(Line::from(""));
            }
            Event::Start(Tag::Item) => spans.push(Span::raw("  • ")),
            Event::End(TagEnd::Item) => flush(&mut spans, &mut lines),
            Event::End(TagEnd::List(_)) => lines.push(Line::from("")),
            Event::End(TagEnd::Paragraph) => {
                flush(&mut spans, &mut lines);
                lines.push(Line::from(""));
            }
            Event::Text(t) => {
                for (i, part) in t.split('\n').enumerate() {
                    if i > 0 {
                        flush(&mut spans, &mut lines);
                    }
                    if !part.is_empty() {
                        spans.push(Span::styled(part.to_string(), top));
                    }
                }
            }
            Event::Code(code) => spans.push(Span::styled(
                code.to_string(),
                Style::default().fg(Color::Yellow),
            )),
            Event::SoftBreak => spans.push(Span::raw(" ")),
            Event::HardBreak => flush(&mut spans, &mut lines),
            Event::Rule => lines.push(Line::from(Span::styled(
                "─".repeat(40),
                Style::default().fg(Color::DarkGray),
            ))),
            _ => {}
        }
    }
    flush(&mut spans, &mut lines);

    while lines.last().map_or(false, |l| l.width() == 0) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_plain_text_is_one_line() {
        let lines = markdown_to_lines("Who counts as an entrepreneur?");
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "Who counts as an entrepreneur?");
    }

    #[test]
    fn test_bold_span_is_styled() {
        let lines = markdown_to_lines("Pick **all** that apply");
        assert_eq!(plain(&lines[0]), "Pick all that apply");
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_list_items_get_bullets() {
        let lines = markdown_to_lines("Given:\n\n- one\n- two");
        let rendered: Vec<String> = lines.iter().map(plain).collect();
        assert!(rendered.contains(&"  • one".to_string()));
        assert!(rendered.contains(&"  • two".to_string()));
    }
}
