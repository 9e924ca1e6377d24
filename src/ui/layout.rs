use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub titlebar: Rect,
    pub sidebar: Rect,
    pub main: Rect,
    pub statusbar: Rect,
    pub keybar: Rect,
}

/// Split the screen into bars and content. Without a sidebar the sidebar
/// rect is zero-width and `main` takes the whole middle row.
pub fn compute_layout(area: Rect, with_sidebar: bool) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // titlebar
            Constraint::Min(5),    // middle
            Constraint::Length(1), // statusbar
            Constraint::Length(1), // keybar
        ])
        .split(area);

    let sidebar_width = if with_sidebar { 24 } else { 0 };
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(vertical[1]);

    AppLayout {
        titlebar: vertical[0],
        sidebar: middle[0],
        main: middle[1],
        statusbar: vertical[2],
        keybar: vertical[3],
    }
}
