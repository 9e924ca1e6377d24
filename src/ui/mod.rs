pub mod dialog;
pub mod gate;
pub mod keybar;
pub mod layout;
pub mod markdown;
pub mod question;
pub mod result;
pub mod setup;
pub mod sidebar;
pub mod statusbar;
pub mod titlebar;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();

    match state.screen {
        Screen::Gate => gate::draw_gate(f, area, state),
        Screen::Setup => draw_framed(f, area, state, setup::draw_setup),
        Screen::Quiz => draw_quiz(f, area, state),
        Screen::Results => draw_framed(f, area, state, result::draw_results),
    }

    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}

/// Title, status and key bars around a single full-width panel.
fn draw_framed(f: &mut Frame, area: Rect, state: &AppState, body: fn(&mut Frame, Rect, &AppState)) {
    let layout = layout::compute_layout(area, false);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    body(f, layout.main, state);
    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);
}

fn draw_quiz(f: &mut Frame, area: Rect, state: &AppState) {
    let layout = layout::compute_layout(area, true);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    sidebar::draw_sidebar(f, layout.sidebar, state);
    question::draw_question(f, layout.main, state);
    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);
}
