use std::io;
use std::time::Duration;

use log::{error, info};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::error::GateError;
use crate::persist::KeyValueStore;
use crate::scorer;
use crate::state::*;
use crate::stats;

pub fn run_tui(mut state: AppState, store: &mut dyn KeyValueStore) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let result = main_loop(&mut terminal, &mut state, store);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    store: &mut dyn KeyValueStore,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, state))
            .map_err(|e| format!("Draw error: {}", e))?;

        if state.should_quit {
            break;
        }

        // The poll timeout keeps the elapsed-time display ticking.
        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state, store);
                }
            }
        }
    }

    Ok(())
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn handle_key(key: KeyEvent, state: &mut AppState, store: &mut dyn KeyValueStore) {
    if state.has_dialog() {
        handle_dialog_key(key, state, store);
        return;
    }

    match state.screen {
        Screen::Gate => handle_gate_key(key, state, store),
        Screen::Setup => handle_setup_key(key, state),
        Screen::Quiz => handle_quiz_key(key, state, store),
        Screen::Results => handle_results_key(key, state),
    }
}

fn handle_gate_key(key: KeyEvent, state: &mut AppState, store: &mut dyn KeyValueStore) {
    if is_ctrl(&key, 'q') || key.code == KeyCode::Esc {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            if state.gate.requires_passcode() {
                state.gate_focus = match state.gate_focus {
                    GateFocus::Passcode => GateFocus::Name,
                    GateFocus::Name => GateFocus::Passcode,
                };
            }
        }
        KeyCode::Backspace => {
            state.gate_field_mut().pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.gate_field_mut().push(c);
            state.gate_error = None;
        }
        KeyCode::Enter => {
            if state.gate_focus == GateFocus::Passcode {
                state.gate_focus = GateFocus::Name;
                return;
            }
            submit_gate(state, store);
        }
        _ => {}
    }
}

fn submit_gate(state: &mut AppState, store: &mut dyn KeyValueStore) {
    match state
        .gate
        .enter(store, &state.gate_passcode, &state.gate_name)
    {
        Ok(name) => {
            info!("entered as {}", name);
            state.user_name = name;
            state.gate_error = None;
            state.stats = stats::read_stats(store, &state.user_name);
            state.screen = Screen::Setup;
        }
        Err(GateError::WrongPasscode) => {
            state.gate_passcode.clear();
            state.gate_focus = GateFocus::Passcode;
            state.gate_error = Some(GateError::WrongPasscode.to_string());
        }
        Err(e) => {
            state.gate_error = Some(e.to_string());
        }
    }
}

fn handle_setup_key(key: KeyEvent, state: &mut AppState) {
    if is_ctrl(&key, 'q') {
        state.should_quit = true;
        return;
    }
    match key.code {
        KeyCode::Up => state.select_set(state.selected_set.saturating_sub(1)),
        KeyCode::Down => state.select_set(state.selected_set + 1),
        KeyCode::Left | KeyCode::Char('-') => state.adjust_count(-1),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => state.adjust_count(1),
        KeyCode::PageDown => state.adjust_count(-10),
        KeyCode::PageUp => state.adjust_count(10),
        KeyCode::Enter => {
            if state.start_quiz() {
                info!(
                    "started {} questions from {}",
                    state.count(),
                    state.current_set().map_or("", |s| s.name.as_str())
                );
            }
        }
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        _ => {}
    }
}

fn handle_quiz_key(key: KeyEvent, state: &mut AppState, store: &mut dyn KeyValueStore) {
    if is_ctrl(&key, 'q') {
        state.push_dialog(Dialog::ConfirmQuit);
        return;
    }
    if is_ctrl(&key, 's') {
        request_finish(state, store);
        return;
    }

    let total = state.session.as_ref().map_or(0, |s| s.len());
    let current = state.session.as_ref().map_or(0, |s| s.cursor());
    match key.code {
        KeyCode::Left => state.navigate(false),
        KeyCode::Right => state.navigate(true),
        KeyCode::Up => state.move_option_cursor(false),
        KeyCode::Down => state.move_option_cursor(true),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let idx = state.option_cursor;
            state.pick_option(idx);
        }
        KeyCode::PageUp => state.go_to_question(current.saturating_sub(5)),
        KeyCode::PageDown => state.go_to_question((current + 5).min(total.saturating_sub(1))),
        KeyCode::Home => state.go_to_question(0),
        KeyCode::End => state.go_to_question(total.saturating_sub(1)),
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Esc => {
            if state.session.as_ref().map_or(false, |s| s.is_submitted()) {
                state.screen = Screen::Results;
            }
        }
        KeyCode::Char(c)
            if c.is_ascii_lowercase() && !key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            let idx = (c as u8 - b'a') as usize;
            state.pick_option(idx);
        }
        _ => {}
    }
}

/// Ctrl+S: finish only once every question is answered. A session under
/// review goes straight back to its results.
fn request_finish(state: &mut AppState, store: &mut dyn KeyValueStore) {
    let Some(session) = &state.session else {
        return;
    };
    if session.is_submitted() {
        show_results(state, store);
    } else if session.all_answered() {
        state.push_dialog(Dialog::ConfirmSubmit);
    } else {
        state.push_dialog(Dialog::NotAllAnswered(state.unanswered_count()));
    }
}

fn show_results(state: &mut AppState, store: &mut dyn KeyValueStore) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    session.submit();
    let report = scorer::score(session);

    match stats::record_submission(store, session, &state.user_name) {
        Ok(Some(updated)) => state.stats = updated,
        Ok(None) => {}
        Err(e) => {
            error!("could not save stats: {}", e);
            state.notices.push(format!("Stats were not saved: {}", e));
        }
    }

    state.report = Some(report);
    state.results_scroll = 0;
    state.screen = Screen::Results;
}

fn handle_results_key(key: KeyEvent, state: &mut AppState) {
    if is_ctrl(&key, 'q') {
        state.should_quit = true;
        return;
    }
    match key.code {
        KeyCode::Up => state.results_scroll = state.results_scroll.saturating_sub(1),
        KeyCode::Down => state.results_scroll += 1,
        KeyCode::PageUp => state.results_scroll = state.results_scroll.saturating_sub(10),
        KeyCode::PageDown => state.results_scroll += 10,
        KeyCode::Home => state.results_scroll = 0,
        KeyCode::Char('r') => {
            state.go_to_question(0);
            state.screen = Screen::Quiz;
        }
        KeyCode::Char('n') | KeyCode::Enter => state.screen = Screen::Setup,
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        _ => {}
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState, store: &mut dyn KeyValueStore) {
    let dialog = state.top_dialog().cloned();
    match dialog {
        Some(Dialog::ConfirmSubmit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                show_results(state, store);
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.should_quit = true;
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::NotAllAnswered(_)) => {
            state.pop_dialog();
        }
        Some(Dialog::Help) => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => {
                state.pop_dialog();
            }
            _ => {}
        },
        None => {}
    }
}
