use crate::gate::Gate;
use crate::model::{QuestionSet, StatsRecord};
use crate::sampler;
use crate::scorer::{self, ScoreReport};
use crate::session::QuizSession;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Gate,
    Setup,
    Quiz,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmSubmit,
    NotAllAnswered(usize),
    ConfirmQuit,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateFocus {
    Passcode,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestionStatus {
    Unanswered,
    Answered,
    Correct,
    Incorrect,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub sets: Vec<QuestionSet>,
    pub selected_set: usize,
    /// The count the user asked for; the effective count depends on the
    /// selected set, see [`AppState::count`].
    pub requested_count: usize,
    pub session: Option<QuizSession>,
    pub report: Option<ScoreReport>,
    pub stats: StatsRecord,
    pub user_name: String,
    pub gate: Gate,
    pub gate_passcode: String,
    pub gate_name: String,
    pub gate_focus: GateFocus,
    pub gate_error: Option<String>,
    pub dialog_stack: Vec<Dialog>,
    /// Non-fatal problems to show on the setup screen.
    pub notices: Vec<String>,
    pub option_cursor: usize,
    pub results_scroll: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(sets: Vec<QuestionSet>, gate: Gate, default_count: usize) -> Self {
        Self {
            screen: Screen::Gate,
            sets,
            selected_set: 0,
            requested_count: default_count.max(1),
            session: None,
            report: None,
            stats: StatsRecord::empty(""),
            user_name: String::new(),
            gate_focus: if gate.requires_passcode() {
                GateFocus::Passcode
            } else {
                GateFocus::Name
            },
            gate,
            gate_passcode: String::new(),
            gate_name: String::new(),
            gate_error: None,
            dialog_stack: Vec::new(),
            notices: Vec::new(),
            option_cursor: 0,
            results_scroll: 0,
            should_quit: false,
        }
    }

    pub fn current_set(&self) -> Option<&QuestionSet> {
        self.sets.get(self.selected_set)
    }

    pub fn title(&self) -> &str {
        self.current_set().map(|s| s.title.as_str()).unwrap_or("Quiz Trainer")
    }

    fn clamped_count(&self, requested: i64) -> usize {
        sampler::clamp_count(requested, self.current_set().map_or(0, |s| s.len()))
    }

    /// Questions per test for the selected set.
    pub fn count(&self) -> usize {
        self.clamped_count(i64::try_from(self.requested_count).unwrap_or(i64::MAX))
    }

    pub fn select_set(&mut self, idx: usize) {
        if idx < self.sets.len() {
            self.selected_set = idx;
        }
    }

    /// Step the count shown on the setup screen. The new value becomes the
    /// request, so it survives switching to another set.
    pub fn adjust_count(&mut self, delta: i64) {
        let adjusted = self.clamped_count(self.count() as i64 + delta);
        if adjusted > 0 {
            self.requested_count = adjusted;
        }
    }

    /// Draw a fresh subset from the selected set and switch to the quiz.
    pub fn start_quiz(&mut self) -> bool {
        let Some(set) = self.current_set() else {
            return false;
        };
        let questions = sampler::sample_with_thread_rng(set, self.count());
        if questions.is_empty() {
            return false;
        }
        self.session = Some(QuizSession::new(questions));
        self.report = None;
        self.option_cursor = 0;
        self.results_scroll = 0;
        self.screen = Screen::Quiz;
        true
    }

    pub fn navigate(&mut self, forward: bool) {
        if let Some(session) = self.session.as_mut() {
            if forward {
                session.next();
            } else {
                session.prev();
            }
            self.option_cursor = 0;
        }
    }

    pub fn go_to_question(&mut self, idx: usize) {
        if let Some(session) = self.session.as_mut() {
            session.go_to(idx);
            self.option_cursor = 0;
        }
    }

    pub fn move_option_cursor(&mut self, down: bool) {
        let len = self
            .session
            .as_ref()
            .and_then(|s| s.current_question())
            .map_or(0, |q| q.options.len());
        if len == 0 {
            return;
        }
        self.option_cursor = if down {
            (self.option_cursor + 1).min(len - 1)
        } else {
            self.option_cursor.saturating_sub(1)
        };
    }

    pub fn pick_option(&mut self, idx: usize) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let picked = session.select_current(idx);
        if picked {
            self.option_cursor = idx;
        }
        picked
    }

    pub fn question_status(&self, idx: usize) -> QuestionStatus {
        let Some(session) = &self.session else {
            return QuestionStatus::Unanswered;
        };
        let Some(q) = session.questions().get(idx) else {
            return QuestionStatus::Unanswered;
        };
        if session.is_submitted() {
            if scorer::is_correct(q, session.selected(&q.id)) {
                QuestionStatus::Correct
            } else {
                QuestionStatus::Incorrect
            }
        } else if session.is_answered(&q.id) {
            QuestionStatus::Answered
        } else {
            QuestionStatus::Unanswered
        }
    }

    pub fn unanswered_count(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.len() - s.answered_count())
    }

    pub fn gate_field_mut(&mut self) -> &mut String {
        match self.gate_focus {
            GateFocus::Passcode => &mut self.gate_passcode,
            GateFocus::Name => &mut self.gate_name,
        }
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}
