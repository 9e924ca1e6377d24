use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::model::Question;

/// One run through a sampled subset of a question set.
///
/// Holds the selections per question id, a cursor, and the submitted flag.
/// Selections are sets: the order in which options were picked is not kept.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: HashMap<String, BTreeSet<String>>,
    cursor: usize,
    started_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    stats_recorded: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            cursor: 0,
            started_at: Utc::now(),
            submitted_at: None,
            stats_recorded: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    pub fn go_to(&mut self, idx: usize) {
        if !self.questions.is_empty() {
            self.cursor = idx.min(self.questions.len() - 1);
        }
    }

    pub fn next(&mut self) {
        self.go_to(self.cursor + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.cursor.saturating_sub(1));
    }

    /// Record a click on `option_id`.
    ///
    /// Single-answer questions keep exactly the last pick; multi-answer
    /// questions toggle the option in or out. Returns false when nothing
    /// changed (unknown ids, or the session is already submitted).
    pub fn select(&mut self, question_id: &str, option_id: &str) -> bool {
        if self.is_submitted() {
            return false;
        }
        let Some(question) = self.questions.iter().find(|q| q.id == question_id) else {
            return false;
        };
        if question.option(option_id).is_none() {
            return false;
        }

        let multi = question.is_multi_select();
        let selected = self.answers.entry(question_id.to_string()).or_default();
        if multi {
            if !selected.remove(option_id) {
                selected.insert(option_id.to_string());
            }
        } else {
            selected.clear();
            selected.insert(option_id.to_string());
        }
        true
    }

    /// Select by position within the current question.
    pub fn select_current(&mut self, option_idx: usize) -> bool {
        let Some(q) = self.current_question() else {
            return false;
        };
        let Some(option) = q.options.get(option_idx) else {
            return false;
        };
        let (qid, oid) = (q.id.clone(), option.id.clone());
        self.select(&qid, &oid)
    }

    pub fn selected(&self, question_id: &str) -> Option<&BTreeSet<String>> {
        self.answers.get(question_id)
    }

    pub fn is_selected(&self, question_id: &str, option_id: &str) -> bool {
        self.answers
            .get(question_id)
            .map(|s| s.contains(option_id))
            .unwrap_or(false)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers
            .get(question_id)
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.is_answered(&q.id))
            .count()
    }

    /// True when every question has at least one selected option.
    pub fn all_answered(&self) -> bool {
        !self.questions.is_empty() && self.answered_count() == self.questions.len()
    }

    pub fn progress_percent(&self) -> u32 {
        crate::scorer::percent(self.answered_count(), self.questions.len())
    }

    /// Freeze the selections. Returns false if already submitted.
    pub fn submit(&mut self) -> bool {
        if self.is_submitted() {
            return false;
        }
        self.submitted_at = Some(Utc::now());
        true
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    pub fn elapsed_seconds(&self) -> i64 {
        let end = self.submitted_at.unwrap_or_else(Utc::now);
        end.signed_duration_since(self.started_at).num_seconds().max(0)
    }

    pub(crate) fn stats_recorded(&self) -> bool {
        self.stats_recorded
    }

    pub(crate) fn mark_stats_recorded(&mut self) {
        self.stats_recorded = true;
    }
}

/// `HH:MM:SS` for an elapsed time in seconds.
pub fn format_elapsed(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}
