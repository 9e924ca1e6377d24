use serde::{Deserialize, Serialize};

/// One answer choice of a question. `id` is unique within its question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

/// Citation shown next to a question once the quiz is scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    pub label: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub basis: Option<Basis>,
}

impl Question {
    pub fn correct_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.id.as_str())
    }

    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }

    /// More than one correct option. Derived on every call so it can never
    /// disagree with the options themselves.
    pub fn is_multi_select(&self) -> bool {
        self.correct_count() > 1
    }

    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// A normalized question bank. Built once by the parser and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    /// Originating file name without the `.json` extension.
    pub name: String,
    pub title: String,
    pub questions: Vec<Question>,
    /// `sha256:<hex>` of the raw source bytes, when loaded from disk.
    pub digest: Option<String>,
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// Lifetime aggregate of one user's results, stored as a single JSON blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub name: String,
    pub total_correct: u64,
    pub total_questions: u64,
    pub tests_taken: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_percent: Option<u32>,
}

impl StatsRecord {
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total_correct: 0,
            total_questions: 0,
            tests_taken: 0,
            last_percent: None,
        }
    }

    pub fn average_percent(&self) -> u32 {
        crate::scorer::percent(self.total_correct as usize, self.total_questions as usize)
    }
}
