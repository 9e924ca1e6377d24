use std::collections::BTreeSet;

use crate::model::{AnswerOption, Question};
use crate::session::QuizSession;

/// How an option is shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    CorrectlyChosen,
    IncorrectlyChosen,
    Missed,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
    pub outcomes: Vec<QuestionOutcome>,
}

/// All-or-nothing: the selection must equal the correct set exactly.
pub fn is_correct(question: &Question, selected: Option<&BTreeSet<String>>) -> bool {
    let correct: BTreeSet<&str> = question.correct_ids().collect();
    let chosen: BTreeSet<&str> = selected
        .map(|s| s.iter().map(String::as_str).collect())
        .unwrap_or_default();
    correct == chosen
}

pub fn score(session: &QuizSession) -> ScoreReport {
    let outcomes: Vec<QuestionOutcome> = session
        .questions()
        .iter()
        .map(|q| QuestionOutcome {
            question_id: q.id.clone(),
            correct: is_correct(q, session.selected(&q.id)),
        })
        .collect();

    let correct = outcomes.iter().filter(|o| o.correct).count();
    let total = outcomes.len();

    ScoreReport {
        correct,
        total,
        percent: percent(correct, total),
        outcomes,
    }
}

/// `round(100 * part / whole)`, halves rounding up; 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as u64 * 200 + whole as u64) / (whole as u64 * 2)) as u32
}

pub fn classify(option: &AnswerOption, selected: Option<&BTreeSet<String>>) -> OptionMark {
    let picked = selected.map(|s| s.contains(&option.id)).unwrap_or(false);
    match (option.is_correct, picked) {
        (true, true) => OptionMark::CorrectlyChosen,
        (false, true) => OptionMark::IncorrectlyChosen,
        (true, false) => OptionMark::Missed,
        (false, false) => OptionMark::Neutral,
    }
}

/// Comment shown under the score. Percentages outside the bands get none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Great,
    Middling,
    Focus,
    Poor,
}

impl Verdict {
    pub fn from_percent(percent: u32) -> Option<Self> {
        match percent {
            p if p > 80 => Some(Verdict::Great),
            50..=70 => Some(Verdict::Middling),
            40..=49 => Some(Verdict::Focus),
            p if p < 30 => Some(Verdict::Poor),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Great => "Great job! Excellent result!",
            Verdict::Middling => "Meh, you can do better.",
            Verdict::Focus => "You had better focus.",
            Verdict::Poor => "Ouch. Time to hit the books.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::normalize;
    use serde_json::json;

    fn select(set: &[&str]) -> BTreeSet<String> {
        set.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_question_scenario() {
        let doc = json!({"questions":[{"id":1,"question":"Q1","options":{"A":"x","B":"y"},"correct":["A"]}]});
        let set = normalize(&doc, "s").unwrap();

        let mut right = QuizSession::new(set.questions.clone());
        right.select("1", "A");
        let report = score(&right);
        assert_eq!((report.correct, report.total, report.percent), (1, 1, 100));

        let mut wrong = QuizSession::new(set.questions);
        wrong.select("1", "B");
        let report = score(&wrong);
        assert_eq!((report.correct, report.total, report.percent), (0, 1, 0));
    }

    #[test]
    fn test_multi_select_requires_exact_set() {
        let doc = json!([{"question":"Q","options":["x","y","z"],"correct":[0,2]}]);
        let q = normalize(&doc, "m").unwrap().questions.remove(0);

        assert!(is_correct(&q, Some(&select(&["A", "C"]))));
        assert!(is_correct(&q, Some(&select(&["C", "A"]))));
        assert!(!is_correct(&q, Some(&select(&["A"]))));
        assert!(!is_correct(&q, Some(&select(&["A", "B", "C"]))));
        assert!(!is_correct(&q, None));
    }

    #[test]
    fn test_selection_order_does_not_matter() {
        let doc = json!([{"id":"m","question":"Q","options":["x","y","z"],"correct":[0,1]}]);
        let questions = normalize(&doc, "m").unwrap().questions;

        let mut ab = QuizSession::new(questions.clone());
        ab.select("m", "A");
        ab.select("m", "B");
        let mut ba = QuizSession::new(questions);
        ba.select("m", "B");
        ba.select("m", "A");
        assert_eq!(score(&ab), score(&ba));
        assert_eq!(score(&ab).correct, 1);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn test_classification_is_exhaustive() {
        let doc = json!([{"question":"Q","options":["x","y","z","w"],"correct":[0,1]}]);
        let q = normalize(&doc, "c").unwrap().questions.remove(0);
        let chosen = select(&["A", "C"]);
        let marks: Vec<OptionMark> = q.options.iter().map(|o| classify(o, Some(&chosen))).collect();
        assert_eq!(
            marks,
            vec![
                OptionMark::CorrectlyChosen,
                OptionMark::Missed,
                OptionMark::IncorrectlyChosen,
                OptionMark::Neutral,
            ]
        );
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(Verdict::from_percent(100), Some(Verdict::Great));
        assert_eq!(Verdict::from_percent(75), None);
        assert_eq!(Verdict::from_percent(60), Some(Verdict::Middling));
        assert_eq!(Verdict::from_percent(45), Some(Verdict::Focus));
        assert_eq!(Verdict::from_percent(35), None);
        assert_eq!(Verdict::from_percent(0), Some(Verdict::Poor));
    }
}
