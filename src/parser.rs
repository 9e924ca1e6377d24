//! Normalization of question-bank documents.
//!
//! Two loosely specified JSON shapes are accepted and reconciled into one
//! canonical [`QuestionSet`]. Shapes are tried in a fixed order: the
//! keyed-option form first, then the generic array form.

use std::collections::{BTreeMap, HashSet};

use log::debug;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{LoadError, SchemaError};
use crate::model::{AnswerOption, Basis, Question, QuestionSet};

pub const UNTITLED: &str = "Untitled question set";

/// Parse raw text into a question set. A leading byte-order mark and
/// surrounding whitespace are ignored.
pub fn parse_set(content: &str, name: &str) -> Result<QuestionSet, LoadError> {
    let trimmed = content.strip_prefix('\u{feff}').unwrap_or(content).trim();

    if looks_like_html(trimmed) {
        return Err(LoadError::Parse(
            "received an HTML page instead of JSON".to_string(),
        ));
    }

    let value: Value = serde_json::from_str(trimmed)?;
    Ok(normalize(&value, name)?)
}

fn looks_like_html(text: &str) -> bool {
    let head: String = text.chars().take(16).collect::<String>().to_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Convert an already parsed JSON value into the canonical form.
pub fn normalize(value: &Value, name: &str) -> Result<QuestionSet, SchemaError> {
    let (title, questions) = match RawDocument::sniff(value)? {
        RawDocument::Keyed(doc) => {
            let title = text_of(doc.title.as_ref())
                .or_else(|| text_of(doc.topic.as_ref()))
                .unwrap_or_else(|| UNTITLED.to_string());
            let questions = doc
                .questions
                .into_iter()
                .enumerate()
                .map(|(i, item)| item.into_question(i))
                .collect::<Vec<_>>();
            (title, questions)
        }
        RawDocument::Generic(doc) => {
            let title = text_of(doc.title)
                .or_else(|| text_of(doc.topic))
                .unwrap_or_else(|| UNTITLED.to_string());
            let mut questions = Vec::new();
            for (i, raw) in doc.items.iter().enumerate() {
                match GenericItem::deserialize(*raw) {
                    Ok(item) => questions.push(item.into_question(i)),
                    Err(e) => debug!("{}: skipping item {}: {}", name, i + 1, e),
                }
            }
            (title, questions)
        }
    };

    let questions = retain_usable(questions, name);
    if questions.is_empty() {
        return Err(SchemaError::NoUsableQuestions);
    }

    Ok(QuestionSet {
        name: name.to_string(),
        title,
        questions,
        digest: None,
    })
}

/// The outcome of shape sniffing. Nothing untyped escapes this enum.
enum RawDocument<'a> {
    Keyed(KeyedDocument),
    Generic(GenericDocument<'a>),
}

impl<'a> RawDocument<'a> {
    fn sniff(value: &'a Value) -> Result<Self, SchemaError> {
        if value.is_object() {
            if let Ok(doc) = KeyedDocument::deserialize(value) {
                return Ok(RawDocument::Keyed(doc));
            }
        }

        match value {
            Value::Array(items) => Ok(RawDocument::Generic(GenericDocument {
                title: None,
                topic: None,
                items: items.iter().collect(),
            })),
            Value::Object(map) => match map.get("questions") {
                Some(Value::Array(items)) => Ok(RawDocument::Generic(GenericDocument {
                    title: map.get("title"),
                    topic: map.get("topic"),
                    items: items.iter().collect(),
                })),
                _ => Err(SchemaError::UnrecognizedShape),
            },
            _ => Err(SchemaError::UnrecognizedShape),
        }
    }
}

#[derive(Deserialize)]
struct KeyedDocument {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    topic: Option<Value>,
    questions: Vec<KeyedItem>,
}

#[derive(Deserialize)]
struct KeyedItem {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    question: Option<Value>,
    options: BTreeMap<String, Value>,
    correct: Vec<String>,
    #[serde(default)]
    basis: Option<Value>,
    #[serde(default)]
    source: Option<Value>,
}

impl KeyedItem {
    fn into_question(self, position: usize) -> Question {
        let options = keyed_options(&self.options);
        let refs: Vec<AnswerRef> = self.correct.into_iter().map(AnswerRef::Id).collect();

        Question {
            id: question_id(self.id.as_ref(), position),
            text: text_of(self.question.as_ref()).unwrap_or_default(),
            options: mark_correct(options, &refs),
            basis: basis_of(self.basis.as_ref(), self.source.as_ref()),
        }
    }
}

struct GenericDocument<'a> {
    title: Option<&'a Value>,
    topic: Option<&'a Value>,
    items: Vec<&'a Value>,
}

#[derive(Deserialize)]
struct GenericItem {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    question: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    options: Option<RawOptions>,
    #[serde(default)]
    correct: Option<RawCorrect>,
    #[serde(default)]
    answer_index: Option<Value>,
    #[serde(default)]
    basis: Option<Value>,
    #[serde(default)]
    source: Option<Value>,
}

impl GenericItem {
    fn into_question(self, position: usize) -> Question {
        let options = match &self.options {
            Some(RawOptions::List(items)) => items
                .iter()
                .enumerate()
                .map(|(i, v)| AnswerOption {
                    id: position_label(i),
                    text: text_of(Some(v)).unwrap_or_default(),
                    is_correct: false,
                })
                .collect(),
            Some(RawOptions::Keyed(map)) => keyed_options(map),
            None => Vec::new(),
        };

        let refs = match self.correct {
            Some(RawCorrect::Many(refs)) => refs,
            Some(RawCorrect::One(r)) => vec![r],
            None => self
                .answer_index
                .as_ref()
                .and_then(Value::as_i64)
                .map(|i| vec![AnswerRef::Index(i)])
                .unwrap_or_default(),
        };

        let text = text_of(self.question.as_ref())
            .or_else(|| text_of(self.text.as_ref()))
            .unwrap_or_default();

        Question {
            id: question_id(self.id.as_ref(), position),
            text,
            options: mark_correct(options, &refs),
            basis: basis_of(self.basis.as_ref(), self.source.as_ref()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptions {
    List(Vec<Value>),
    Keyed(BTreeMap<String, Value>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCorrect {
    Many(Vec<AnswerRef>),
    One(AnswerRef),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerRef {
    Index(i64),
    Id(String),
    Other(IgnoredAny),
}

/// Spreadsheet-style label for an option position: 0 → "A", 25 → "Z",
/// 26 → "AA". Numeric and letter references must agree on this mapping.
pub fn position_label(position: usize) -> String {
    let mut n = position + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Options of the keyed form, ordered by key length and then by key, so that
/// spreadsheet ids keep their order past `Z` (`Z` < `AA` < `AB`).
fn keyed_options(map: &BTreeMap<String, Value>) -> Vec<AnswerOption> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    entries
        .into_iter()
        .map(|(key, v)| AnswerOption {
            id: key.clone(),
            text: text_of(Some(v)).unwrap_or_default(),
            is_correct: false,
        })
        .collect()
}

fn mark_correct(mut options: Vec<AnswerOption>, refs: &[AnswerRef]) -> Vec<AnswerOption> {
    for r in refs {
        let hit = match r {
            AnswerRef::Index(i) => usize::try_from(*i).ok().filter(|i| *i < options.len()),
            AnswerRef::Id(label) => {
                let label = label.trim();
                // Exact id first; a case-folded match only when it is unambiguous.
                options.iter().position(|o| o.id == label).or_else(|| {
                    let mut folded = options
                        .iter()
                        .enumerate()
                        .filter(|(_, o)| o.id.eq_ignore_ascii_case(label));
                    match (folded.next(), folded.next()) {
                        (Some((i, _)), None) => Some(i),
                        _ => None,
                    }
                })
            }
            AnswerRef::Other(_) => None,
        };
        if let Some(i) = hit {
            options[i].is_correct = true;
        }
    }
    options
}

fn retain_usable(questions: Vec<Question>, name: &str) -> Vec<Question> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut usable = Vec::with_capacity(questions.len());

    for mut q in questions {
        if q.options.is_empty() {
            debug!("{}: dropping question {} without options", name, q.id);
            continue;
        }
        if q.correct_count() == 0 {
            debug!("{}: dropping question {} without a correct option", name, q.id);
            continue;
        }
        if seen.contains(&q.id) {
            let base = q.id.clone();
            let mut n = 2;
            while seen.contains(&format!("{}-{}", base, n)) {
                n += 1;
            }
            q.id = format!("{}-{}", base, n);
            debug!("{}: duplicate question id {} renamed to {}", name, base, q.id);
        }
        seen.insert(q.id.clone());
        usable.push(q);
    }

    usable
}

fn question_id(raw: Option<&Value>, position: usize) -> String {
    match raw {
        None | Some(Value::Null) => (position + 1).to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Display text of a scalar. Empty strings count as absent.
fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn basis_of(label: Option<&Value>, href: Option<&Value>) -> Option<Basis> {
    let label = text_of(label)?;
    Some(Basis {
        label,
        href: text_of(href),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn correct_ids(q: &Question) -> Vec<&str> {
        q.correct_ids().collect()
    }

    #[test]
    fn test_keyed_form() {
        let doc = json!({
            "topic": "Company law",
            "questions": [
                {"id": 1, "question": "Q1", "options": {"B": "y", "A": "x"}, "correct": ["A"]},
                {"id": 2, "question": "Q2", "options": {"A": "x", "B": "y", "C": "z"}, "correct": ["A", "C"], "basis": "Art. 4"}
            ]
        });
        let set = normalize(&doc, "law").unwrap();
        assert_eq!(set.title, "Company law");
        assert_eq!(set.len(), 2);

        let q1 = &set.questions[0];
        assert_eq!(q1.id, "1");
        assert_eq!(q1.options[0].id, "A");
        assert_eq!(q1.options[0].text, "x");
        assert_eq!(correct_ids(q1), vec!["A"]);
        assert!(!q1.is_multi_select());

        let q2 = &set.questions[1];
        assert!(q2.is_multi_select());
        assert_eq!(q2.basis.as_ref().unwrap().label, "Art. 4");
        assert_eq!(q2.basis.as_ref().unwrap().href, None);
    }

    #[test]
    fn test_title_prefers_title_over_topic() {
        let doc = json!({
            "title": "Main", "topic": "Other",
            "questions": [{"question": "Q", "options": {"A": "x"}, "correct": ["A"]}]
        });
        assert_eq!(normalize(&doc, "s").unwrap().title, "Main");

        let doc = json!({"questions": [{"question": "Q", "options": {"A": "x"}, "correct": ["A"]}]});
        assert_eq!(normalize(&doc, "s").unwrap().title, UNTITLED);
    }

    #[test]
    fn test_generic_object_falls_back_to_topic() {
        // A scalar `correct` only fits the generic form.
        let doc = json!({
            "topic": "Company law",
            "questions": [{"question": "Q", "options": {"A": "x", "B": "y"}, "correct": "A"}]
        });
        let set = normalize(&doc, "s").unwrap();
        assert_eq!(set.title, "Company law");
        assert_eq!(correct_ids(&set.questions[0]), vec!["A"]);

        let doc = json!({"title": "", "topic": "Tax", "questions": [
            {"question": "Q", "options": ["x", "y"], "correct": [1]}
        ]});
        assert_eq!(normalize(&doc, "s").unwrap().title, "Tax");
    }

    #[test]
    fn test_keyed_options_past_z_keep_spreadsheet_order() {
        let doc = json!({"questions": [{
            "question": "Q",
            "options": {"AA": "27th", "B": "2nd", "A": "1st", "Z": "26th", "AB": "28th"},
            "correct": ["AA"]
        }]});
        let q = &normalize(&doc, "s").unwrap().questions[0];
        let ids: Vec<&str> = q.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "Z", "AA", "AB"]);
        assert_eq!(correct_ids(q), vec!["AA"]);
    }

    #[test]
    fn test_generic_array_with_indices() {
        let doc = json!([{"question": "Q", "options": ["x", "y", "z"], "correct": [0, 2]}]);
        let set = normalize(&doc, "arr").unwrap();
        let q = &set.questions[0];
        assert_eq!(q.id, "1");
        let ids: Vec<&str> = q.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(correct_ids(q), vec!["A", "C"]);
    }

    #[test]
    fn test_generic_answer_index() {
        let doc = json!({"title": "T", "questions": [
            {"text": "Q", "options": ["x", "y", "z", "w"], "answer_index": 2}
        ]});
        let set = normalize(&doc, "ai").unwrap();
        let q = &set.questions[0];
        assert_eq!(q.text, "Q");
        assert_eq!(correct_ids(q), vec!["C"]);
        assert_eq!(set.title, "T");
    }

    #[test]
    fn test_generic_letters_and_mixed_references_agree() {
        let doc = json!([
            {"question": "Q1", "options": ["x", "y", "z"], "correct": ["b", 2]},
            {"question": "Q2", "options": ["x", "y"], "correct": "B"}
        ]);
        let set = normalize(&doc, "mix").unwrap();
        assert_eq!(correct_ids(&set.questions[0]), vec!["B", "C"]);
        assert_eq!(correct_ids(&set.questions[1]), vec!["B"]);
    }

    #[test]
    fn test_generic_with_keyed_options_and_numeric_correct_falls_through() {
        // `correct` holds numbers, so the keyed form rejects it.
        let doc = json!({"questions": [
            {"question": "Q", "options": {"a": "x", "b": "y"}, "correct": [1], "source": "https://example.org"}
        ]});
        let set = normalize(&doc, "k").unwrap();
        let q = &set.questions[0];
        assert_eq!(correct_ids(q), vec!["b"]);
        assert!(q.basis.is_none());
    }

    #[test]
    fn test_empty_options_are_dropped() {
        let doc = json!({"questions": [
            {"question": "Q1", "options": {}, "correct": []},
            {"question": "Q2", "options": {"A": "x"}, "correct": ["A"]}
        ]});
        let set = normalize(&doc, "d").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.questions[0].text, "Q2");
    }

    #[test]
    fn test_duplicate_ids_are_made_unique() {
        let doc = json!([
            {"id": "q", "question": "Q1", "options": ["x"], "correct": [0]},
            {"id": "q", "question": "Q2", "options": ["x"], "correct": [0]},
            {"id": "q", "question": "Q3", "options": ["x"], "correct": [0]}
        ]);
        let set = normalize(&doc, "dup").unwrap();
        let ids: Vec<&str> = set.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q", "q-2", "q-3"]);
    }

    #[test]
    fn test_unrecognized_and_empty() {
        assert_eq!(normalize(&json!(42), "n"), Err(SchemaError::UnrecognizedShape));
        assert_eq!(normalize(&json!({"items": []}), "n"), Err(SchemaError::UnrecognizedShape));
        assert_eq!(normalize(&json!([]), "n"), Err(SchemaError::NoUsableQuestions));
        assert_eq!(
            normalize(&json!([null, 3, {"question": "Q", "options": []}]), "n"),
            Err(SchemaError::NoUsableQuestions)
        );
    }

    #[test]
    fn test_parse_set_strips_bom_and_rejects_html() {
        let text = "\u{feff}  [{\"question\":\"Q\",\"options\":[\"x\"],\"correct\":[0]}]\n";
        assert_eq!(parse_set(text, "bom").unwrap().len(), 1);

        assert!(matches!(
            parse_set("<!DOCTYPE html><html></html>", "html"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(parse_set("{not json", "bad"), Err(LoadError::Parse(_))));
        assert!(matches!(
            parse_set("{\"questions\": 3}", "shape"),
            Err(LoadError::Schema(SchemaError::UnrecognizedShape))
        ));
    }

    #[test]
    fn test_position_label() {
        assert_eq!(position_label(0), "A");
        assert_eq!(position_label(25), "Z");
        assert_eq!(position_label(26), "AA");
        assert_eq!(position_label(27), "AB");
    }
}
