use log::{info, warn};
use serde_json::Value;

use crate::error::StoreError;
use crate::model::StatsRecord;
use crate::persist::{KeyValueStore, STATS_KEY};
use crate::scorer;
use crate::session::QuizSession;

/// Read the stored record. A missing or unreadable record yields an empty
/// one named `fallback_name`; bad numeric fields read as zero.
pub fn read_stats(store: &dyn KeyValueStore, fallback_name: &str) -> StatsRecord {
    let raw = match store.get(STATS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return StatsRecord::empty(fallback_name),
        Err(e) => {
            warn!("cannot read stats: {}", e);
            return StatsRecord::empty(fallback_name);
        }
    };

    let Ok(Value::Object(doc)) = serde_json::from_str::<Value>(&raw) else {
        warn!("stored stats are corrupt, starting over");
        return StatsRecord::empty(fallback_name);
    };

    let count = |key: &str| doc.get(key).and_then(number_of).unwrap_or(0);
    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback_name);

    StatsRecord {
        name: name.to_string(),
        total_correct: count("totalCorrect"),
        total_questions: count("totalQuestions"),
        tests_taken: count("testsTaken"),
        last_percent: doc
            .get("lastPercent")
            .and_then(number_of)
            .map(|p| p.min(100) as u32),
    }
}

/// A non-negative count stored as an integer, a float or a numeric string.
/// Fractions are rounded.
fn number_of(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then(|| n.round() as u64)
}

pub fn write_stats(store: &mut dyn KeyValueStore, record: &StatsRecord) -> Result<(), StoreError> {
    let json = serde_json::to_string(record)?;
    store.set(STATS_KEY, &json)
}

/// Fold a submitted session into the lifetime record, once.
///
/// Returns the new record, or `None` when the session is not submitted yet
/// or was already counted. Repeated calls for the same session never write.
pub fn record_submission(
    store: &mut dyn KeyValueStore,
    session: &mut QuizSession,
    user_name: &str,
) -> Result<Option<StatsRecord>, StoreError> {
    if !session.is_submitted() || session.stats_recorded() {
        return Ok(None);
    }

    let report = scorer::score(session);
    let prev = read_stats(store, user_name);
    let name = if user_name.is_empty() { prev.name.clone() } else { user_name.to_string() };

    let next = StatsRecord {
        name,
        total_correct: prev.total_correct + report.correct as u64,
        total_questions: prev.total_questions + report.total as u64,
        tests_taken: prev.tests_taken + 1,
        last_percent: Some(report.percent),
    };
    write_stats(store, &next)?;
    session.mark_stats_recorded();

    info!(
        "recorded {}/{} ({}%) for {}, {} tests so far",
        report.correct, report.total, report.percent, next.name, next.tests_taken
    );
    Ok(Some(next))
}

pub fn reset_stats(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(STATS_KEY)
}
