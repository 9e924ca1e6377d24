use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::LoadError;
use crate::model::QuestionSet;
use crate::persist::atomic_write;
use crate::source::{list_json_files, MANIFEST_FILE};

/// Render a set in the keyed-option document form. Normalizing the result
/// gives back an equal set.
pub fn to_keyed_document(set: &QuestionSet) -> Value {
    let questions: Vec<Value> = set
        .questions
        .iter()
        .map(|q| {
            let options: Map<String, Value> = q
                .options
                .iter()
                .map(|o| (o.id.clone(), Value::String(o.text.clone())))
                .collect();
            let correct: Vec<&str> = q.correct_ids().collect();

            let mut item = json!({
                "id": q.id,
                "question": q.text,
                "options": options,
                "correct": correct,
            });
            if let Some(basis) = &q.basis {
                item["basis"] = Value::String(basis.label.clone());
                if let Some(href) = &basis.href {
                    item["source"] = Value::String(href.clone());
                }
            }
            item
        })
        .collect();

    json!({
        "title": set.title,
        "questions": questions,
    })
}

pub fn export_set(set: &QuestionSet, path: &Path) -> Result<(), LoadError> {
    let mut content = serde_json::to_string_pretty(&to_keyed_document(set))?;
    content.push('\n');
    fs::write(path, content).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `manifest.json` listing the directory's `.json` files, sorted.
pub fn write_manifest(dir: &Path) -> Result<(PathBuf, usize), LoadError> {
    let names: Vec<String> = list_json_files(dir)?
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();

    let manifest = dir.join(MANIFEST_FILE);
    let mut content = serde_json::to_string_pretty(&names)?;
    content.push('\n');
    atomic_write(&manifest, &content).map_err(|source| LoadError::Io {
        path: manifest.clone(),
        source,
    })?;
    Ok((manifest, names.len()))
}
