use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::error::LoadError;
use crate::model::{AnswerOption, Basis, Question, QuestionSet};
use crate::parser;
use crate::persist::compute_digest;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const SAMPLE_SET_NAME: &str = "sample";

#[derive(Debug)]
pub struct LoadFailure {
    pub source: String,
    pub error: LoadError,
}

/// Everything gathered from a batch of paths. Bad sources are listed in
/// `failures` and never stop the rest from loading.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub sets: Vec<QuestionSet>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    fn add(&mut self, set: QuestionSet) {
        if let Some(digest) = &set.digest {
            if self.sets.iter().any(|s| s.digest.as_ref() == Some(digest)) {
                debug!("{}: identical to an already loaded set, skipped", set.name);
                return;
            }
        }
        match self.sets.iter_mut().find(|s| s.name == set.name) {
            Some(existing) => {
                debug!("{}: replaces an earlier set with the same name", set.name);
                *existing = set;
            }
            None => self.sets.push(set),
        }
    }

    fn fail(&mut self, source: &Path, error: LoadError) {
        warn!("skipping {}: {}", source.display(), error);
        self.failures.push(LoadFailure {
            source: source.display().to_string(),
            error,
        });
    }

    /// The loaded sets, or the built-in sample when nothing usable loaded.
    pub fn into_sets_or_sample(self) -> Vec<QuestionSet> {
        if self.sets.is_empty() {
            vec![sample_set()]
        } else {
            self.sets
        }
    }
}

/// Load question sets from files, directories and manifests.
pub fn load_sources(paths: &[PathBuf]) -> LoadReport {
    let mut report = LoadReport::default();
    for path in paths {
        load_path(path, &mut report);
    }
    report
}

fn load_path(path: &Path, report: &mut LoadReport) {
    if path.is_dir() {
        let manifest = path.join(MANIFEST_FILE);
        let files = if manifest.is_file() {
            manifest_files(&manifest)
        } else {
            list_json_files(path)
        };
        match files {
            Ok(files) => {
                for file in files {
                    load_into(&file, report);
                }
            }
            Err(e) => report.fail(path, e),
        }
    } else if is_manifest(path) {
        match manifest_files(path) {
            Ok(files) => {
                for file in files {
                    load_into(&file, report);
                }
            }
            Err(e) => report.fail(path, e),
        }
    } else if path.exists() && !is_json(path) {
        debug!("{}: not a .json file, ignored", path.display());
    } else {
        load_into(path, report);
    }
}

fn load_into(path: &Path, report: &mut LoadReport) {
    match load_file(path) {
        Ok(set) => report.add(set),
        Err(e) => report.fail(path, e),
    }
}

/// Read and normalize a single `.json` file.
pub fn load_file(path: &Path) -> Result<QuestionSet, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|e| LoadError::Parse(format!("not valid UTF-8: {}", e)))?;

    let mut set = parser::parse_set(text, &set_name(path))?;
    set.digest = Some(compute_digest(&bytes));
    Ok(set)
}

/// File name without the `.json` extension.
pub fn set_name(path: &Path) -> String {
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    match name.len().checked_sub(5) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".json") => {
            name[..cut].to_string()
        }
        _ => name,
    }
}

/// The `.json` entries of a manifest: a JSON array of file names. Other
/// entries are ignored.
pub fn read_manifest(path: &Path) -> Result<Vec<String>, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text).trim();

    match serde_json::from_str::<Value>(text)? {
        Value::Array(entries) => Ok(entries
            .iter()
            .filter_map(Value::as_str)
            .filter(|name| is_json(Path::new(name)) && !is_manifest(Path::new(name)))
            .map(str::to_string)
            .collect()),
        _ => Err(LoadError::Parse("manifest must be a JSON array of file names".to_string())),
    }
}

fn manifest_files(manifest: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let base = manifest.parent().unwrap_or(Path::new("."));
    Ok(read_manifest(manifest)?
        .into_iter()
        .map(|name| base.join(name))
        .collect())
}

/// Sorted `.json` files of a directory, excluding the manifest.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && is_json(&path) && !is_manifest(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("json"))
}

fn is_manifest(path: &Path) -> bool {
    path.file_name()
        .map_or(false, |n| n.to_string_lossy().eq_ignore_ascii_case(MANIFEST_FILE))
}

/// Built-in set used when no external set could be loaded, so the
/// application is always usable.
pub fn sample_set() -> QuestionSet {
    fn option(id: &str, text: &str, is_correct: bool) -> AnswerOption {
        AnswerOption {
            id: id.to_string(),
            text: text.to_string(),
            is_correct,
        }
    }

    QuestionSet {
        name: SAMPLE_SET_NAME.to_string(),
        title: "Sample set".to_string(),
        questions: vec![
            Question {
                id: "q1".to_string(),
                text: "Which of these are partnerships? (select all that apply)".to_string(),
                options: vec![
                    option("A", "General partnership", true),
                    option("B", "Limited partnership", true),
                    option("C", "Limited liability company", false),
                    option("D", "Public limited company", false),
                ],
                basis: Some(Basis {
                    label: "Commercial companies code, Title II: partnerships".to_string(),
                    href: None,
                }),
            },
            Question {
                id: "q2".to_string(),
                text: "Who counts as an entrepreneur?".to_string(),
                options: vec![
                    option("A", "A natural person running a business in their own name", true),
                    option("B", "Only capital companies", false),
                    option("C", "Only legal persons", false),
                    option("D", "Only entities entered in the company register", false),
                ],
                basis: Some(Basis {
                    label: "Civil code, art. 43(1)".to_string(),
                    href: None,
                }),
            },
        ],
        digest: None,
    }
}
