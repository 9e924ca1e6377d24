use std::path::PathBuf;

use thiserror::Error;

/// Why a valid JSON document could not become a question set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("not a recognized question-set shape")]
    UnrecognizedShape,
    #[error("no usable questions")]
    NoUsableQuestions,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Parse(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("no home directory available for local storage")]
    NoDataDir,
}

#[derive(Error, Debug)]
pub enum GateError {
    #[error("wrong passcode")]
    WrongPasscode,
    #[error("enter a name or nickname")]
    MissingName,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
