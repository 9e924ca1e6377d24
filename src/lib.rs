//! # quiztrainer
//!
//! Terminal trainer for multiple-choice question banks.
//!
//! Question sets are JSON files in one of two shapes (keyed options or
//! option arrays); [`parser`] folds both into one [`model::QuestionSet`].
//! A test draws a random subset with [`sampler`], tracks answers in a
//! [`session::QuizSession`], and is graded all-or-nothing by [`scorer`].
//! Lifetime results live in a [`persist::KeyValueStore`] via [`stats`].
//!
//! ```rust,no_run
//! use quiztrainer::{parser, sampler, scorer, session::QuizSession};
//!
//! let json = std::fs::read_to_string("law.json").unwrap();
//! let set = parser::parse_set(&json, "law").unwrap();
//! let mut session = QuizSession::new(sampler::sample_with_thread_rng(&set, 10));
//! session.select_current(0);
//! session.submit();
//! println!("{}%", scorer::score(&session).percent);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gate;
pub mod model;
pub mod parser;
pub mod persist;
pub mod sampler;
pub mod scorer;
pub mod session;
pub mod source;
pub mod state;
pub mod stats;
pub mod tui;
pub mod ui;

pub use error::{ConfigError, GateError, LoadError, SchemaError, StoreError};
pub use model::{AnswerOption, Basis, Question, QuestionSet, StatsRecord};
