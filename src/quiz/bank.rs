use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::quiz::Question;

const BUILTIN_BANK: &str = include_str!("../../banks/default.json");

/// Errors raised while building a [`QuestionBank`]. All of them are
/// configuration mistakes: a bank that fails here never reaches a session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank has no question sets")]
    Empty,
    #[error("question set \"{name}\" has no questions")]
    EmptySet { name: String },
    #[error("question \"{question}\" in set \"{set}\" has no answers")]
    NoAnswers { set: String, question: String },
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse question bank: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionSet {
    pub name: String,
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }
}

/// Named question sets, validated once and then only ever read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    sets: Vec<QuestionSet>,
}

#[derive(serde::Deserialize)]
struct BankFile {
    sets: Vec<QuestionSet>,
}

impl QuestionBank {
    pub fn new(sets: Vec<QuestionSet>) -> Result<Self, BankError> {
        if sets.is_empty() {
            return Err(BankError::Empty);
        }

        for set in &sets {
            if set.questions.is_empty() {
                return Err(BankError::EmptySet {
                    name: set.name.clone(),
                });
            }
            for question in &set.questions {
                if question.answers.is_empty() {
                    return Err(BankError::NoAnswers {
                        set: set.name.clone(),
                        question: question.text.clone(),
                    });
                }
                // Tolerated: the session only needs a non-empty answer list
                if question.answers.len() != 4 {
                    warn!(
                        "Question {:?} in set {:?} has {} answers instead of 4",
                        question.text,
                        set.name,
                        question.answers.len()
                    );
                }
                let correct = question.answers.iter().filter(|a| a.is_correct).count();
                if correct != 1 {
                    warn!(
                        "Question {:?} in set {:?} has {} correct answers",
                        question.text, set.name, correct
                    );
                }
            }
        }

        debug!("Question bank ready with {} sets", sets.len());
        Ok(Self { sets })
    }

    /// The bank compiled into the binary.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_reader(BUILTIN_BANK.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BankError> {
        let file: BankFile = serde_json::from_reader(reader)?;
        Self::new(file.sets)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        debug!("Loading question bank from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Set chosen by a cursor that keeps counting across replays.
    pub fn set_at(&self, cursor: usize) -> &QuestionSet {
        &self.sets[cursor % self.sets.len()]
    }

    pub fn sets(&self) -> &[QuestionSet] {
        &self.sets
    }
}
