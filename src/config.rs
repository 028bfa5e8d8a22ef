use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::quiz::{BankError, QuestionBank};

/// Terminal trivia quiz.
#[derive(Debug, Parser)]
#[clap(name = "quiz-master", version)]
pub struct Opts {
    /// JSON question bank to play instead of the built-in one
    #[clap(short, long, env = "QUIZ_BANK")]
    pub bank: Option<PathBuf>,

    /// Seed for the question shuffle, for reproducible runs
    #[clap(short, long, env = "QUIZ_SEED")]
    pub seed: Option<u64>,

    /// Question set to play first
    #[clap(long, env = "QUIZ_FIRST_SET", default_value = "0")]
    pub first_set: usize,
}

impl Opts {
    pub fn load_bank(&self) -> Result<QuestionBank, BankError> {
        match &self.bank {
            Some(path) => QuestionBank::from_path(path),
            None => QuestionBank::builtin(),
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
