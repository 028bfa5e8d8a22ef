use std::fmt::{Display, Formatter};
use std::sync::Arc;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::quiz::{Question, QuestionBank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    Feedback,
    Finished,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Start => write!(f, "Start"),
            Phase::Playing => write!(f, "Playing"),
            Phase::Feedback => write!(f, "Feedback"),
            Phase::Finished => write!(f, "Finished"),
        }
    }
}

/// Calls that the presentation layer should never make. They are reported
/// instead of being silently ignored, and leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no question is being asked in phase {phase}")]
    NotPlaying { phase: Phase },
    #[error("answer {index} does not exist, the question has {len} answers")]
    AnswerOutOfRange { index: usize, len: usize },
    #[error("cannot advance in phase {phase}, no answer has been submitted")]
    NotAwaitingAdvance { phase: Phase },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Scored { correct: bool },
    /// The current question already has an answer.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Playing,
    Feedback { selected: usize },
    Finished,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub current_question: Option<&'a Question>,
    pub position: usize,
    pub total: usize,
    pub score: usize,
    pub selected: Option<usize>,
    pub is_answer_revealed: bool,
    pub set_name: Option<&'a str>,
}

pub struct QuizSession<R> {
    bank: Arc<QuestionBank>,
    rng: R,
    set_cursor: usize,
    active_set: Option<usize>,
    active_questions: Vec<Question>,
    position: usize,
    score: usize,
    stage: Stage,
}

impl<R: Rng> QuizSession<R> {
    /// `set_cursor` picks the first set to play, counting from zero.
    pub fn new(bank: Arc<QuestionBank>, rng: R, set_cursor: usize) -> Self {
        Self {
            bank,
            rng,
            set_cursor,
            active_set: None,
            active_questions: Vec::new(),
            position: 0,
            score: 0,
            stage: Stage::Start,
        }
    }

    /// Deals a freshly shuffled copy of the set under the cursor.
    pub fn start(&mut self) {
        let index = self.set_cursor % self.bank.len();
        let set = self.bank.set_at(self.set_cursor);

        let mut questions = set.questions.clone();
        questions.shuffle(&mut self.rng);

        info!(
            "Starting quiz with set {:?} ({} questions)",
            set.name,
            questions.len()
        );

        self.active_set = Some(index);
        self.active_questions = questions;
        self.position = 0;
        self.score = 0;
        self.stage = Stage::Playing;
    }

    pub fn submit_answer(&mut self, answer_index: usize) -> Result<Submission, SessionError> {
        match self.stage {
            Stage::Feedback { .. } => {
                debug!("Ignoring answer {}, question already answered", answer_index);
                return Ok(Submission::Ignored);
            }
            Stage::Start | Stage::Finished => {
                return Err(SessionError::NotPlaying {
                    phase: self.phase(),
                });
            }
            Stage::Playing => {}
        }

        let question = &self.active_questions[self.position];
        let answer = question
            .answers
            .get(answer_index)
            .ok_or(SessionError::AnswerOutOfRange {
                index: answer_index,
                len: question.answers.len(),
            })?;

        let correct = answer.is_correct;
        if correct {
            self.score += 1;
        }
        self.stage = Stage::Feedback {
            selected: answer_index,
        };

        debug!(
            "Question {} answered with {} ({}), score {}",
            self.position + 1,
            answer_index,
            if correct { "correct" } else { "wrong" },
            self.score
        );
        Ok(Submission::Scored { correct })
    }

    pub fn advance(&mut self) -> Result<Phase, SessionError> {
        if !matches!(self.stage, Stage::Feedback { .. }) {
            return Err(SessionError::NotAwaitingAdvance {
                phase: self.phase(),
            });
        }

        if self.position + 1 < self.active_questions.len() {
            self.position += 1;
            self.stage = Stage::Playing;
            debug!("Moving on to question {}", self.position + 1);
        } else {
            self.stage = Stage::Finished;
            info!(
                "Quiz finished with {} of {} correct",
                self.score,
                self.active_questions.len()
            );
        }
        Ok(self.phase())
    }

    /// Moves the cursor to the next set and starts over.
    pub fn play_again(&mut self) {
        self.set_cursor = self.set_cursor.wrapping_add(1);
        self.start();
    }

    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Start => Phase::Start,
            Stage::Playing => Phase::Playing,
            Stage::Feedback { .. } => Phase::Feedback,
            Stage::Finished => Phase::Finished,
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.active_questions.len()
    }

    pub fn set_cursor(&self) -> usize {
        self.set_cursor
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let (current_question, selected) = match self.stage {
            Stage::Start | Stage::Finished => (None, None),
            Stage::Playing => (self.active_questions.get(self.position), None),
            Stage::Feedback { selected } => {
                (self.active_questions.get(self.position), Some(selected))
            }
        };

        Snapshot {
            phase: self.phase(),
            current_question,
            position: self.position,
            total: self.active_questions.len(),
            score: self.score,
            selected,
            is_answer_revealed: selected.is_some(),
            set_name: self
                .active_set
                .map(|index| self.bank.sets()[index].name.as_str()),
        }
    }
}
