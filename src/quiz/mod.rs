pub mod bank;
pub mod feedback;
pub mod session;

pub use bank::{BankError, QuestionBank};
pub use feedback::{AnswerTag, Verdict};
pub use session::{Phase, QuizSession, SessionError, Snapshot};

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    #[serde(alias = "question")]
    pub text: String,
    pub answers: Vec<Answer>,
}
impl Question {
    pub fn new(text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            text: text.into(),
            answers,
        }
    }

    /// Index of the first correct answer, if the question has one.
    pub fn correct_index(&self) -> Option<usize> {
        self.answers.iter().position(|a| a.is_correct)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(rename = "correct")]
    pub is_correct: bool,
}
impl Answer {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}
