//! What the screen shows about a snapshot, without touching the session.

use crate::quiz::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerTag {
    Correct,
    IncorrectChosen,
    Neutral,
    Unrevealed,
}

/// One tag per answer of the current question, empty when no question is shown.
pub fn answer_tags(snapshot: &Snapshot<'_>) -> Vec<AnswerTag> {
    let question = match snapshot.current_question {
        Some(question) => question,
        None => return Vec::new(),
    };

    question
        .answers
        .iter()
        .enumerate()
        .map(|(i, answer)| {
            if !snapshot.is_answer_revealed {
                AnswerTag::Unrevealed
            } else if answer.is_correct {
                AnswerTag::Correct
            } else if snapshot.selected == Some(i) {
                AnswerTag::IncorrectChosen
            } else {
                AnswerTag::Neutral
            }
        })
        .collect()
}

pub fn progress_percent(snapshot: &Snapshot<'_>) -> u16 {
    if snapshot.total == 0 {
        return 0;
    }
    let percent = (snapshot.position + 1) * 100 / snapshot.total;
    percent.min(100) as u16
}

pub fn advance_label(snapshot: &Snapshot<'_>) -> &'static str {
    if snapshot.position + 1 < snapshot.total {
        "Next Question"
    } else {
        "Finish Quiz"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Perfect,
    Great,
    GoodEffort,
}

impl Verdict {
    pub fn for_score(score: usize, total: usize) -> Self {
        if score == total {
            Verdict::Perfect
        } else if score * 10 >= total * 7 {
            Verdict::Great
        } else {
            Verdict::GoodEffort
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect! You're a quiz master!",
            Verdict::Great => "Great job! Well done!",
            Verdict::GoodEffort => "Good effort! Try again to improve!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{fixtures, Phase, Question};

    fn snapshot(question: &Question, selected: Option<usize>) -> Snapshot<'_> {
        Snapshot {
            phase: if selected.is_some() {
                Phase::Feedback
            } else {
                Phase::Playing
            },
            current_question: Some(question),
            position: 0,
            total: 3,
            score: 0,
            selected,
            is_answer_revealed: selected.is_some(),
            set_name: Some("fixture"),
        }
    }

    #[test]
    fn tags_stay_hidden_until_an_answer_is_chosen() {
        let question = fixtures::question("q", 2);
        assert_eq!(
            answer_tags(&snapshot(&question, None)),
            vec![AnswerTag::Unrevealed; 4]
        );
    }

    #[test]
    fn wrong_choice_is_marked_next_to_the_correct_answer() {
        let question = fixtures::question("q", 2);
        assert_eq!(
            answer_tags(&snapshot(&question, Some(0))),
            vec![
                AnswerTag::IncorrectChosen,
                AnswerTag::Neutral,
                AnswerTag::Correct,
                AnswerTag::Neutral
            ]
        );
    }

    #[test]
    fn right_choice_only_shows_the_correct_answer() {
        let question = fixtures::question("q", 1);
        assert_eq!(
            answer_tags(&snapshot(&question, Some(1))),
            vec![
                AnswerTag::Neutral,
                AnswerTag::Correct,
                AnswerTag::Neutral,
                AnswerTag::Neutral
            ]
        );
    }

    #[test]
    fn no_question_means_no_tags() {
        let question = fixtures::question("q", 1);
        let mut snapshot = snapshot(&question, None);
        snapshot.current_question = None;
        assert!(answer_tags(&snapshot).is_empty());
    }

    #[test]
    fn progress_counts_the_current_question() {
        let question = fixtures::question("q", 1);
        let mut snapshot = snapshot(&question, None);
        assert_eq!(progress_percent(&snapshot), 33);
        assert_eq!(advance_label(&snapshot), "Next Question");

        snapshot.position = 2;
        assert_eq!(progress_percent(&snapshot), 100);
        assert_eq!(advance_label(&snapshot), "Finish Quiz");

        snapshot.total = 0;
        assert_eq!(progress_percent(&snapshot), 0);
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::for_score(3, 3), Verdict::Perfect);
        assert_eq!(Verdict::for_score(7, 10), Verdict::Great);
        assert_eq!(Verdict::for_score(6, 10), Verdict::GoodEffort);
        assert_eq!(Verdict::for_score(2, 3), Verdict::GoodEffort);
        assert_eq!(Verdict::for_score(0, 3), Verdict::GoodEffort);
        assert_eq!(
            Verdict::for_score(0, 3).message(),
            "Good effort! Try again to improve!"
        );
    }
}
