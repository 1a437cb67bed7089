use crate::error::QuizError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
    pub difficulty: String,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// Count shown in the header. Independent of `questions.len()`.
    pub total_questions: usize,
    pub questions: Vec<Question>,
}

fn default_difficulty() -> String {
    "Adaptive".to_string()
}

impl Quiz {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.total_questions == 0 {
            return Err(QuizError::Invalid {
                id: self.id.clone(),
                reason: "declared question count must be at least 1".to_string(),
            });
        }

        for question in &self.questions {
            if question.options.len() < 2 {
                return Err(QuizError::Invalid {
                    id: self.id.clone(),
                    reason: format!("question {} has fewer than two options", question.id),
                });
            }
            if question.correct >= question.options.len() {
                return Err(QuizError::Invalid {
                    id: self.id.clone(),
                    reason: format!(
                        "question {} marks option {} correct but has {} options",
                        question.id,
                        question.correct,
                        question.options.len()
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            subject: self.subject.clone(),
            question_count: self.questions.len(),
        }
    }
}

/// Catalog listing entry
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub question_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Answering,
    Feedback,
    Completed,
}

/// How an option is rendered for the question currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Incorrect,
    Selected,
    Neutral,
}

/// Outcome of a finished attempt, handed to the result recorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz_id: String,
    pub score: u8,
    pub correct_count: usize,
    pub question_count: usize,
    pub elapsed_secs: u64,
    pub answers: Vec<Option<usize>>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct TimerTick {
    pub epoch: u64,
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize, options: usize) -> Question {
        Question {
            id: 7,
            prompt: "Q?".to_string(),
            options: (0..options).map(|i| format!("opt {}", i)).collect(),
            correct,
            explanation: String::new(),
            difficulty: "Easy".to_string(),
            topic: "Topic".to_string(),
        }
    }

    fn quiz(questions: Vec<Question>) -> Quiz {
        Quiz {
            id: "q".to_string(),
            title: "Quiz".to_string(),
            subject: "Subject".to_string(),
            difficulty: "Adaptive".to_string(),
            total_questions: 10,
            questions,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_quiz() {
        assert!(quiz(vec![question(3, 4)]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_correct_index() {
        let err = quiz(vec![question(4, 4)]).validate().unwrap_err();
        assert!(matches!(err, QuizError::Invalid { .. }));
        assert!(err.to_string().contains("question 7"));
    }

    #[test]
    fn test_validate_rejects_single_option() {
        assert!(quiz(vec![question(0, 1)]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_declared_count() {
        let mut q = quiz(vec![]);
        q.total_questions = 0;
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_difficulty_defaults_when_missing() {
        let json = r#"{"id":"a","title":"T","subject":"S","total_questions":1,"questions":[]}"#;
        let q: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(q.difficulty, "Adaptive");
    }

    #[test]
    fn test_summary_uses_loaded_count() {
        let q = quiz(vec![question(0, 2), question(1, 2)]);
        let summary = q.summary();
        assert_eq!(summary.question_count, 2);
        assert_eq!(summary.id, "q");
    }
}
