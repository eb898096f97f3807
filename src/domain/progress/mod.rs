//! The section/progress completion model.
//!
//! This is the one reusable core of the application: the rules for when a
//! section counts as learned, when its quiz counts as completed, and how XP
//! and level accumulate. Every route handler and every maintenance repair
//! goes through this module instead of re-deriving the rules in SQL.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// XP needed to advance one level.
pub const XP_PER_LEVEL: i64 = 100;

/// Default XP granted for a correct answer (configurable per deployment).
pub const DEFAULT_XP_PER_CORRECT_ANSWER: i64 = 10;

/// Computes the level for a given XP total. Level 1 starts at 0 XP.
pub fn level_for_xp(total_xp: i64) -> i64 {
    total_xp.max(0) / XP_PER_LEVEL + 1
}

/// XP remaining until the next level boundary.
pub fn xp_to_next_level(total_xp: i64) -> i64 {
    let xp = total_xp.max(0);
    XP_PER_LEVEL - (xp % XP_PER_LEVEL)
}

/// XP award policy applied when grading an answer.
#[derive(Debug, Clone, Copy)]
pub struct XpPolicy {
    pub xp_per_correct_answer: i64,
}

impl Default for XpPolicy {
    fn default() -> Self {
        Self {
            xp_per_correct_answer: DEFAULT_XP_PER_CORRECT_ANSWER,
        }
    }
}

impl XpPolicy {
    pub fn new(xp_per_correct_answer: i64) -> Self {
        Self {
            xp_per_correct_answer,
        }
    }

    /// Decides the XP to award for an answer submission.
    ///
    /// XP is granted at most once per user/question pair: a resubmission
    /// never pays again, and a correct answer after an earlier wrong one
    /// pays only if nothing was awarded before.
    pub fn xp_for_answer(&self, is_correct: bool, previous: Option<&AnswerRecord>) -> i64 {
        if !is_correct {
            return 0;
        }
        match previous {
            Some(prev) if prev.xp_awarded > 0 => 0,
            _ => self.xp_per_correct_answer,
        }
    }
}

/// A user's stored answer to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub is_correct: bool,
    pub xp_awarded: i64,
}

/// Per-user score over one section's question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    pub total_questions: u32,
    pub answered: u32,
    pub correct: u32,
}

impl SectionScore {
    /// Builds a score, rejecting impossible count combinations.
    pub fn new(total_questions: u32, answered: u32, correct: u32) -> Result<Self, ValidationError> {
        if answered > total_questions {
            return Err(ValidationError::out_of_range(
                "answered",
                0,
                total_questions as i64,
                answered as i64,
            ));
        }
        if correct > answered {
            return Err(ValidationError::out_of_range(
                "correct",
                0,
                answered as i64,
                correct as i64,
            ));
        }
        Ok(Self {
            total_questions,
            answered,
            correct,
        })
    }

    /// Tallies a score from stored answer rows.
    pub fn from_answers(total_questions: u32, answers: &[AnswerRecord]) -> Self {
        let answered = answers.len().min(total_questions as usize) as u32;
        let correct = answers.iter().filter(|a| a.is_correct).count() as u32;
        Self {
            total_questions,
            answered,
            correct: correct.min(answered),
        }
    }

    /// A section's quiz is complete once every question has an answer.
    /// Sections with no questions are never completable.
    pub fn is_complete(&self) -> bool {
        self.total_questions > 0 && self.answered >= self.total_questions
    }

    /// All questions answered correctly.
    pub fn is_perfect(&self) -> bool {
        self.is_complete() && self.correct == self.total_questions
    }

    /// Share of correct answers over the whole question set, 0.0..=100.0.
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.correct as f64 * 100.0 / self.total_questions as f64
    }

    /// The completion row to persist, or None while questions remain.
    pub fn completion(&self) -> Option<CompletionRecord> {
        if !self.is_complete() {
            return None;
        }
        Some(CompletionRecord {
            score: self.correct,
            total_questions: self.total_questions,
            percentage: self.percentage(),
        })
    }
}

/// Persisted shape of a section completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
}

/// Per-user status of one section, as shown in module overviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionStatus {
    pub score: SectionScore,
    pub learned: bool,
    pub completed: bool,
}

impl SectionStatus {
    pub fn new(score: SectionScore, learned: bool, has_completion_row: bool) -> Self {
        Self {
            score,
            learned,
            // A stored completion row wins even if questions were later
            // added to the section; the maintenance rebuild reconciles it.
            completed: has_completion_row || score.is_complete(),
        }
    }
}
