//! Common Types and Constants
//!
//! Shared data structures used across all engine modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Constants ====================

/// Largest number the converter can express in words
pub const MAX_WORD_NUMBER: u32 = 1000;

/// Sentinel returned for numbers beyond [`MAX_WORD_NUMBER`]
pub const NUMBER_TOO_LARGE: &str = "numero troppo grande";

/// Default probability of serving a review item instead of a fresh draw
pub const DEFAULT_REVIEW_PROBABILITY: f64 = 0.3;

/// Window of most recent attempts used for the average response time
pub const RECENT_WINDOW: usize = 20;

/// Window of most recent attempts used for trend analytics
pub const TREND_WINDOW: usize = 10;

/// Maximum number of "most challenging" numbers reported
pub const MOST_CHALLENGING_LIMIT: usize = 3;

/// Delay before auto-advancing to the next challenge after a correct answer (ms)
pub const AUTO_ADVANCE_DELAY_MS: u64 = 1500;

// ==================== Difficulty ====================

/// Difficulty level for number drills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Inclusive number range drawn from at a given difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRange {
    pub min: u32,
    pub max: u32,
}

impl Difficulty {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The fixed range this level draws from
    pub fn range(&self) -> DifficultyRange {
        match self {
            Difficulty::Easy => DifficultyRange { min: 1, max: 20 },
            Difficulty::Medium => DifficultyRange { min: 1, max: 100 },
            Difficulty::Hard => DifficultyRange { min: 1, max: 1000 },
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

// ==================== Review Items ====================

/// A previously missed number scheduled for re-presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// The number that was answered incorrectly
    pub number: u32,
    /// The expected word form
    pub correct_answer: String,
    /// When this number was last shown
    pub last_seen: DateTime<Utc>,
}

impl ReviewItem {
    /// Creates a review item stamped with the current time
    pub fn new(number: u32, correct_answer: &str) -> Self {
        Self {
            number,
            correct_answer: correct_answer.to_string(),
            last_seen: Utc::now(),
        }
    }
}

// ==================== Challenge State ====================

/// The currently presented number and its expected answer
///
/// Replaced wholesale on every challenge generation; only `attempt_count`
/// mutates while the challenge is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeState {
    /// The number being asked
    pub current_number: u32,
    /// The expected Italian word
    pub correct_answer: String,
    /// Whether this challenge was served from the review queue
    pub is_review_mode: bool,
    /// Explanation of the linguistic rule behind the word form, if any
    pub grammar_note: Option<String>,
    /// Submissions made against this challenge so far
    pub attempt_count: u32,
}

impl Default for ChallengeState {
    fn default() -> Self {
        Self {
            current_number: 1,
            correct_answer: String::new(),
            is_review_mode: false,
            grammar_note: None,
            attempt_count: 0,
        }
    }
}

// ==================== Attempt Records ====================

/// Whether an attempt was the first answer or a typed correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptType {
    Initial,
    Correction,
}

/// One immutable answer attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Unique record id (UUID v4)
    pub id: String,
    /// The number that was asked
    pub number: u32,
    /// Raw user input, unnormalized
    pub answer: String,
    /// The expected word form
    pub correct_answer: String,
    /// Whether the answer matched after normalization
    pub is_correct: bool,
    /// Time from presentation to submission (ms)
    pub time_to_answer_ms: i64,
    /// Whether a hint was shown for this challenge
    pub hints_used: bool,
    /// When the attempt was submitted
    pub timestamp: DateTime<Utc>,
    /// First answer or typed correction
    pub attempt_type: AttemptType,
}

impl AttemptRecord {
    /// Creates a record stamped with a fresh id and the current time
    pub fn new(
        number: u32,
        answer: &str,
        correct_answer: &str,
        is_correct: bool,
        time_to_answer_ms: i64,
        hints_used: bool,
        attempt_type: AttemptType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            number,
            answer: answer.to_string(),
            correct_answer: correct_answer.to_string(),
            is_correct,
            time_to_answer_ms,
            hints_used,
            timestamp: Utc::now(),
            attempt_type,
        }
    }
}

// ==================== Tests ====================
