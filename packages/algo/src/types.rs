//! Common Types and Constants
//!
//! Shared data structures used across all algorithm modules.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Lower bound of the ability scale
pub const THETA_MIN: f64 = -4.0;

/// Upper bound of the ability scale
pub const THETA_MAX: f64 = 4.0;

/// Ability assigned to a learner with no history (average ability)
pub const THETA_INITIAL: f64 = 0.0;

/// Easiest difficulty level in the item bank
pub const MIN_DIFFICULTY: u8 = 1;

/// Hardest difficulty level in the item bank
pub const MAX_DIFFICULTY: u8 = 10;

/// Responses retained for likelihood estimation
pub const RESPONSE_HISTORY_CAP: usize = 50;

/// Theta snapshots retained for display
pub const THETA_HISTORY_CAP: usize = 100;

/// Numerical stability epsilon
pub const EPSILON: f64 = 1e-10;

// ==================== IRT Types ====================

/// 3PL item parameters for one difficulty level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemParameters {
    /// Discrimination a (> 0)
    pub a: f64,
    /// Difficulty b, on the theta scale
    pub b: f64,
    /// Guessing c, lower asymptote in [0, 1)
    pub c: f64,
}

/// A single answered question
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Difficulty level 1-10
    pub difficulty: u8,
    /// Whether the answer was correct
    pub correct: bool,
}

impl ResponseRecord {
    pub fn new(difficulty: u8, correct: bool) -> Self {
        Self {
            difficulty,
            correct,
        }
    }
}

// ==================== Learner State ====================

/// Per-learner ability state, persisted between answers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerAbilityState {
    pub theta: f64,
    #[serde(default)]
    pub theta_history: VecDeque<f64>,
    #[serde(default)]
    pub response_history: VecDeque<ResponseRecord>,
    #[serde(default, rename = "totalAnswers")]
    pub total_answers_seen: u64,
}

impl Default for LearnerAbilityState {
    fn default() -> Self {
        Self {
            theta: THETA_INITIAL,
            theta_history: VecDeque::new(),
            response_history: VecDeque::new(),
            total_answers_seen: 0,
        }
    }
}

impl LearnerAbilityState {
    /// Append a response, dropping the oldest beyond the cap
    pub fn push_response(&mut self, record: ResponseRecord) {
        self.response_history.push_back(record);
        while self.response_history.len() > RESPONSE_HISTORY_CAP {
            self.response_history.pop_front();
        }
    }

    /// Append a theta snapshot, dropping the oldest beyond the cap
    pub fn push_theta(&mut self, theta: f64) {
        self.theta_history.push_back(theta);
        while self.theta_history.len() > THETA_HISTORY_CAP {
            self.theta_history.pop_front();
        }
    }
}
