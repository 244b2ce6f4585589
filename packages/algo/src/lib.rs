//! # brainbolt-algo - adaptive quiz scoring core
//!
//! Pure Rust implementation of the scoring engine behind the BrainBolt quiz:
//!
//! - **Item Bank** - static 3PL parameters for difficulty levels 1-10
//! - **Ability Estimator** - 3PL response model and Newton-Raphson MLE
//! - **Expected-Performance Model** - Elo rating scale and decaying K-factor
//! - **Score Composer** - point award with streak and accuracy modifiers
//!
//! ## Design
//!
//! - **No I/O** - state is passed in and handed back; persistence lives in the service
//! - **Stateless** - the only shared data is the read-only item bank
//! - **Bounded** - history caps and the iteration cap bound every call
//!
//! ## Modules
//!
//! - [`item_bank`] - item parameter table and lookup
//! - [`irt`] - response probability, Fisher information, ability estimation
//! - [`elo`] - rating scale mapping, expected score, K-factor
//! - [`scoring`] - modifiers, score composition, answer pipeline
//! - [`sanitize`] - clamping, rounding, state repair
//! - [`types`] - shared types and constants
//!
//! ## Example
//!
//! ```rust
//! use brainbolt_algo::{apply_answer, AnswerEvent, LearnerAbilityState};
//!
//! let prior = LearnerAbilityState::default();
//! let event = AnswerEvent {
//!     difficulty: 5,
//!     correct: true,
//!     streak: 0,
//!     total_answers: 1,
//!     recent_results: vec![],
//! };
//!
//! let (state, result) = apply_answer(&prior, &event).unwrap();
//! assert_eq!(result.new_theta, 0.3);
//! assert_eq!(state.response_history.len(), 1);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod elo;
pub mod error;
pub mod irt;
pub mod item_bank;
pub mod sanitize;
pub mod scoring;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use error::AlgoError;

pub use irt::{estimate_ability, fisher_information, response_probability, EstimatorOptions};

pub use elo::{difficulty_to_rating_scale, expected_score, k_factor, map_to_rating_scale};

pub use scoring::{
    accuracy_factor, apply_answer, compose_score, streak_multiplier, AnswerEvent, ScoreBreakdown,
    ScoreInputs, ScoreResult,
};
