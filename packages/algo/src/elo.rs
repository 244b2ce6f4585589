//! Elo-style Expected-Performance Model
//!
//! Places the learner (via theta) and the question (via difficulty level) on a
//! shared rating scale and uses the standard Elo logistic to predict the
//! learner's chance of answering correctly.
//!
//! - Learner rating: 1600 + 200·θ (θ ∈ [-4, 4] → 800..2400)
//! - Question rating: 800 + (level-1)·1600/9 (level 1 → 800, level 10 → 2400)
//! - Expected score: E = 1 / (1 + 10^((R_q - R_l) / 400))
//! - K-factor: 64·exp(-n/30) + 16, clamped to [16, 64]

// ==================== Constants ====================

const RATING_CENTER: f64 = 1600.0;
const RATING_PER_THETA: f64 = 200.0;
const DIFFICULTY_RATING_FLOOR: f64 = 800.0;
const DIFFICULTY_RATING_SPAN: f64 = 1600.0;
const DIFFICULTY_STEPS: f64 = 9.0;

/// Standard Elo scale factor
const ELO_SCALE: f64 = 400.0;

/// K-factor for a learner with no history
pub const K_MAX: f64 = 64.0;

/// K-factor floor once the estimate has stabilised
pub const K_MIN: f64 = 16.0;

/// Answers over which the K-factor decays by a factor of e
const K_DECAY_ANSWERS: f64 = 30.0;

// ==================== Rating Scale ====================

/// Learner rating for an ability estimate
pub fn map_to_rating_scale(theta: f64) -> f64 {
    RATING_CENTER + RATING_PER_THETA * theta
}

/// Question rating for a difficulty level
pub fn difficulty_to_rating_scale(level: u8) -> f64 {
    DIFFICULTY_RATING_FLOOR
        + (f64::from(level) - 1.0) * (DIFFICULTY_RATING_SPAN / DIFFICULTY_STEPS)
}

/// Expected score of a learner at `theta` against a question of `level`
pub fn expected_score(theta: f64, level: u8) -> f64 {
    let exponent =
        (difficulty_to_rating_scale(level) - map_to_rating_scale(theta)) / ELO_SCALE;
    1.0 / (1.0 + 10f64.powf(exponent))
}

/// Confidence-decaying K-factor.
///
/// The raw curve starts at 80 for a brand-new learner, so the cap binds for
/// roughly the first seven answers.
pub fn k_factor(total_answers_seen: u64) -> f64 {
    let decay = (-(total_answers_seen as f64) / K_DECAY_ANSWERS).exp();
    (K_MAX * decay + K_MIN).clamp(K_MIN, K_MAX)
}
