//! Score Composer
//!
//! Turns one answer into a point award by blending:
//! - IRT component: difficulty weighted by normalized Fisher information at
//!   the updated ability
//! - Elo component: reward for beating the expected score (never a penalty)
//! - Streak and rolling-accuracy multipliers
//!
//! Incorrect answers earn nothing; their cost shows up as a lower theta.
//! Correct answers always earn at least one point.

use serde::Serialize;

use crate::elo::{expected_score, k_factor};
use crate::error::AlgoError;
use crate::irt::{estimate_ability, fisher_information, item_probability};
use crate::item_bank;
use crate::sanitize::round_to;
use crate::types::{ItemParameters, LearnerAbilityState, ResponseRecord};

// ==================== Constants ====================

const STREAK_STEP: f64 = 0.25;
const MAX_STREAK_MULTIPLIER: f64 = 4.0;

/// Accuracy floor so a bad run still scores something
const ACCURACY_FLOOR: f64 = 0.1;

/// Accuracy assumed when no recent results are known
const DEFAULT_ACCURACY: f64 = 0.5;

/// Fisher information rarely exceeds this for the item bank's range
const FISHER_INFO_SCALE: f64 = 3.0;

const POINTS_PER_LEVEL: u32 = 10;
const ELO_COMPONENT_WEIGHT: f64 = 50.0;
const MIN_CORRECT_SCORE: f64 = 1.0;

const THETA_DECIMALS: i32 = 4;
const POINT_DECIMALS: i32 = 2;

// ==================== Data Structures ====================

/// One answer as reported by the quiz
#[derive(Clone, Debug)]
pub struct AnswerEvent {
    pub difficulty: i64,
    pub correct: bool,
    pub streak: u32,
    pub total_answers: u64,
    pub recent_results: Vec<bool>,
}

/// Everything the composer needs, already resolved
#[derive(Clone, Copy, Debug)]
pub struct ScoreInputs<'a> {
    pub prior_theta: f64,
    pub updated_theta: f64,
    pub difficulty: u8,
    pub item: ItemParameters,
    pub correct: bool,
    pub streak: u32,
    pub recent_results: &'a [bool],
    pub total_answers: u64,
}

/// Intermediate quantities, reported for debugging
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base_difficulty: u32,
    pub normalized_info: f64,
    pub elo_component: f64,
    pub k_factor: f64,
    pub streak_multiplier: f64,
    pub accuracy_factor: f64,
}

/// Point award and refreshed ability for one answer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score_delta: f64,
    pub new_theta: f64,
    pub theta_delta: f64,
    pub irt_probability: f64,
    pub elo_expected: f64,
    pub streak_multiplier: f64,
    pub accuracy_factor: f64,
    pub breakdown: ScoreBreakdown,
}

// ==================== Modifiers ====================

/// 1.0 plus 0.25 per streak step, capped at 4.0
pub fn streak_multiplier(streak: u32) -> f64 {
    (1.0 + STREAK_STEP * f64::from(streak)).min(MAX_STREAK_MULTIPLIER)
}

/// Share of correct answers in the recent sample, floored at 0.1
pub fn accuracy_factor(recent_results: &[bool]) -> f64 {
    if recent_results.is_empty() {
        return DEFAULT_ACCURACY;
    }
    let correct = recent_results.iter().filter(|&&r| r).count();
    (correct as f64 / recent_results.len() as f64).max(ACCURACY_FLOOR)
}

// ==================== Composition ====================

/// Compose the point award for one answer
pub fn compose_score(inputs: &ScoreInputs<'_>) -> ScoreResult {
    let streak_multiplier = streak_multiplier(inputs.streak);
    let accuracy_factor = accuracy_factor(inputs.recent_results);

    let info = fisher_information(inputs.updated_theta, &inputs.item);
    let normalized_info = (info / FISHER_INFO_SCALE).min(1.0);

    let k = k_factor(inputs.total_answers);
    let elo_expected = expected_score(inputs.prior_theta, inputs.difficulty);
    let actual = if inputs.correct { 1.0 } else { 0.0 };
    let elo_delta = k * (actual - elo_expected);

    let base_difficulty = u32::from(inputs.difficulty) * POINTS_PER_LEVEL;

    let (score_delta, elo_component) = if inputs.correct {
        let irt_component = f64::from(base_difficulty) * normalized_info;
        let elo_component = elo_delta.max(0.0) * ELO_COMPONENT_WEIGHT;
        let raw = (irt_component + elo_component) * streak_multiplier * accuracy_factor;
        (
            round_to(raw.max(MIN_CORRECT_SCORE), POINT_DECIMALS),
            elo_component,
        )
    } else {
        (0.0, 0.0)
    };

    ScoreResult {
        score_delta,
        new_theta: round_to(inputs.updated_theta, THETA_DECIMALS),
        theta_delta: round_to(inputs.updated_theta - inputs.prior_theta, THETA_DECIMALS),
        irt_probability: round_to(
            item_probability(inputs.prior_theta, &inputs.item),
            THETA_DECIMALS,
        ),
        elo_expected: round_to(elo_expected, THETA_DECIMALS),
        streak_multiplier,
        accuracy_factor,
        breakdown: ScoreBreakdown {
            base_difficulty,
            normalized_info: round_to(normalized_info, THETA_DECIMALS),
            elo_component: round_to(elo_component, POINT_DECIMALS),
            k_factor: round_to(k, POINT_DECIMALS),
            streak_multiplier,
            accuracy_factor,
        },
    }
}

/// Apply one answer to a learner's state.
///
/// The prior state is left untouched; an invalid difficulty is rejected
/// before any work is done.
pub fn apply_answer(
    prior: &LearnerAbilityState,
    event: &AnswerEvent,
) -> Result<(LearnerAbilityState, ScoreResult), AlgoError> {
    let difficulty = item_bank::validate_level(event.difficulty)?;
    let item = item_bank::lookup(event.difficulty)?;

    let mut state = prior.clone();
    let prior_theta = state.theta;

    state.push_response(ResponseRecord::new(difficulty, event.correct));
    let updated_theta = estimate_ability(prior_theta, state.response_history.make_contiguous());

    let result = compose_score(&ScoreInputs {
        prior_theta,
        updated_theta,
        difficulty,
        item,
        correct: event.correct,
        streak: event.streak,
        recent_results: &event.recent_results,
        total_answers: event.total_answers,
    });

    state.push_theta(round_to(updated_theta, THETA_DECIMALS));
    state.theta = updated_theta;
    state.total_answers_seen = event.total_answers;

    Ok((state, result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(difficulty: i64, correct: bool) -> AnswerEvent {
        AnswerEvent {
            difficulty,
            correct,
            streak: 0,
            total_answers: 1,
            recent_results: Vec::new(),
        }
    }

    // ==================== Modifier Tests ====================

    #[test]
    fn test_streak_multiplier_steps_and_cap() {
        assert_eq!(streak_multiplier(0), 1.0);
        assert_eq!(streak_multiplier(4), 2.0);
        assert_eq!(streak_multiplier(12), 4.0);
        assert_eq!(streak_multiplier(1000), 4.0);
    }

    #[test]
    fn test_accuracy_factor_empty_defaults() {
        assert_eq!(accuracy_factor(&[]), 0.5);
    }

    #[test]
    fn test_accuracy_factor_mean_and_floor() {
        assert_eq!(accuracy_factor(&[true, false, true, true]), 0.75);
        assert_eq!(accuracy_factor(&[false; 10]), 0.1);
        assert_eq!(accuracy_factor(&[true; 10]), 1.0);
    }

    // ==================== Composition Tests ====================

    #[test]
    fn test_incorrect_answer_scores_zero() {
        let item = item_bank::lookup(8).unwrap();
        let result = compose_score(&ScoreInputs {
            prior_theta: 0.0,
            updated_theta: -0.3,
            difficulty: 8,
            item,
            correct: false,
            streak: 10,
            recent_results: &[true, true],
            total_answers: 3,
        });

        assert_eq!(result.score_delta, 0.0);
        assert_eq!(result.breakdown.elo_component, 0.0);
        assert_eq!(result.breakdown.base_difficulty, 80);
    }

    #[test]
    fn test_correct_answer_has_minimum_score() {
        // well above the item: normalized info and Elo surprise are both tiny
        let item = item_bank::lookup(1).unwrap();
        let result = compose_score(&ScoreInputs {
            prior_theta: 4.0,
            updated_theta: 4.0,
            difficulty: 1,
            item,
            correct: true,
            streak: 0,
            recent_results: &[false; 10],
            total_answers: 500,
        });

        assert_eq!(result.score_delta, 1.0);
    }

    #[test]
    fn test_breakdown_mirrors_modifiers() {
        let item = item_bank::lookup(5).unwrap();
        let recent = [true, false];
        let result = compose_score(&ScoreInputs {
            prior_theta: 0.0,
            updated_theta: 0.2,
            difficulty: 5,
            item,
            correct: true,
            streak: 2,
            recent_results: &recent,
            total_answers: 60,
        });

        assert_eq!(result.streak_multiplier, 1.5);
        assert_eq!(result.breakdown.streak_multiplier, 1.5);
        assert_eq!(result.accuracy_factor, 0.5);
        assert_eq!(result.breakdown.accuracy_factor, 0.5);
        assert_eq!(result.breakdown.base_difficulty, 50);
        assert!(result.breakdown.normalized_info > 0.0 && result.breakdown.normalized_info <= 1.0);
    }

    // ==================== Pipeline Tests ====================

    #[test]
    fn test_apply_answer_first_correct() {
        let prior = LearnerAbilityState::default();
        let (state, result) = apply_answer(&prior, &event(5, true)).unwrap();

        assert_eq!(result.irt_probability, 0.625);
        assert_eq!(result.new_theta, 0.3);
        assert_eq!(result.theta_delta, 0.3);
        assert_eq!(result.breakdown.k_factor, 64.0);

        assert_eq!(state.response_history.len(), 1);
        assert_eq!(state.theta_history.iter().copied().collect::<Vec<_>>(), vec![0.3]);
        assert_eq!(state.total_answers_seen, 1);
        assert!((state.theta - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_apply_answer_rejects_invalid_difficulty() {
        let prior = LearnerAbilityState::default();
        assert_eq!(
            apply_answer(&prior, &event(11, true)).unwrap_err(),
            AlgoError::InvalidDifficulty(11)
        );
        assert_eq!(
            apply_answer(&prior, &event(0, false)).unwrap_err(),
            AlgoError::InvalidDifficulty(0)
        );
    }

    #[test]
    fn test_apply_answer_runs_mle_from_second_answer() {
        let prior = LearnerAbilityState::default();
        let (first, _) = apply_answer(&prior, &event(5, true)).unwrap();
        let (second, result) = apply_answer(&first, &event(6, false)).unwrap();

        assert_eq!(second.response_history.len(), 2);
        assert_eq!(second.theta_history.len(), 2);
        assert_eq!(result.score_delta, 0.0);
        // MLE result is not the fixed cold-start step
        assert!((second.theta - (first.theta - 0.3)).abs() > 1e-6);
        assert!((-4.0..=4.0).contains(&second.theta));
    }
}
