//! 3PL IRT Ability Estimator
//!
//! Core theory:
//! - Three-parameter logistic model relating latent ability to the chance of
//!   a correct answer
//! - Ability is re-estimated by maximum likelihood over the learner's bounded
//!   response history after every answer
//!
//! Mathematical formulas:
//! - Response probability: P(θ) = c + (1-c) / (1 + exp(-1.7·a·(θ-b)))
//! - Log-likelihood: L(θ) = Σ u_i·ln P_i + (1-u_i)·ln(1-P_i)
//! - Newton-Raphson step: θ ← θ - L'(θ) / L''(θ)
//! - Fisher information: I(θ) = a²·P·Q / (P-c)²
//!
//! With fewer than two responses the likelihood surface is too flat to
//! optimize, so a fixed ±0.3 step is used instead.
//!
//! References:
//! - Birnbaum, A. (1968). Some latent trait models and their use in inferring
//!   an examinee's ability.
//! - Baker, F. B., & Kim, S.-H. (2004). Item Response Theory: Parameter
//!   Estimation Techniques.

use crate::item_bank;
use crate::sanitize::{clamp_probability, clamp_theta};
use crate::types::{ItemParameters, ResponseRecord, EPSILON};

// ==================== Constants ====================

/// Scaling constant that aligns the logistic with the normal ogive
const LOGISTIC_SCALE: f64 = 1.7;

/// Bound on the exponent before exp() (the logistic saturates long before this)
const EXPONENT_LIMIT: f64 = 500.0;

/// Fixed step applied while history is too short for MLE
const COLD_START_STEP: f64 = 0.3;

/// Responses required before Newton-Raphson runs
const MIN_RESPONSES_FOR_MLE: usize = 2;

/// Curvature below which the likelihood is treated as flat
const MIN_CURVATURE: f64 = 1e-10;

/// Default Newton-Raphson iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Default Newton-Raphson convergence tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

// ==================== Data Structures ====================

/// Newton-Raphson settings
#[derive(Clone, Copy, Debug)]
pub struct EstimatorOptions {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

// ==================== Response Model ====================

/// Probability of a correct response under the 3PL model
pub fn response_probability(theta: f64, a: f64, b: f64, c: f64) -> f64 {
    let exponent = (-LOGISTIC_SCALE * a * (theta - b)).clamp(-EXPONENT_LIMIT, EXPONENT_LIMIT);
    c + (1.0 - c) / (1.0 + exponent.exp())
}

/// [`response_probability`] for a bank item
pub fn item_probability(theta: f64, item: &ItemParameters) -> f64 {
    response_probability(theta, item.a, item.b, item.c)
}

/// P and Q = 1-P, both kept inside (0, 1)
fn clamped_pq(theta: f64, item: &ItemParameters) -> (f64, f64) {
    let p = item_probability(theta, item);
    (clamp_probability(p), clamp_probability(1.0 - p))
}

/// Fisher information an item carries about theta
pub fn fisher_information(theta: f64, item: &ItemParameters) -> f64 {
    let (p, q) = clamped_pq(theta, item);
    let above_guess = (p - item.c).max(EPSILON);
    item.a.powi(2) * p * q / above_guess.powi(2)
}

// ==================== Ability Estimation ====================

/// Refresh a learner's ability from their response history
pub fn estimate_ability(current_theta: f64, history: &[ResponseRecord]) -> f64 {
    estimate_ability_with(current_theta, history, &EstimatorOptions::default())
}

/// [`estimate_ability`] with explicit Newton-Raphson settings
pub fn estimate_ability_with(
    current_theta: f64,
    history: &[ResponseRecord],
    options: &EstimatorOptions,
) -> f64 {
    if history.len() < MIN_RESPONSES_FOR_MLE {
        cold_start_adjustment(current_theta, history.last())
    } else {
        newton_raphson(current_theta, history, options)
    }
}

/// Insufficient-data branch: nudge theta toward the single observed outcome
pub fn cold_start_adjustment(current_theta: f64, last: Option<&ResponseRecord>) -> f64 {
    match last {
        None => current_theta,
        Some(record) => {
            let step = if record.correct {
                COLD_START_STEP
            } else {
                -COLD_START_STEP
            };
            clamp_theta(current_theta + step)
        }
    }
}

/// Full maximum-likelihood branch.
///
/// Gradient and curvature are recomputed over the whole history on every
/// iteration. Stops early on a flat likelihood or once the step falls below
/// the tolerance.
pub fn newton_raphson(
    initial_theta: f64,
    history: &[ResponseRecord],
    options: &EstimatorOptions,
) -> f64 {
    let mut theta = clamp_theta(initial_theta);

    for _ in 0..options.max_iterations {
        let (first, second) = log_likelihood_derivatives(theta, history);

        if second.abs() < MIN_CURVATURE {
            break;
        }

        let next = clamp_theta(theta - first / second);
        let converged = (next - theta).abs() < options.tolerance;
        theta = next;

        if converged {
            break;
        }
    }

    theta
}

/// First and second derivatives of the log-likelihood at theta.
///
/// Records whose difficulty is not in the bank contribute nothing.
pub fn log_likelihood_derivatives(theta: f64, history: &[ResponseRecord]) -> (f64, f64) {
    history
        .iter()
        .filter_map(|record| {
            item_bank::lookup(i64::from(record.difficulty))
                .ok()
                .map(|item| (item, record.correct))
        })
        .fold((0.0, 0.0), |(first, second), (item, correct)| {
            let (p, q) = clamped_pq(theta, &item);
            let w = (p - item.c) / (1.0 - item.c);
            let dp = LOGISTIC_SCALE * item.a * w * (1.0 - w) * (1.0 - item.c);
            let u = if correct { 1.0 } else { 0.0 };

            (
                first + dp * (u - p) / (p * q),
                second - dp.powi(2) / (p * q),
            )
        })
}
