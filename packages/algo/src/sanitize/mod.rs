//! Data Sanitization
//!
//! Numerical stability utilities.
//!
//! Functions:
//! - Theta and probability clamping
//! - Fixed-precision rounding for reported values
//! - Learner state repair after deserialization

use crate::types::{
    LearnerAbilityState, EPSILON, MAX_DIFFICULTY, MIN_DIFFICULTY, RESPONSE_HISTORY_CAP,
    THETA_HISTORY_CAP, THETA_INITIAL, THETA_MAX, THETA_MIN,
};

/// Clamp theta into the ability scale
pub fn clamp_theta(theta: f64) -> f64 {
    theta.clamp(THETA_MIN, THETA_MAX)
}

/// Keep a probability away from 0 and 1 so P*Q and log terms stay finite
pub fn clamp_probability(p: f64) -> f64 {
    p.clamp(EPSILON, 1.0 - EPSILON)
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Repair a learner state read back from storage.
///
/// Non-finite theta falls back to the initial ability, histories are trimmed
/// to their caps (newest kept) and records with an unknown difficulty are
/// dropped. Returns `true` if anything was changed.
pub fn sanitize_state(state: &mut LearnerAbilityState) -> bool {
    let mut changed = false;

    if !state.theta.is_finite() {
        state.theta = THETA_INITIAL;
        changed = true;
    } else {
        let clamped = clamp_theta(state.theta);
        if clamped != state.theta {
            state.theta = clamped;
            changed = true;
        }
    }

    let responses = state.response_history.len();
    state
        .response_history
        .retain(|r| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&r.difficulty));
    changed |= state.response_history.len() != responses;

    let thetas = state.theta_history.len();
    state.theta_history.retain(|t| t.is_finite());
    changed |= state.theta_history.len() != thetas;

    if state.response_history.len() > RESPONSE_HISTORY_CAP {
        let excess = state.response_history.len() - RESPONSE_HISTORY_CAP;
        state.response_history.drain(..excess);
        changed = true;
    }

    if state.theta_history.len() > THETA_HISTORY_CAP {
        let excess = state.theta_history.len() - THETA_HISTORY_CAP;
        state.theta_history.drain(..excess);
        changed = true;
    }

    changed
}
