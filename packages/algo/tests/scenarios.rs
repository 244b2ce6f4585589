//! End-to-end scoring scenarios for a brand-new learner

use brainbolt_algo::{apply_answer, AlgoError, AnswerEvent, LearnerAbilityState};

fn first_answer(correct: bool) -> AnswerEvent {
    AnswerEvent {
        difficulty: 5,
        correct,
        streak: 0,
        total_answers: 1,
        recent_results: vec![],
    }
}

#[test]
fn first_correct_answer_at_medium_difficulty() {
    let prior = LearnerAbilityState::default();
    let (state, result) = apply_answer(&prior, &first_answer(true)).unwrap();

    assert_eq!(result.irt_probability, 0.625);
    assert_eq!(result.new_theta, 0.3);
    assert_eq!(result.theta_delta, 0.3);
    assert_eq!(result.elo_expected, 0.6252);
    assert_eq!(result.breakdown.k_factor, 64.0);
    assert_eq!(result.breakdown.normalized_info, 0.3941);
    assert_eq!(result.streak_multiplier, 1.0);
    assert_eq!(result.accuracy_factor, 0.5);
    assert_eq!(result.breakdown.base_difficulty, 50);
    assert_eq!(result.score_delta, 609.53);

    assert_eq!(state.response_history.len(), 1);
    assert_eq!(state.total_answers_seen, 1);
}

#[test]
fn first_incorrect_answer_at_medium_difficulty() {
    let prior = LearnerAbilityState::default();
    let (state, result) = apply_answer(&prior, &first_answer(false)).unwrap();

    assert_eq!(result.score_delta, 0.0);
    assert_eq!(result.new_theta, -0.3);
    assert_eq!(result.theta_delta, -0.3);
    assert_eq!(result.breakdown.elo_component, 0.0);
    assert!((state.theta + 0.3).abs() < 1e-12);
}

#[test]
fn second_answer_switches_to_maximum_likelihood() {
    let prior = LearnerAbilityState::default();
    let (first, _) = apply_answer(&prior, &first_answer(true)).unwrap();

    let event = AnswerEvent {
        difficulty: 6,
        correct: false,
        streak: 0,
        total_answers: 2,
        recent_results: vec![true],
    };
    let (second, result) = apply_answer(&first, &event).unwrap();

    assert_eq!(result.new_theta, 0.1153);
    assert_eq!(result.irt_probability, 0.4721);
    assert_eq!(result.elo_expected, 0.4585);
    assert_eq!(result.breakdown.k_factor, 64.0);
    assert_eq!(result.score_delta, 0.0);
    assert_eq!(
        second.theta_history.iter().copied().collect::<Vec<_>>(),
        vec![0.3, 0.1153]
    );
}

#[test]
fn out_of_range_difficulty_leaves_state_alone() {
    let prior = LearnerAbilityState::default();
    let (existing, _) = apply_answer(&prior, &first_answer(true)).unwrap();
    let snapshot = existing.clone();

    let mut event = first_answer(true);
    event.difficulty = 11;

    assert_eq!(
        apply_answer(&existing, &event).unwrap_err(),
        AlgoError::InvalidDifficulty(11)
    );
    assert_eq!(existing, snapshot);
}

#[test]
fn long_session_keeps_histories_capped() {
    let mut state = LearnerAbilityState::default();
    for i in 0..150u64 {
        let event = AnswerEvent {
            difficulty: 1 + (i % 10) as i64,
            correct: i % 4 != 0,
            streak: (i % 5) as u32,
            total_answers: i + 1,
            recent_results: vec![true, true, false],
        };
        let (next, result) = apply_answer(&state, &event).unwrap();
        assert!(result.score_delta >= 0.0);
        state = next;
    }

    assert_eq!(state.response_history.len(), 50);
    assert_eq!(state.theta_history.len(), 100);
    assert_eq!(state.total_answers_seen, 150);
    assert!((-4.0..=4.0).contains(&state.theta));
}
