use std::time::Duration;

use brainbolt_algo::sanitize::round_to;
use brainbolt_algo::{apply_answer, item_bank, AlgoError, AnswerEvent, ScoreResult};
use serde::{Deserialize, Serialize};

use crate::services::learner_state::LearnerStateStore;

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Algo(#[from] AlgoError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub user_id: String,
    pub difficulty: i64,
    pub correct: bool,
    pub streak: i64,
    pub total_answers: i64,
    #[serde(default)]
    pub recent_results: Vec<bool>,
}

impl ScoreRequest {
    /// Check every field before any state is touched
    fn into_event(self) -> Result<(String, AnswerEvent), ScoringError> {
        if self.user_id.trim().is_empty() {
            return Err(ScoringError::Validation("userId must not be empty".to_string()));
        }
        item_bank::validate_level(self.difficulty)?;

        if self.streak < 0 {
            return Err(ScoringError::Validation(format!("invalid streak: {}", self.streak)));
        }
        // the multiplier caps at 4.0 long before u32::MAX
        let streak = u32::try_from(self.streak).unwrap_or(u32::MAX);
        let total_answers = u64::try_from(self.total_answers)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                ScoringError::Validation(format!("invalid totalAnswers: {}", self.total_answers))
            })?;

        Ok((
            self.user_id,
            AnswerEvent {
                difficulty: self.difficulty,
                correct: self.correct,
                streak,
                total_answers,
                recent_results: self.recent_results,
            },
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilitySnapshot {
    pub user_id: String,
    pub theta: f64,
    pub theta_history: Vec<f64>,
    pub total_answers: u64,
}

/// Load, score, persist. One call per submitted answer.
#[derive(Clone)]
pub struct ScoringService {
    store: LearnerStateStore,
    state_ttl: Duration,
}

impl ScoringService {
    pub fn new(store: LearnerStateStore, state_ttl: Duration) -> Self {
        Self { store, state_ttl }
    }

    pub fn store(&self) -> &LearnerStateStore {
        &self.store
    }

    pub async fn score(&self, request: ScoreRequest) -> Result<ScoreResult, ScoringError> {
        let (user_id, event) = request.into_event()?;

        let prior = self.store.get(&user_id).await;
        let (state, result) = apply_answer(&prior, &event)?;
        self.store.put(&user_id, &state, self.state_ttl).await;

        tracing::info!(
            user_id = %user_id,
            difficulty = event.difficulty,
            correct = event.correct,
            theta_before = prior.theta,
            theta_after = state.theta,
            score_delta = result.score_delta,
            "answer scored"
        );

        Ok(result)
    }

    pub async fn snapshot(&self, user_id: &str) -> AbilitySnapshot {
        let state = self.store.get(user_id).await;
        AbilitySnapshot {
            user_id: user_id.to_string(),
            theta: round_to(state.theta, 4),
            theta_history: state.theta_history.into_iter().collect(),
            total_answers: state.total_answers_seen,
        }
    }

    pub async fn reset(&self, user_id: &str) {
        self.store.delete(user_id).await;
        tracing::info!(user_id, "learner state reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ScoringService {
        ScoringService::new(LearnerStateStore::memory_only(), Duration::from_secs(60))
    }

    fn request(user_id: &str, difficulty: i64, correct: bool) -> ScoreRequest {
        ScoreRequest {
            user_id: user_id.to_string(),
            difficulty,
            correct,
            streak: 0,
            total_answers: 1,
            recent_results: vec![],
        }
    }

    #[tokio::test]
    async fn test_score_persists_updated_state() {
        let service = service();
        let result = service.score(request("u1", 5, true)).await.unwrap();
        assert_eq!(result.new_theta, 0.3);

        let snapshot = service.snapshot("u1").await;
        assert_eq!(snapshot.theta, 0.3);
        assert_eq!(snapshot.theta_history, vec![0.3]);
        assert_eq!(snapshot.total_answers, 1);
    }

    #[tokio::test]
    async fn test_invalid_difficulty_leaves_no_trace() {
        let service = service();
        let err = service.score(request("u1", 11, true)).await.unwrap_err();

        assert!(matches!(err, ScoringError::Algo(AlgoError::InvalidDifficulty(11))));
        assert!(service.store().fallback().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_negative_streak_and_zero_total() {
        let service = service();

        let mut negative_streak = request("u1", 5, true);
        negative_streak.streak = -1;
        assert!(matches!(
            service.score(negative_streak).await,
            Err(ScoringError::Validation(_))
        ));

        let mut zero_total = request("u1", 5, true);
        zero_total.total_answers = 0;
        assert!(matches!(
            service.score(zero_total).await,
            Err(ScoringError::Validation(_))
        ));

        assert!(matches!(
            service.score(request("  ", 5, true)).await,
            Err(ScoringError::Validation(_))
        ));
        assert!(service.store().fallback().is_empty());
    }

    #[tokio::test]
    async fn test_huge_streak_saturates() {
        let service = service();
        let mut huge_streak = request("u1", 5, true);
        huge_streak.streak = i64::MAX;

        let result = service.score(huge_streak).await.unwrap();
        assert_eq!(result.streak_multiplier, 4.0);
    }

    #[tokio::test]
    async fn test_reset_restores_default() {
        let service = service();
        service.score(request("u1", 5, false)).await.unwrap();
        service.reset("u1").await;

        let snapshot = service.snapshot("u1").await;
        assert_eq!(snapshot.theta, 0.0);
        assert!(snapshot.theta_history.is_empty());
        assert_eq!(snapshot.total_answers, 0);
    }
}
