use std::time::{Instant, SystemTime};

use crate::config::Config;
use crate::services::learner_state::LearnerStateStore;
use crate::services::scoring::ScoringService;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    scoring: ScoringService,
}

impl AppState {
    pub fn new(config: &Config, store: LearnerStateStore) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            scoring: ScoringService::new(store, config.state_ttl),
        }
    }

    /// Build state for a config, connecting to Redis when one is configured
    pub async fn from_config(config: &Config) -> Self {
        let store = LearnerStateStore::connect(config).await;
        Self::new(config, store)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn scoring(&self) -> &ScoringService {
        &self.scoring
    }

    pub fn store(&self) -> &LearnerStateStore {
        self.scoring.store()
    }
}
