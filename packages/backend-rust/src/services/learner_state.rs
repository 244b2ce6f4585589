use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use brainbolt_algo::sanitize::sanitize_state;
use brainbolt_algo::LearnerAbilityState;
use parking_lot::RwLock;
use serde::Serialize;

use crate::cache::{keys, RedisCache};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Connected,
    Disconnected,
    /// Redis was never configured or never reachable
    Disabled,
}

/// Process-local copies of learner states that could not be written to Redis.
///
/// Created once at startup and dropped with the process; nothing here
/// survives a restart. Entries expire on the same TTL as Redis keys, and
/// expired entries are swept on every insert.
#[derive(Debug, Default)]
pub struct MemoryFallback {
    states: RwLock<HashMap<String, FallbackEntry>>,
}

#[derive(Debug)]
struct FallbackEntry {
    state: LearnerAbilityState,
    /// `None` when stored with a zero TTL
    expires_at: Option<Instant>,
}

impl FallbackEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl MemoryFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<LearnerAbilityState> {
        let now = Instant::now();
        self.states
            .read()
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.state.clone())
    }

    pub fn insert(&self, key: String, state: LearnerAbilityState, ttl: Duration) {
        let now = Instant::now();
        let expires_at = (!ttl.is_zero()).then(|| now + ttl);

        let mut states = self.states.write();
        states.retain(|_, entry| !entry.is_expired(now));
        states.insert(key, FallbackEntry { state, expires_at });
    }

    pub fn remove(&self, key: &str) -> bool {
        self.states.write().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

/// Per-learner ability state: Redis first, local fallback second.
///
/// Reads and writes never fail the caller. There is no per-learner locking,
/// so two concurrent answers for the same learner race and the last write
/// wins.
#[derive(Clone)]
pub struct LearnerStateStore {
    cache: Option<Arc<RedisCache>>,
    fallback: Arc<MemoryFallback>,
}

impl LearnerStateStore {
    pub fn new(cache: Option<Arc<RedisCache>>, fallback: Arc<MemoryFallback>) -> Self {
        Self { cache, fallback }
    }

    pub fn memory_only() -> Self {
        Self::new(None, Arc::new(MemoryFallback::new()))
    }

    /// Connect to Redis if configured; otherwise, or on failure, run memory-only
    pub async fn connect(config: &Config) -> Self {
        let Some(url) = config.redis_url.as_deref() else {
            tracing::info!("redis disabled, learner state kept in memory");
            return Self::memory_only();
        };

        match RedisCache::connect(url, config.store_timeout).await {
            Ok(cache) => {
                tracing::info!(redis_url = url, "redis connected");
                Self::new(Some(Arc::new(cache)), Arc::new(MemoryFallback::new()))
            }
            Err(err) => {
                tracing::warn!(
                    redis_url = url,
                    error = %err,
                    "redis connection failed, using in-memory fallback"
                );
                Self::memory_only()
            }
        }
    }

    pub fn fallback(&self) -> &MemoryFallback {
        &self.fallback
    }

    /// Stored state, or a fresh default one
    pub async fn get(&self, user_id: &str) -> LearnerAbilityState {
        let key = keys::irt_state_key(user_id);

        if let Some(cache) = &self.cache {
            match cache.get::<LearnerAbilityState>(&key).await {
                Ok(Some(state)) => return repaired(user_id, state),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(user_id, error = %err, "learner state read failed");
                }
            }
        }

        self.fallback
            .get(&key)
            .map(|state| repaired(user_id, state))
            .unwrap_or_default()
    }

    /// Best-effort write; on any Redis failure the state is kept locally
    pub async fn put(&self, user_id: &str, state: &LearnerAbilityState, ttl: Duration) {
        let key = keys::irt_state_key(user_id);

        if let Some(cache) = &self.cache {
            match cache.set(&key, state, ttl).await {
                Ok(()) => {
                    // drop any copy left over from an earlier Redis outage
                    self.fallback.remove(&key);
                    return;
                }
                Err(err) => {
                    tracing::warn!(
                        user_id,
                        error = %err,
                        "learner state write failed, keeping local copy"
                    );
                }
            }
        }

        self.fallback.insert(key, state.clone(), ttl);
    }

    /// Forget a learner everywhere
    pub async fn delete(&self, user_id: &str) {
        let key = keys::irt_state_key(user_id);

        if let Some(cache) = &self.cache {
            if let Err(err) = cache.delete(&key).await {
                tracing::warn!(user_id, error = %err, "learner state delete failed");
            }
        }

        self.fallback.remove(&key);
    }

    pub async fn status(&self) -> StoreStatus {
        match &self.cache {
            None => StoreStatus::Disabled,
            Some(cache) if cache.is_connected().await => StoreStatus::Connected,
            Some(_) => StoreStatus::Disconnected,
        }
    }
}

fn repaired(user_id: &str, mut state: LearnerAbilityState) -> LearnerAbilityState {
    if sanitize_state(&mut state) {
        tracing::warn!(user_id, "stored learner state was out of shape and has been repaired");
    }
    state
}
