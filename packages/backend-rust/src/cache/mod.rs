pub mod keys;

use std::future::Future;
use std::time::Duration;

use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("redis did not respond within {0:?}")]
    Timeout(Duration),
}

/// JSON-over-Redis cache. Every round trip is bounded by `op_timeout`.
#[derive(Clone)]
pub struct RedisCache {
    connection: MultiplexedConnection,
    op_timeout: Duration,
}

impl RedisCache {
    pub fn new(connection: MultiplexedConnection, op_timeout: Duration) -> Self {
        Self {
            connection,
            op_timeout,
        }
    }

    pub async fn connect(redis_url: &str, op_timeout: Duration) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let connection = bounded(op_timeout, async {
            let connection = client.get_multiplexed_tokio_connection().await?;
            Ok::<_, CacheError>(connection)
        })
        .await?;
        let cache = Self::new(connection, op_timeout);
        cache.ping().await?;
        Ok(cache)
    }

    /// `Ok(None)` on a miss; a payload that no longer decodes counts as a miss
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.connection.clone();
        let payload = bounded(self.op_timeout, async {
            let payload: Option<String> = conn.get(key).await?;
            Ok::<_, CacheError>(payload)
        })
        .await?;

        Ok(payload.and_then(|p| match serde_json::from_str(&p) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding undecodable cache payload");
                None
            }
        }))
    }

    pub async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let payload = serde_json::to_string(value)?;
        let mut conn = self.connection.clone();

        bounded(self.op_timeout, async {
            if ttl.is_zero() {
                let _: () = conn.set(key, payload).await?;
            } else {
                let _: () = conn.set_ex(key, payload, ttl.as_secs().max(1)).await?;
            }
            Ok::<_, CacheError>(())
        })
        .await
    }

    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        bounded(self.op_timeout, async {
            let _: u64 = conn.del(key).await?;
            Ok::<_, CacheError>(())
        })
        .await
    }

    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        bounded(self.op_timeout, async {
            redis::cmd("PING").query_async::<String>(&mut conn).await?;
            Ok::<_, CacheError>(())
        })
        .await
    }

    pub async fn is_connected(&self) -> bool {
        self.ping().await.is_ok()
    }
}

async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, CacheError>
where
    F: Future<Output = Result<T, CacheError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(CacheError::Timeout(limit)),
    }
}
