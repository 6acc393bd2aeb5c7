use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::AppConfig;
use crate::errors::{GraderError, Result};
use crate::models::JobStatus;
use crate::status::StatusStore;
use crate::status::register::{BoxedStatusStoreFuture, StatusStoreConstructor};

/// Redis 哈希状态存储：`HSET {prefix}{hash_key} <coding_answer_id> <status>`
pub struct RedisStatusStore {
    conn: MultiplexedConnection,
    hash_key: String,
}

impl RedisStatusStore {
    pub const NAME: &'static str = "redis";

    pub async fn connect(url: &str, key_prefix: &str, hash_key: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            GraderError::status_store_connection(format!("Invalid Redis URL '{url}': {e}"))
        })?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                error!(
                    "Failed to connect to Redis server: {}. Check Redis server status and URL: {}",
                    e, url
                );
                GraderError::status_store_connection(format!("Redis connection failed: {e}"))
            })?;

        // 测试 Redis 连接
        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| GraderError::status_store_connection(format!("Redis ping failed: {e}")))?;
        debug!("Redis connection test successful: {}", response);

        let hash_key = format!("{key_prefix}{hash_key}");
        debug!("RedisStatusStore created with hash key: '{}'", hash_key);

        Ok(Self { conn, hash_key })
    }

    pub(crate) fn constructor() -> StatusStoreConstructor {
        Arc::new(|config: &AppConfig| -> BoxedStatusStoreFuture {
            let url = config.redis.url.clone();
            let prefix = config.redis.key_prefix.clone();
            let hash_key = config.status.hash_key.clone();
            Box::pin(async move {
                let store = RedisStatusStore::connect(&url, &prefix, &hash_key).await?;
                Ok::<Box<dyn StatusStore>, GraderError>(Box::new(store))
            })
        })
    }
}

#[async_trait]
impl StatusStore for RedisStatusStore {
    async fn set(&self, coding_answer_id: i64, status: JobStatus) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(&self.hash_key, coding_answer_id, status.as_str())
            .await?;
        debug!(
            coding_answer_id,
            status = status.as_str(),
            "Status written to {}",
            self.hash_key
        );
        Ok(())
    }

    async fn get(&self, coding_answer_id: i64) -> Result<Option<JobStatus>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.hget(&self.hash_key, coding_answer_id).await?;
        raw.map(|s| s.parse::<JobStatus>().map_err(GraderError::parse))
            .transpose()
    }

    fn backend_name(&self) -> &'static str {
        Self::NAME
    }
}
