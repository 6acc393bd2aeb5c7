use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::{GraderError, Result};
use crate::models::JobStatus;
use crate::status::StatusStore;
use crate::status::register::{BoxedStatusStoreFuture, StatusStoreConstructor};

/// 进程内状态存储，用于开发环境或 Redis 不可用时的回退
pub struct MokaStatusStore {
    inner: Cache<i64, JobStatus>,
}

impl MokaStatusStore {
    pub const NAME: &'static str = "moka";

    pub fn new(max_capacity: u64) -> Self {
        let inner = Cache::builder().max_capacity(max_capacity).build();
        debug!(
            "MokaStatusStore initialized with max capacity: {}",
            max_capacity
        );
        Self { inner }
    }

    pub(crate) fn constructor() -> StatusStoreConstructor {
        Arc::new(|config: &AppConfig| -> BoxedStatusStoreFuture {
            let capacity = config.status.memory_capacity;
            Box::pin(async move {
                Ok::<Box<dyn StatusStore>, GraderError>(Box::new(MokaStatusStore::new(capacity)))
            })
        })
    }
}

impl Default for MokaStatusStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl StatusStore for MokaStatusStore {
    async fn set(&self, coding_answer_id: i64, status: JobStatus) -> Result<()> {
        self.inner.insert(coding_answer_id, status).await;
        Ok(())
    }

    async fn get(&self, coding_answer_id: i64) -> Result<Option<JobStatus>> {
        Ok(self.inner.get(&coding_answer_id).await)
    }

    fn backend_name(&self) -> &'static str {
        Self::NAME
    }
}
