use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::{GraderError, Result};
use crate::executor::{ExecutionRouter, HttpExecutionClient};
use crate::services::{ExamAggregator, GradingService};
use crate::status::StatusStore;
use crate::status::backends::moka::MokaStatusStore;
use crate::status::register::get_status_store_plugin;
use crate::worker::{RedisMessageStream, StreamConsumer};

pub struct StartupContext {
    pub status: Arc<dyn StatusStore>,
    pub consumer: StreamConsumer,
}

/// 使用指定名称的插件构造状态存储
async fn build_status_store(name: &str, config: &AppConfig) -> Result<Box<dyn StatusStore>> {
    let constructor = get_status_store_plugin(name).ok_or_else(|| {
        GraderError::status_store_plugin_not_found(format!(
            "Status store backend '{name}' not found in registry"
        ))
    })?;
    constructor(config).await
}

/// 创建状态存储实例，配置的后端不可用时回退到内存存储
async fn create_status_store(config: &AppConfig) -> Result<Arc<dyn StatusStore>> {
    let backend = &config.status.backend;

    warn!("Attempting to create {} status store backend", backend);

    match build_status_store(backend, config).await {
        Ok(store) => {
            warn!("Successfully created {} status store backend", backend);
            return Ok(Arc::from(store));
        }
        Err(e) => {
            warn!("Failed to create {} status store: {}", backend, e);
        }
    }

    if backend == MokaStatusStore::NAME {
        return Err(GraderError::status_store_connection(format!(
            "No status store backend available (tried: {backend})"
        )));
    }

    // 状态存储不要求持久，回退到进程内存储仍可判题
    warn!("Falling back to in-memory status store");
    let store = build_status_store(MokaStatusStore::NAME, config).await?;
    warn!("Successfully created fallback Moka (in-memory) status store backend");
    Ok(Arc::from(store))
}

/// 准备判题 worker 启动的上下文
/// 包括存储、状态存储、执行服务路由与消息流消费者
pub async fn prepare_worker_startup(config: &AppConfig) -> Result<StartupContext> {
    // 重复安装时返回 Err，说明已有可用的 provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::status::register::debug_status_store_registry();
        debug!("Debug mode: Status store registry is enabled");
    }

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let status = create_status_store(config).await?;
    warn!("Status store backend initialized");

    let router = ExecutionRouter::from_config(&config.executor)?;
    if router.is_empty() {
        warn!("No execution endpoints configured, every job will be rejected");
    } else {
        warn!(
            "Execution endpoints registered for: {}",
            router
                .languages()
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let client = HttpExecutionClient::new(Duration::from_secs(config.executor.timeout_secs))?;

    let grading = Arc::new(GradingService::new(
        Arc::new(router),
        Arc::new(client),
        storage.clone(),
        status.clone(),
    ));
    let aggregator = Arc::new(ExamAggregator::new(storage.clone()));

    let stream = RedisMessageStream::connect(&config.redis, &config.stream).await?;
    warn!(
        "Consuming stream '{}' as '{}' in group '{}'",
        config.stream.key, config.stream.consumer, config.stream.group
    );

    let consumer = StreamConsumer::new(
        Arc::new(stream),
        grading,
        aggregator,
        Duration::from_millis(config.stream.retry_pause_ms),
    );

    Ok(StartupContext {
        status,
        consumer,
    })
}
