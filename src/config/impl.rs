use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::with_defaults(Config::builder())?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("GRADER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从常用环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option("redis.key_prefix", std::env::var("REDIS_KEY_PREFIX").ok())?
            .set_override_option("stream.key", std::env::var("STREAM_KEY").ok())?
            .set_override_option("stream.group", std::env::var("STREAM_GROUP").ok())?
            .set_override_option("stream.consumer", std::env::var("CONSUMER_NAME").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.normalize();

        Ok(app_config)
    }

    /// 内置默认值，保证没有配置文件时也能启动
    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("app.system_name", "grading-worker")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("database.url", "grading.db")?
            .set_default("database.pool_size", 10)?
            .set_default("database.timeout", 30)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            .set_default("redis.key_prefix", "grader:")?
            .set_default("stream.key", "coding_answers:stream")?
            .set_default("stream.group", "grading_workers")?
            .set_default("stream.consumer", "")?
            .set_default("stream.batch_size", 1)?
            .set_default("stream.block_ms", 300)?
            .set_default("stream.retry_pause_ms", 1000)?
            .set_default("stream.payload_field", "payload")?
            .set_default("status.backend", "redis")?
            .set_default("status.hash_key", "coding_answer:status")?
            .set_default("status.memory_capacity", 100_000)?
            .set_default("executor.timeout_secs", 30)
    }

    /// 修正加载后的配置
    fn normalize(&mut self) {
        // 每个进程需要独立的消费者名称
        if self.stream.consumer.trim().is_empty() {
            self.stream.consumer = format!("worker-{}", uuid::Uuid::new_v4());
        }
        if self.stream.batch_size == 0 {
            self.stream.batch_size = 1;
        }
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}
