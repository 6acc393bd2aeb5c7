use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub stream: StreamConfig,
    pub status: StatusConfig,
    pub executor: ExecutorConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// Redis 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
}

/// 消息流消费配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    pub key: String,
    pub group: String,
    /// 为空时启动阶段生成 `worker-<uuid>`
    pub consumer: String,
    pub batch_size: usize,
    /// XREADGROUP BLOCK 时长，需小于 Redis 连接的响应超时
    pub block_ms: u64,
    pub retry_pause_ms: u64,
    pub payload_field: String,
}

/// 判题状态存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    pub backend: String,
    pub hash_key: String,
    pub memory_capacity: u64,
}

/// 远程执行服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    pub timeout_secs: u64,
    /// 语言标签 -> 执行服务地址
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}
