use async_trait::async_trait;
use redis::streams::{StreamReadOptions, StreamReadReply};
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, info};

use crate::config::{RedisConfig, StreamConfig};
use crate::errors::{GraderError, Result};

/// 从消息流读出的一条消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMessage {
    pub id: String,
    /// 负载字段缺失或不是字符串时为 None
    pub payload: Option<String>,
}

#[async_trait]
pub trait MessageStream: Send + Sync {
    /// 确保消费组存在，已存在不视为错误
    async fn ensure_group(&self) -> Result<()>;

    /// 读取尚未投递给本组的新消息，超时返回空
    async fn read_batch(&self) -> Result<Vec<StreamMessage>>;

    async fn ack(&self, message_id: &str) -> Result<()>;
}

/// XGROUP CREATE 的 BUSYGROUP 错误表示消费组已存在
pub(crate) fn group_exists(error_code: Option<&str>) -> bool {
    error_code == Some("BUSYGROUP")
}

/// 基于 Redis Stream 消费组的消息流
pub struct RedisMessageStream {
    conn: MultiplexedConnection,
    key: String,
    group: String,
    consumer: String,
    count: usize,
    block_ms: u64,
    payload_field: String,
}

impl RedisMessageStream {
    pub async fn connect(redis: &RedisConfig, stream: &StreamConfig) -> Result<Self> {
        let client = redis::Client::open(redis.url.as_str()).map_err(|e| {
            GraderError::transport(format!("Invalid Redis URL '{}': {e}", redis.url))
        })?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                error!("Failed to connect to Redis stream broker at {}: {}", redis.url, e);
                GraderError::transport(format!("Redis connection failed: {e}"))
            })?;

        let key = format!("{}{}", redis.key_prefix, stream.key);
        debug!(
            "RedisMessageStream created: key='{}', group='{}', consumer='{}'",
            key, stream.group, stream.consumer
        );

        Ok(Self {
            conn,
            key,
            group: stream.group.clone(),
            consumer: stream.consumer.clone(),
            count: stream.batch_size,
            block_ms: stream.block_ms,
            payload_field: stream.payload_field.clone(),
        })
    }

    fn read_options(&self) -> StreamReadOptions {
        StreamReadOptions::default()
            .group(&self.group, &self.consumer)
            .count(self.count)
            .block(self.block_ms as usize)
    }
}

#[async_trait]
impl MessageStream for RedisMessageStream {
    async fn ensure_group(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        // 从当前尾部开始消费，流不存在时一并创建
        let created: redis::RedisResult<()> = conn
            .xgroup_create_mkstream(&self.key, &self.group, "$")
            .await;

        match created {
            Ok(()) => {
                info!("Consumer group '{}' created on '{}'", self.group, self.key);
                Ok(())
            }
            Err(e) if group_exists(e.code()) => {
                debug!("Consumer group '{}' already exists", self.group);
                Ok(())
            }
            Err(e) => Err(GraderError::transport(format!(
                "Failed to create consumer group '{}': {e}",
                self.group
            ))),
        }
    }

    async fn read_batch(&self) -> Result<Vec<StreamMessage>> {
        let mut conn = self.conn.clone();
        let reply: Option<StreamReadReply> = conn
            .xread_options(&[&self.key], &[">"], &self.read_options())
            .await?;

        let Some(reply) = reply else {
            return Ok(Vec::new());
        };

        Ok(reply
            .keys
            .into_iter()
            .flat_map(|stream_key| stream_key.ids)
            .map(|entry| StreamMessage {
                payload: entry.get::<String>(&self.payload_field),
                id: entry.id,
            })
            .collect())
    }

    async fn ack(&self, message_id: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let acked: i64 = conn.xack(&self.key, &self.group, &[message_id]).await?;
        if acked == 0 {
            debug!(message_id, "Message was not pending, nothing acknowledged");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busygroup_means_group_exists() {
        assert!(group_exists(Some("BUSYGROUP")));
        assert!(!group_exists(Some("NOGROUP")));
        assert!(!group_exists(Some("ERR")));
        assert!(!group_exists(None));
    }
}
