//! 消息流消费：拉取批次 → 逐个判题 → 确认 → 聚合

pub mod consumer;
pub mod stream;

pub use consumer::{BatchReport, MessageOutcome, StreamConsumer};
pub use stream::{MessageStream, RedisMessageStream, StreamMessage};
