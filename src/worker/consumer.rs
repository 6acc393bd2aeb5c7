use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::stream::{MessageStream, StreamMessage};
use crate::errors::GraderError;
use crate::models::{ExamSummary, JobBatch};
use crate::services::{ExamAggregator, GradingService};

/// 一条消息处理完成后的汇总
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub message_id: String,
    pub student_paper_id: i64,
    pub graded: usize,
    pub failed: usize,
    /// 没有终态、状态停留在 checking 的任务数
    pub unsettled: usize,
    pub acknowledged: bool,
    /// 聚合失败时为 None，只记录日志
    pub summary: Option<ExamSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    /// 负载无法解析，消息保持未确认
    Malformed { message_id: String, reason: String },
    Processed(BatchReport),
}

pub struct StreamConsumer {
    stream: Arc<dyn MessageStream>,
    grading: Arc<GradingService>,
    aggregator: Arc<ExamAggregator>,
    retry_pause: Duration,
}

impl StreamConsumer {
    pub fn new(
        stream: Arc<dyn MessageStream>,
        grading: Arc<GradingService>,
        aggregator: Arc<ExamAggregator>,
        retry_pause: Duration,
    ) -> Self {
        Self {
            stream,
            grading,
            aggregator,
            retry_pause,
        }
    }

    /// 消费循环，直到 `shutdown` 完成
    ///
    /// 拉取错误只会暂停后重试，处理错误不会让循环退出。
    /// 关闭时正在处理的批次可能被中断，未确认的消息会被重新投递。
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tokio::select! {
            _ = &mut shutdown => return,
            _ = self.ensure_group_with_retry() => {}
        }

        info!("Stream consumer started");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    warn!("Stream consumer stopping");
                    return;
                }
                _ = self.poll_once() => {}
            }
        }
    }

    async fn ensure_group_with_retry(&self) {
        while let Err(e) = self.stream.ensure_group().await {
            error!("Failed to ensure consumer group: {}", e);
            tokio::time::sleep(self.retry_pause).await;
        }
    }

    /// 拉取一次并处理拉到的全部消息
    async fn poll_once(&self) {
        let messages = match self.stream.read_batch().await {
            Ok(messages) => messages,
            Err(e) => {
                warn!(
                    "Failed to read from stream, retrying in {} ms: {}",
                    self.retry_pause.as_millis(),
                    e
                );
                tokio::time::sleep(self.retry_pause).await;
                return;
            }
        };

        for message in messages {
            self.handle_message(message).await;
        }
    }

    /// 处理一条批次消息
    pub async fn handle_message(&self, message: StreamMessage) -> MessageOutcome {
        let parsed = message
            .payload
            .as_deref()
            .ok_or_else(|| GraderError::parse("消息缺少负载字段"))
            .and_then(JobBatch::parse);

        let batch = match parsed {
            Ok(batch) => batch,
            Err(e) => {
                error!(
                    message_id = %message.id,
                    "Malformed stream message left pending: {}",
                    e
                );
                return MessageOutcome::Malformed {
                    message_id: message.id,
                    reason: e.message().to_string(),
                };
            }
        };

        debug!(
            message_id = %message.id,
            student_paper_id = batch.student_paper_id,
            jobs = batch.len(),
            "Processing batch"
        );

        // 批内顺序处理，单个任务的失败不影响其余任务
        let mut graded = 0;
        let mut failed = 0;
        let mut unsettled = 0;
        for job in &batch.jobs {
            let outcome = self.grading.process(job).await;
            if outcome.is_graded() {
                graded += 1;
            } else {
                failed += 1;
            }
            if outcome.final_status().is_none() {
                unsettled += 1;
            }
        }

        if unsettled > 0 {
            warn!(
                message_id = %message.id,
                unsettled,
                "Some jobs were left without a terminal status"
            );
        }

        let acknowledged = match self.stream.ack(&message.id).await {
            Ok(()) => true,
            Err(e) => {
                error!(message_id = %message.id, "Failed to acknowledge message: {}", e);
                false
            }
        };

        // 确认与聚合相互独立，聚合失败只记录日志
        let summary = match self.aggregator.recompute(batch.student_paper_id).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                error!(
                    student_paper_id = batch.student_paper_id,
                    "Exam aggregation failed: {}",
                    e
                );
                None
            }
        };

        info!(
            message_id = %message.id,
            student_paper_id = batch.student_paper_id,
            graded,
            failed,
            unsettled,
            acknowledged,
            "Batch completed"
        );

        MessageOutcome::Processed(BatchReport {
            message_id: message.id,
            student_paper_id: batch.student_paper_id,
            graded,
            failed,
            unsettled,
            acknowledged,
            summary,
        })
    }
}
