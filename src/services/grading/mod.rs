//! 判题编排：状态更新 → 远程执行 → 结果持久化

pub mod process;

use std::sync::Arc;

use crate::executor::{ExecutionClient, ExecutionRouter};
use crate::models::{JobStatus, SubmissionJob};
use crate::status::StatusStore;
use crate::storage::Storage;

/// 单个任务的处理结果；错误只影响当前任务，不向批次传播
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Graded { total_points: i32 },
    UnsupportedLanguage { reason: String },
    ExecutionFailed { reason: String },
    // 执行成功但写库失败，状态停留在 checking
    PersistenceFailed { reason: String },
}

impl JobOutcome {
    pub fn is_graded(&self) -> bool {
        matches!(self, JobOutcome::Graded { .. })
    }

    /// 任务结束后状态存储中应有的终态；持久化失败时没有终态
    pub fn final_status(&self) -> Option<JobStatus> {
        match self {
            JobOutcome::Graded { .. } => Some(JobStatus::Checked),
            JobOutcome::UnsupportedLanguage { .. } | JobOutcome::ExecutionFailed { .. } => {
                Some(JobStatus::Error)
            }
            JobOutcome::PersistenceFailed { .. } => None,
        }
    }
}

pub struct GradingService {
    router: Arc<ExecutionRouter>,
    client: Arc<dyn ExecutionClient>,
    storage: Arc<dyn Storage>,
    status: Arc<dyn StatusStore>,
}

impl GradingService {
    pub fn new(
        router: Arc<ExecutionRouter>,
        client: Arc<dyn ExecutionClient>,
        storage: Arc<dyn Storage>,
        status: Arc<dyn StatusStore>,
    ) -> Self {
        Self {
            router,
            client,
            storage,
            status,
        }
    }

    /// 处理单个判题任务
    pub async fn process(&self, job: &SubmissionJob) -> JobOutcome {
        process::process_job(self, job).await
    }

    /// 写入状态；状态存储不保证持久，失败只记录日志
    pub(crate) async fn mark(&self, job: &SubmissionJob, status: JobStatus) {
        if let Err(e) = self.status.set(job.coding_answer_id, status).await {
            tracing::warn!(
                coding_answer_id = job.coding_answer_id,
                status = status.as_str(),
                backend = self.status.backend_name(),
                "Failed to write job status: {}",
                e
            );
        }
    }
}
