use tracing::{debug, error, info, warn};

use super::{GradingService, JobOutcome};
use crate::models::{ExecutionRequest, GradedAnswer, JobStatus, SubmissionJob};

pub async fn process_job(service: &GradingService, job: &SubmissionJob) -> JobOutcome {
    service.mark(job, JobStatus::Checking).await;

    // 解析执行服务地址
    let endpoint = match service.router.resolve(&job.language) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            warn!(
                coding_answer_id = job.coding_answer_id,
                language = %job.language,
                "Job rejected: {}",
                e
            );
            service.mark(job, JobStatus::Error).await;
            return JobOutcome::UnsupportedLanguage {
                reason: e.message().to_string(),
            };
        }
    };

    debug!(
        coding_answer_id = job.coding_answer_id,
        %endpoint,
        "Dispatching job to execution service"
    );

    // 调用执行服务，失败时不改动已有得分
    let graded = match service
        .client
        .execute(endpoint, &ExecutionRequest::check(job))
        .await
        .and_then(|result| GradedAnswer::try_from(&result))
    {
        Ok(graded) => graded,
        Err(e) => {
            error!(
                coding_answer_id = job.coding_answer_id,
                answer_id = job.answer_id,
                "Execution failed: {}",
                e
            );
            service.mark(job, JobStatus::Error).await;
            return JobOutcome::ExecutionFailed {
                reason: e.message().to_string(),
            };
        }
    };

    // 持久化成功后才标记 checked
    if let Err(e) = service.storage.save_grading_result(job, &graded).await {
        error!(
            coding_answer_id = job.coding_answer_id,
            answer_id = job.answer_id,
            "Failed to persist grading result, status left at checking: {}",
            e
        );
        return JobOutcome::PersistenceFailed {
            reason: e.message().to_string(),
        };
    }

    service.mark(job, JobStatus::Checked).await;
    info!(
        coding_answer_id = job.coding_answer_id,
        answer_id = job.answer_id,
        total_points = graded.total_points,
        "Job graded"
    );

    JobOutcome::Graded {
        total_points: graded.total_points,
    }
}
