use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::jobs::entities::SubmissionJob;

/// 执行服务的请求动作：只做判题检查
pub const CHECK_ACTION: &str = "check";

/// 发往执行服务的请求体
#[derive(Debug, Serialize)]
pub struct ExecutionRequest<'a> {
    pub code: &'a str,
    pub language: &'a str,
    #[serde(flatten)]
    pub extra: &'a Map<String, Value>,
    pub request_action: &'static str,
}

impl<'a> ExecutionRequest<'a> {
    pub fn check(job: &'a SubmissionJob) -> Self {
        Self {
            code: &job.code_payload,
            language: &job.language,
            extra: &job.extra,
            request_action: CHECK_ACTION,
        }
    }
}
