use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::errors::{GraderError, Result};
use crate::models::{ExecutionRequest, ExecutionResult};

/// 错误信息中保留的响应体长度
const MAX_ERROR_BODY: usize = 512;

#[async_trait]
pub trait ExecutionClient: Send + Sync {
    /// 同步调用执行服务；传输错误、超时、非 2xx 与无法解析的响应都视为执行失败
    async fn execute(
        &self,
        endpoint: &Url,
        request: &ExecutionRequest<'_>,
    ) -> Result<ExecutionResult>;
}

pub struct HttpExecutionClient {
    client: Client,
}

impl HttpExecutionClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| GraderError::config(format!("无法创建 HTTP 客户端: {e}")))?;
        Ok(Self { client })
    }

    /// 解析执行服务响应
    pub(crate) fn parse_response(status: StatusCode, body: &str) -> Result<ExecutionResult> {
        if !status.is_success() {
            let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(GraderError::execution_failure(format!(
                "执行服务返回 {status}: {snippet}"
            )));
        }

        let result: ExecutionResult = serde_json::from_str(body).map_err(|e| {
            GraderError::execution_failure(format!("无法解析执行服务响应: {e}"))
        })?;

        // 没有得分的响应无法持久化
        result.breakdown()?;

        Ok(result)
    }
}

#[async_trait]
impl ExecutionClient for HttpExecutionClient {
    async fn execute(
        &self,
        endpoint: &Url,
        request: &ExecutionRequest<'_>,
    ) -> Result<ExecutionResult> {
        let response = self
            .client
            .post(endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GraderError::execution_failure(format!("执行服务超时: {endpoint}"))
                } else {
                    GraderError::execution_failure(format!("无法访问执行服务 {endpoint}: {e}"))
                }
            })?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%endpoint, %status, "Execution service responded");

        Self::parse_response(status, &body)
    }
}
