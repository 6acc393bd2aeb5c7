//! 测试替身：执行服务、状态存储与消息流

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;

use crate::errors::{GraderError, Result};
use crate::executor::ExecutionClient;
use crate::models::{ExecutionRequest, ExecutionResult, JobStatus, PointsBreakdown};
use crate::status::StatusStore;
use crate::worker::{MessageStream, StreamMessage};

pub(crate) fn success_result(syntax: i32, runtime: i32, testcase: i32) -> ExecutionResult {
    ExecutionResult {
        success: true,
        test_results: json!([{ "name": "case-1", "passed": true }]),
        failures: json!([]),
        points: vec![PointsBreakdown {
            syntax,
            runtime,
            testcase,
        }],
    }
}

/// 按提交代码返回预设结果的执行服务
#[derive(Default)]
pub(crate) struct FakeExecutionClient {
    responses: Mutex<HashMap<String, Result<ExecutionResult>>>,
    calls: AtomicUsize,
}

impl FakeExecutionClient {
    pub fn respond(&self, code: &str, result: Result<ExecutionResult>) {
        self.responses
            .lock()
            .unwrap()
            .insert(code.to_string(), result);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExecutionClient for FakeExecutionClient {
    async fn execute(
        &self,
        _endpoint: &Url,
        request: &ExecutionRequest<'_>,
    ) -> Result<ExecutionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .get(request.code)
            .cloned()
            .unwrap_or_else(|| {
                Err(GraderError::execution_failure(format!(
                    "no canned response for {}",
                    request.code
                )))
            })
    }
}

/// 记录每次状态写入的状态存储
#[derive(Default)]
pub(crate) struct RecordingStatusStore {
    writes: Mutex<Vec<(i64, JobStatus)>>,
}

impl RecordingStatusStore {
    pub fn history(&self, coding_answer_id: i64) -> Vec<JobStatus> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == coding_answer_id)
            .map(|(_, status)| *status)
            .collect()
    }
}

#[async_trait]
impl StatusStore for RecordingStatusStore {
    async fn set(&self, coding_answer_id: i64, status: JobStatus) -> Result<()> {
        self.writes.lock().unwrap().push((coding_answer_id, status));
        Ok(())
    }

    async fn get(&self, coding_answer_id: i64) -> Result<Option<JobStatus>> {
        Ok(self.history(coding_answer_id).last().copied())
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

/// 内存消息流；每条消息只投递一次，与 `>` 读取语义一致
#[derive(Default)]
pub(crate) struct InMemoryStream {
    queue: Mutex<VecDeque<StreamMessage>>,
    acked: Mutex<Vec<String>>,
    group_ensured: AtomicBool,
    ensure_attempts: AtomicUsize,
    failing_ensures: AtomicUsize,
    failing_reads: AtomicUsize,
}

impl InMemoryStream {
    pub fn push(&self, message: StreamMessage) {
        self.queue.lock().unwrap().push_back(message);
    }

    pub fn acked(&self) -> Vec<String> {
        self.acked.lock().unwrap().clone()
    }

    pub fn group_ensured(&self) -> bool {
        self.group_ensured.load(Ordering::SeqCst)
    }

    pub fn ensure_attempts(&self) -> usize {
        self.ensure_attempts.load(Ordering::SeqCst)
    }

    pub fn fail_next_ensures(&self, count: usize) {
        self.failing_ensures.store(count, Ordering::SeqCst);
    }

    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessageStream for InMemoryStream {
    async fn ensure_group(&self) -> Result<()> {
        self.ensure_attempts.fetch_add(1, Ordering::SeqCst);
        let failing = self.failing_ensures.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_ensures.store(failing - 1, Ordering::SeqCst);
            return Err(GraderError::transport("connection refused"));
        }
        self.group_ensured.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn read_batch(&self) -> Result<Vec<StreamMessage>> {
        let failing = self.failing_reads.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_reads.store(failing - 1, Ordering::SeqCst);
            return Err(GraderError::transport("connection reset"));
        }

        let messages: Vec<_> = self.queue.lock().unwrap().drain(..).collect();
        if messages.is_empty() {
            // 模拟 BLOCK 超时
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        Ok(messages)
    }

    async fn ack(&self, message_id: &str) -> Result<()> {
        self.acked.lock().unwrap().push(message_id.to_string());
        Ok(())
    }
}
