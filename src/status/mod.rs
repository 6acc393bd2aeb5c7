//! 判题状态存储
//!
//! 以 coding_answer_id 为键保存 `checking | checked | error`，供外部客户端轮询。
//! 不要求持久性；写入失败只记录日志。

pub mod backends;
pub mod register;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::JobStatus;

#[async_trait]
pub trait StatusStore: Send + Sync {
    /// 写入任务状态
    async fn set(&self, coding_answer_id: i64, status: JobStatus) -> Result<()>;

    /// 读取任务状态
    async fn get(&self, coding_answer_id: i64) -> Result<Option<JobStatus>>;

    /// 后端名称，用于日志
    fn backend_name(&self) -> &'static str;
}
