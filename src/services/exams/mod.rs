//! 考试成绩聚合

pub mod recompute;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::ExamSummary;
use crate::storage::Storage;

pub struct ExamAggregator {
    storage: Arc<dyn Storage>,
}

impl ExamAggregator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 从答案得分重新计算答卷的科目得分、总分与状态
    ///
    /// 总是全量覆盖，同一答卷重复执行结果一致，可以安全地随消息重投递多次调用。
    pub async fn recompute(&self, student_paper_id: i64) -> Result<ExamSummary> {
        recompute::recompute_exam(self, student_paper_id).await
    }
}
