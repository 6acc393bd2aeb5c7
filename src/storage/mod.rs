use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    AnswerRecord, CodingAnswerRecord, ExamRecord, ExamSummary, GradedAnswer, SubjectScore,
    SubmissionJob,
};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 判分持久化方法
    // 写入编程题答案与答案得分（同一事务，要么都成功要么都回滚）
    async fn save_grading_result(&self, job: &SubmissionJob, graded: &GradedAnswer) -> Result<()>;
    // 通过ID获取答案
    async fn get_answer(&self, answer_id: i64) -> Result<Option<AnswerRecord>>;
    // 通过ID获取编程题答案
    async fn get_coding_answer(&self, coding_answer_id: i64) -> Result<Option<CodingAnswerRecord>>;

    /// 考试聚合方法
    // 在同一事务内锁定考试记录、按科目汇总答案得分并覆盖写入科目得分与总分、状态
    async fn recompute_exam_aggregate(&self, student_paper_id: i64) -> Result<ExamSummary>;
    // 通过答卷ID获取考试记录
    async fn get_exam_record(&self, student_paper_id: i64) -> Result<Option<ExamRecord>>;
    // 列出考试记录已持久化的科目得分
    async fn list_subject_scores(&self, exam_record_id: i64) -> Result<Vec<SubjectScore>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
