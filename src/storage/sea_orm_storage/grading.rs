//! 判分结果存储操作

use super::{SeaOrmStorage, timestamp_to_datetime};
use crate::entity::answers::{self, Entity as Answers};
use crate::entity::coding_answers::{self, Entity as CodingAnswers};
use crate::errors::{GraderError, Result};
use crate::models::{AnswerRecord, CodingAnswerRecord, GradedAnswer, SubmissionJob};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

impl answers::Model {
    pub fn into_answer_record(self) -> AnswerRecord {
        AnswerRecord {
            id: self.id,
            student_paper_id: self.student_paper_id,
            question_id: self.question_id,
            points: self.points,
            is_answered: self.is_answered,
            is_correct: self.is_correct,
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}

impl coding_answers::Model {
    pub fn into_coding_answer_record(self) -> CodingAnswerRecord {
        CodingAnswerRecord {
            id: self.id,
            answer_id: self.answer_id,
            language: self.language,
            status: self.status,
            syntax_points: self.answer_syntax_points,
            runtime_points: self.answer_runtime_points,
            test_case_points: self.answer_test_case_points,
            is_code_success: self.is_code_success,
            test_results: self.test_results,
            failures: self.failures,
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}

impl SeaOrmStorage {
    /// 写入判分结果
    ///
    /// 编程题答案与答案两张表在同一事务中更新；任一行缺失或写入失败时事务回滚，
    /// 之前的得分保持不变。
    pub async fn save_grading_result_impl(
        &self,
        job: &SubmissionJob,
        graded: &GradedAnswer,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GraderError::persistence(format!("开启事务失败: {e}")))?;

        let coding_answer = CodingAnswers::find_by_id(job.coding_answer_id)
            .one(&txn)
            .await
            .map_err(|e| GraderError::persistence(format!("查询编程题答案失败: {e}")))?
            .ok_or_else(|| {
                GraderError::record_not_found(format!(
                    "编程题答案不存在: {}",
                    job.coding_answer_id
                ))
            })?;

        if coding_answer.answer_id != job.answer_id {
            return Err(GraderError::record_not_found(format!(
                "编程题答案 {} 不属于答案 {}",
                job.coding_answer_id, job.answer_id
            )));
        }

        let answer_exists = Answers::find_by_id(job.answer_id)
            .one(&txn)
            .await
            .map_err(|e| GraderError::persistence(format!("查询答案失败: {e}")))?
            .is_some();
        if !answer_exists {
            return Err(GraderError::record_not_found(format!(
                "答案不存在: {}",
                job.answer_id
            )));
        }

        CodingAnswers::update_many()
            .set(coding_answers::ActiveModel {
                status: Set(CodingAnswerRecord::STATUS_CHECKED.to_string()),
                answer_syntax_points: Set(graded.syntax_points),
                answer_runtime_points: Set(graded.runtime_points),
                answer_test_case_points: Set(graded.test_case_points),
                is_code_success: Set(graded.is_code_success),
                test_results: Set(Some(graded.test_results.clone())),
                failures: Set(Some(graded.failures.clone())),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(coding_answers::Column::Id.eq(job.coding_answer_id))
            .exec(&txn)
            .await
            .map_err(|e| GraderError::persistence(format!("更新编程题答案失败: {e}")))?;

        Answers::update_many()
            .set(answers::ActiveModel {
                points: Set(graded.total_points),
                is_answered: Set(true),
                is_correct: Set(graded.is_code_success),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(answers::Column::Id.eq(job.answer_id))
            .exec(&txn)
            .await
            .map_err(|e| GraderError::persistence(format!("更新答案得分失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| GraderError::persistence(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 通过 ID 获取答案
    pub async fn get_answer_impl(&self, answer_id: i64) -> Result<Option<AnswerRecord>> {
        let result = Answers::find_by_id(answer_id)
            .one(&self.db)
            .await
            .map_err(|e| GraderError::persistence(format!("查询答案失败: {e}")))?;

        Ok(result.map(|m| m.into_answer_record()))
    }

    /// 通过 ID 获取编程题答案
    pub async fn get_coding_answer_impl(
        &self,
        coding_answer_id: i64,
    ) -> Result<Option<CodingAnswerRecord>> {
        let result = CodingAnswers::find_by_id(coding_answer_id)
            .one(&self.db)
            .await
            .map_err(|e| GraderError::persistence(format!("查询编程题答案失败: {e}")))?;

        Ok(result.map(|m| m.into_coding_answer_record()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use crate::models::GradedAnswer;

    fn graded(total: i32, success: bool) -> GradedAnswer {
        GradedAnswer {
            syntax_points: 5,
            runtime_points: 5,
            test_case_points: total - 10,
            total_points: total,
            is_code_success: success,
            test_results: "[]".into(),
            failures: "[]".into(),
        }
    }

    #[tokio::test]
    async fn test_save_grading_result_updates_both_rows() {
        let storage = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&storage, 40, &[(1, 20), (1, 20)]).await;
        let job = fixtures::job(&paper, 0, "python");

        storage
            .save_grading_result_impl(&job, &graded(20, true))
            .await
            .unwrap();

        let answer = storage.get_answer_impl(job.answer_id).await.unwrap().unwrap();
        assert_eq!(answer.points, 20);
        assert!(answer.is_answered);
        assert!(answer.is_correct);

        let coding = storage
            .get_coding_answer_impl(job.coding_answer_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(coding.status, "checked");
        assert_eq!(coding.test_case_points, 10);
        assert_eq!(coding.failures.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_save_grading_result_rolls_back_on_mismatched_answer() {
        let storage = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&storage, 40, &[(1, 20), (1, 20)]).await;
        let mut job = fixtures::job(&paper, 0, "python");
        // 指向另一道题的答案
        job.answer_id = paper.answer_ids[1];

        let before = storage.get_answer_impl(job.answer_id).await.unwrap();
        let err = storage
            .save_grading_result_impl(&job, &graded(20, true))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E106");
        assert_eq!(storage.get_answer_impl(job.answer_id).await.unwrap(), before);

        let coding = storage
            .get_coding_answer_impl(job.coding_answer_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(coding.status, "pending");
    }

    #[tokio::test]
    async fn test_save_grading_result_missing_coding_answer() {
        let storage = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&storage, 20, &[(1, 20)]).await;
        let mut job = fixtures::job(&paper, 0, "python");
        job.coding_answer_id = 9999;

        let err = storage
            .save_grading_result_impl(&job, &graded(20, true))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::errors::GraderError::RecordNotFound(_)));
    }
}
