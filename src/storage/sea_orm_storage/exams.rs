//! 考试记录聚合存储操作

use std::collections::BTreeMap;

use super::{SeaOrmStorage, timestamp_to_datetime};
use crate::entity::answers::{self, Entity as Answers};
use crate::entity::exam_records::{self, Entity as ExamRecords};
use crate::entity::exam_subject_scores::{self, Entity as ExamSubjectScores};
use crate::entity::exams::Entity as Exams;
use crate::entity::questions;
use crate::entity::student_papers::Entity as StudentPapers;
use crate::entity::topics;
use crate::errors::{GraderError, Result};
use crate::models::{ExamContext, ExamRecord, ExamStatus, ExamSummary, SubjectScore};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl exam_records::Model {
    pub fn into_exam_record(self) -> ExamRecord {
        ExamRecord {
            id: self.id,
            student_paper_id: self.student_paper_id,
            total_score: self.total_score as i64,
            status: self.status.parse().unwrap_or(ExamStatus::MoreReview),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}

/// 分数列为 INTEGER，超出范围时拒绝写入
fn score_column(value: i64, what: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| GraderError::persistence(format!("{what}超出可存储范围: {value}")))
}

/// 获取答卷对应的考试记录与考试满分，并对考试记录加排他锁
///
/// 同一答卷的并发重算在此串行化（SQLite 不支持行锁，由其写锁保证）。
async fn lock_exam_context<C: ConnectionTrait>(
    conn: &C,
    student_paper_id: i64,
) -> Result<Option<ExamContext>> {
    let record = ExamRecords::find()
        .filter(exam_records::Column::StudentPaperId.eq(student_paper_id))
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(|e| GraderError::persistence(format!("查询考试记录失败: {e}")))?;

    let Some(record) = record else {
        return Ok(None);
    };

    let paper_with_exam = StudentPapers::find_by_id(student_paper_id)
        .find_also_related(Exams)
        .one(conn)
        .await
        .map_err(|e| GraderError::persistence(format!("查询考试信息失败: {e}")))?;

    Ok(match paper_with_exam {
        Some((paper, Some(exam))) => Some(ExamContext {
            exam_record_id: record.id,
            exam_id: paper.exam_id,
            max_score: exam.max_score as i64,
        }),
        _ => None,
    })
}

/// 按科目汇总答卷得分（答案 → 题目 → 知识点 → 科目）
async fn sum_points_by_subject<C: ConnectionTrait>(
    conn: &C,
    student_paper_id: i64,
) -> Result<Vec<SubjectScore>> {
    let rows: Vec<(i64, i32)> = Answers::find()
        .select_only()
        .column(topics::Column::SubjectId)
        .column(answers::Column::Points)
        .join(JoinType::InnerJoin, answers::Relation::Question.def())
        .join(JoinType::InnerJoin, questions::Relation::Topic.def())
        .filter(answers::Column::StudentPaperId.eq(student_paper_id))
        .order_by_asc(topics::Column::SubjectId)
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| GraderError::persistence(format!("汇总科目得分失败: {e}")))?;

    // 在应用侧求和，避免各数据库 SUM 返回类型不一致
    let mut totals: BTreeMap<i64, i64> = BTreeMap::new();
    for (subject_id, points) in rows {
        *totals.entry(subject_id).or_default() += points as i64;
    }

    Ok(totals
        .into_iter()
        .map(|(subject_id, score)| SubjectScore { subject_id, score })
        .collect())
}

/// 覆盖写入科目得分和考试记录
///
/// 列出的科目逐行覆盖（不存在则插入），该记录下其余科目行清零。
async fn write_exam_aggregate<C: ConnectionTrait>(
    conn: &C,
    exam_record_id: i64,
    subject_scores: &[SubjectScore],
    total_score: i64,
    status: ExamStatus,
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    let total_score = score_column(total_score, "考试总分")?;

    for subject in subject_scores {
        let score = score_column(subject.score, "科目得分")?;
        let existing = ExamSubjectScores::find()
            .filter(exam_subject_scores::Column::ExamRecordId.eq(exam_record_id))
            .filter(exam_subject_scores::Column::SubjectId.eq(subject.subject_id))
            .one(conn)
            .await
            .map_err(|e| GraderError::persistence(format!("查询科目得分失败: {e}")))?;

        match existing {
            Some(row) => {
                ExamSubjectScores::update_many()
                    .set(exam_subject_scores::ActiveModel {
                        score_obtained: Set(score),
                        updated_at: Set(now),
                        ..Default::default()
                    })
                    .filter(exam_subject_scores::Column::Id.eq(row.id))
                    .exec(conn)
                    .await
                    .map_err(|e| GraderError::persistence(format!("更新科目得分失败: {e}")))?;
            }
            None => {
                exam_subject_scores::ActiveModel {
                    exam_record_id: Set(exam_record_id),
                    subject_id: Set(subject.subject_id),
                    score_obtained: Set(score),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(|e| GraderError::persistence(format!("写入科目得分失败: {e}")))?;
            }
        }
    }

    // 本次没有得分来源的科目行清零，保证总分等于各科目行之和
    let computed: Vec<i64> = subject_scores.iter().map(|s| s.subject_id).collect();
    let mut stale = ExamSubjectScores::update_many()
        .set(exam_subject_scores::ActiveModel {
            score_obtained: Set(0),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(exam_subject_scores::Column::ExamRecordId.eq(exam_record_id));
    if !computed.is_empty() {
        stale = stale.filter(exam_subject_scores::Column::SubjectId.is_not_in(computed));
    }
    stale
        .exec(conn)
        .await
        .map_err(|e| GraderError::persistence(format!("清零科目得分失败: {e}")))?;

    ExamRecords::update_many()
        .set(exam_records::ActiveModel {
            total_score: Set(total_score),
            status: Set(status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(exam_records::Column::Id.eq(exam_record_id))
        .exec(conn)
        .await
        .map_err(|e| GraderError::persistence(format!("更新考试记录失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 重新计算答卷的科目得分、总分与状态
    ///
    /// 加锁、汇总与写入在同一事务内完成，汇总结果不会被并发的重算覆盖为旧值。
    pub async fn recompute_exam_aggregate_impl(
        &self,
        student_paper_id: i64,
    ) -> Result<ExamSummary> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GraderError::persistence(format!("开启事务失败: {e}")))?;

        let context = lock_exam_context(&txn, student_paper_id)
            .await?
            .ok_or_else(|| {
                GraderError::record_not_found(format!("答卷 {student_paper_id} 没有对应的考试记录"))
            })?;

        let subject_scores = sum_points_by_subject(&txn, student_paper_id).await?;

        // 总分只来自本次汇总的科目得分
        let total_score: i64 = subject_scores.iter().map(|s| s.score).sum();
        let status = ExamStatus::classify(total_score, context.max_score);

        write_exam_aggregate(
            &txn,
            context.exam_record_id,
            &subject_scores,
            total_score,
            status,
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| GraderError::persistence(format!("提交事务失败: {e}")))?;

        Ok(ExamSummary {
            exam_record_id: context.exam_record_id,
            student_paper_id,
            total_score,
            max_score: context.max_score,
            status,
            subject_scores,
        })
    }

    /// 通过答卷 ID 获取考试记录
    pub async fn get_exam_record_impl(&self, student_paper_id: i64) -> Result<Option<ExamRecord>> {
        let result = ExamRecords::find()
            .filter(exam_records::Column::StudentPaperId.eq(student_paper_id))
            .one(&self.db)
            .await
            .map_err(|e| GraderError::persistence(format!("查询考试记录失败: {e}")))?;

        Ok(result.map(|m| m.into_exam_record()))
    }

    /// 列出考试记录的科目得分
    pub async fn list_subject_scores_impl(&self, exam_record_id: i64) -> Result<Vec<SubjectScore>> {
        let rows = ExamSubjectScores::find()
            .filter(exam_subject_scores::Column::ExamRecordId.eq(exam_record_id))
            .order_by_asc(exam_subject_scores::Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| GraderError::persistence(format!("查询科目得分失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| SubjectScore {
                subject_id: row.subject_id,
                score: row.score_obtained as i64,
            })
            .collect())
    }
}
