use tracing::info;

use super::ExamAggregator;
use crate::errors::Result;
use crate::models::ExamSummary;

pub async fn recompute_exam(
    aggregator: &ExamAggregator,
    student_paper_id: i64,
) -> Result<ExamSummary> {
    // 汇总与写入在存储层的同一事务内完成，并发重算不会写回旧的汇总
    let summary = aggregator
        .storage
        .recompute_exam_aggregate(student_paper_id)
        .await?;

    info!(
        student_paper_id,
        exam_record_id = summary.exam_record_id,
        total_score = summary.total_score,
        max_score = summary.max_score,
        status = summary.status.as_str(),
        "Exam record recomputed"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::errors::GraderError;
    use crate::models::ExamStatus;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::fixtures;

    async fn assert_total_matches_subject_rows(storage: &Arc<dyn Storage>, student_paper_id: i64) {
        let record = storage
            .get_exam_record(student_paper_id)
            .await
            .unwrap()
            .unwrap();
        let rows = storage.list_subject_scores(record.id).await.unwrap();
        assert_eq!(record.total_score, rows.iter().map(|r| r.score).sum::<i64>());
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let seaorm = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&seaorm, 40, &[(1, 20), (2, 20)]).await;
        fixtures::set_answer_points(&seaorm, paper.answer_ids[0], 20).await;
        fixtures::set_answer_points(&seaorm, paper.answer_ids[1], 5).await;

        let storage: Arc<dyn Storage> = Arc::new(seaorm);
        let aggregator = ExamAggregator::new(storage.clone());

        let first = aggregator.recompute(paper.student_paper_id).await.unwrap();
        let record_first = storage.get_exam_record(paper.student_paper_id).await.unwrap();
        let second = aggregator.recompute(paper.student_paper_id).await.unwrap();
        let record_second = storage.get_exam_record(paper.student_paper_id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.total_score, 25);
        assert_eq!(first.status, ExamStatus::Pass);
        assert_eq!(
            record_first.map(|r| (r.total_score, r.status)),
            record_second.map(|r| (r.total_score, r.status))
        );
        assert_total_matches_subject_rows(&storage, paper.student_paper_id).await;
    }

    #[tokio::test]
    async fn test_recompute_classifies_perfect_and_review() {
        let seaorm = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&seaorm, 30, &[(1, 10), (1, 20)]).await;
        fixtures::set_answer_points(&seaorm, paper.answer_ids[0], 10).await;
        fixtures::set_answer_points(&seaorm, paper.answer_ids[1], 20).await;

        let storage: Arc<dyn Storage> = Arc::new(seaorm);
        let aggregator = ExamAggregator::new(storage.clone());
        let summary = aggregator.recompute(paper.student_paper_id).await.unwrap();
        assert_eq!(summary.status, ExamStatus::PerfectScore);
        assert_eq!(summary.subject_scores.len(), 1);

        let seaorm = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&seaorm, 30, &[(1, 30)]).await;
        fixtures::set_answer_points(&seaorm, paper.answer_ids[0], 14).await;
        let aggregator = ExamAggregator::new(Arc::new(seaorm));
        let summary = aggregator.recompute(paper.student_paper_id).await.unwrap();
        assert_eq!(summary.status, ExamStatus::MoreReview);
    }

    #[tokio::test]
    async fn test_zero_max_score_is_more_review() {
        let seaorm = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&seaorm, 0, &[(1, 0)]).await;
        fixtures::set_answer_points(&seaorm, paper.answer_ids[0], 5).await;

        let storage: Arc<dyn Storage> = Arc::new(seaorm);
        let aggregator = ExamAggregator::new(storage.clone());
        let summary = aggregator.recompute(paper.student_paper_id).await.unwrap();

        assert_eq!(summary.total_score, 5);
        assert_eq!(summary.status, ExamStatus::MoreReview);
        assert_total_matches_subject_rows(&storage, paper.student_paper_id).await;
    }

    #[tokio::test]
    async fn test_missing_exam_record_is_record_not_found() {
        let seaorm = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&seaorm, 10, &[(1, 10)]).await;
        fixtures::delete_exam_record(&seaorm, paper.exam_record_id).await;

        let aggregator = ExamAggregator::new(Arc::new(seaorm));
        let err = aggregator
            .recompute(paper.student_paper_id)
            .await
            .unwrap_err();
        assert!(matches!(err, GraderError::RecordNotFound(_)));

        let err = aggregator.recompute(999).await.unwrap_err();
        assert_eq!(err.code(), "E106");
    }

    #[tokio::test]
    async fn test_recompute_follows_score_changes() {
        let seaorm = fixtures::memory_storage().await;
        let paper = fixtures::seed_paper(&seaorm, 40, &[(1, 20), (2, 20)]).await;
        fixtures::set_answer_points(&seaorm, paper.answer_ids[0], 5).await;
        let storage: Arc<dyn Storage> = Arc::new(seaorm.clone());
        let aggregator = ExamAggregator::new(storage.clone());

        let before = aggregator.recompute(paper.student_paper_id).await.unwrap();
        assert_eq!(before.total_score, 5);
        assert_eq!(before.status, ExamStatus::MoreReview);

        // 重新提交的批次改写了答案 B，另一个 worker 同时重算
        fixtures::set_answer_points(&seaorm, paper.answer_ids[1], 20).await;
        let other = ExamAggregator::new(storage.clone());
        let (a, b) = tokio::join!(
            aggregator.recompute(paper.student_paper_id),
            other.recompute(paper.student_paper_id),
        );
        assert_eq!(a.unwrap(), b.unwrap());

        let record = storage
            .get_exam_record(paper.student_paper_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.total_score, 25);
        assert_eq!(record.status, ExamStatus::Pass);
        assert_total_matches_subject_rows(&storage, paper.student_paper_id).await;
    }
}
