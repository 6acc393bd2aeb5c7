//! 测试用数据：内存 SQLite 存储与一份完整的考试答卷

use std::collections::BTreeMap;

use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::entity::prelude::*;
use crate::entity::answers;
use crate::models::{CodingAnswerRecord, ExamStatus, SubmissionJob};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

pub(crate) struct PaperFixture {
    pub exam_id: i64,
    pub student_paper_id: i64,
    pub exam_record_id: i64,
    /// 科目编号 -> 科目 ID
    pub subject_ids: BTreeMap<u8, i64>,
    pub answer_ids: Vec<i64>,
    pub coding_answer_ids: Vec<i64>,
}

pub(crate) async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config).await.unwrap()
}

/// 创建一份答卷；`questions` 中每项为 (科目编号, 题目分值)，每道题对应一个编程题答案
pub(crate) async fn seed_paper(
    storage: &SeaOrmStorage,
    max_score: i32,
    questions: &[(u8, i32)],
) -> PaperFixture {
    let now = chrono::Utc::now().timestamp();
    let db = &storage.db;

    let exam = ExamActiveModel {
        title: Set("数据结构期末".to_string()),
        max_score: Set(max_score),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let paper = StudentPaperActiveModel {
        exam_id: Set(exam.id),
        user_id: Set(1),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let record = ExamRecordActiveModel {
        student_paper_id: Set(paper.id),
        total_score: Set(0),
        status: Set(ExamStatus::MoreReview.to_string()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let mut subject_ids = BTreeMap::new();
    let mut topic_ids = BTreeMap::new();
    let mut answer_ids = Vec::new();
    let mut coding_answer_ids = Vec::new();

    for &(subject_key, points) in questions {
        if !subject_ids.contains_key(&subject_key) {
            let subject = SubjectActiveModel {
                name: Set(format!("subject-{subject_key}")),
                ..Default::default()
            }
            .insert(db)
            .await
            .unwrap();
            let topic = TopicActiveModel {
                subject_id: Set(subject.id),
                name: Set(format!("topic-{subject_key}")),
                ..Default::default()
            }
            .insert(db)
            .await
            .unwrap();
            subject_ids.insert(subject_key, subject.id);
            topic_ids.insert(subject_key, topic.id);
        }

        let question = QuestionActiveModel {
            exam_id: Set(exam.id),
            topic_id: Set(topic_ids[&subject_key]),
            points: Set(points),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let answer = AnswerActiveModel {
            student_paper_id: Set(paper.id),
            question_id: Set(question.id),
            points: Set(0),
            is_answered: Set(false),
            is_correct: Set(false),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let coding = CodingAnswerActiveModel {
            answer_id: Set(answer.id),
            language: Set("python".to_string()),
            status: Set(CodingAnswerRecord::STATUS_PENDING.to_string()),
            answer_syntax_points: Set(0),
            answer_runtime_points: Set(0),
            answer_test_case_points: Set(0),
            is_code_success: Set(false),
            test_results: Set(None),
            failures: Set(None),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        answer_ids.push(answer.id);
        coding_answer_ids.push(coding.id);
    }

    PaperFixture {
        exam_id: exam.id,
        student_paper_id: paper.id,
        exam_record_id: record.id,
        subject_ids,
        answer_ids,
        coding_answer_ids,
    }
}

/// 为答卷中第 `index` 道题构造判题任务
pub(crate) fn job(paper: &PaperFixture, index: usize, language: &str) -> SubmissionJob {
    SubmissionJob {
        coding_answer_id: paper.coding_answer_ids[index],
        answer_id: paper.answer_ids[index],
        student_paper_id: paper.student_paper_id,
        language: language.to_string(),
        code_payload: "print('hello')".to_string(),
        extra: Default::default(),
    }
}

/// 直接改写答案得分（模拟人工判分等外部写入）
pub(crate) async fn set_answer_points(storage: &SeaOrmStorage, answer_id: i64, points: i32) {
    Answers::update_many()
        .set(answers::ActiveModel {
            points: Set(points),
            ..Default::default()
        })
        .filter(answers::Column::Id.eq(answer_id))
        .exec(&storage.db)
        .await
        .unwrap();
}

/// 删除答卷的考试记录
pub(crate) async fn delete_exam_record(storage: &SeaOrmStorage, exam_record_id: i64) {
    ExamRecords::delete_by_id(exam_record_id)
        .exec(&storage.db)
        .await
        .unwrap();
}
