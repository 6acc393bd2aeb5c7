use serde::{Deserialize, Serialize};

/// 答案记录（得分部分）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    pub id: i64,
    pub student_paper_id: i64,
    pub question_id: i64,
    pub points: i32,
    pub is_answered: bool,
    pub is_correct: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 编程题答案记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodingAnswerRecord {
    pub id: i64,
    pub answer_id: i64,
    pub language: String,
    // 数据库中的判题状态（pending / checked）
    pub status: String,
    pub syntax_points: i32,
    pub runtime_points: i32,
    pub test_case_points: i32,
    pub is_code_success: bool,
    pub test_results: Option<String>,
    pub failures: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl CodingAnswerRecord {
    pub const STATUS_PENDING: &'static str = "pending";
    pub const STATUS_CHECKED: &'static str = "checked";
}
