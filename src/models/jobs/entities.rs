use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{GraderError, Result};

/// 一道编程题的判题任务
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionJob {
    // 编程题答案 ID，同时是状态存储的键
    pub coding_answer_id: i64,
    // 对应的答案 ID
    pub answer_id: i64,
    // 所属学生答卷 ID
    pub student_paper_id: i64,
    // 声明的语言标签
    pub language: String,
    // 学生代码
    #[serde(rename = "code")]
    pub code_payload: String,
    // 语言相关的附加字段，原样转发给执行服务
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 一条流消息对应的一批任务，同属一份学生答卷
#[derive(Debug, Clone, PartialEq)]
pub struct JobBatch {
    pub student_paper_id: i64,
    pub jobs: Vec<SubmissionJob>,
}

impl JobBatch {
    /// 解析流消息载荷（SubmissionJob 的 JSON 数组）
    pub fn parse(payload: &str) -> Result<Self> {
        let jobs: Vec<SubmissionJob> = serde_json::from_str(payload)?;

        let student_paper_id = match jobs.first() {
            Some(job) => job.student_paper_id,
            None => return Err(GraderError::parse("消息载荷为空数组")),
        };

        if let Some(stray) = jobs
            .iter()
            .find(|job| job.student_paper_id != student_paper_id)
        {
            return Err(GraderError::parse(format!(
                "同一消息中包含多个答卷: {} 与 {}",
                student_paper_id, stray.student_paper_id
            )));
        }

        Ok(Self {
            student_paper_id,
            jobs,
        })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_keeps_order_and_extra_fields() {
        let payload = r#"[
            {"coding_answer_id": 11, "answer_id": 1, "student_paper_id": 7,
             "language": "python", "code": "print(1)", "stdin": "3\n"},
            {"coding_answer_id": 12, "answer_id": 2, "student_paper_id": 7,
             "language": "java", "code": "class Main {}", "class_name": "Main"}
        ]"#;

        let batch = JobBatch::parse(payload).unwrap();
        assert_eq!(batch.student_paper_id, 7);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.jobs[0].coding_answer_id, 11);
        assert_eq!(batch.jobs[0].code_payload, "print(1)");
        assert_eq!(batch.jobs[0].extra.get("stdin"), Some(&Value::from("3\n")));
        assert_eq!(
            batch.jobs[1].extra.get("class_name"),
            Some(&Value::from("Main"))
        );
    }

    #[test]
    fn test_parse_rejects_empty_batch() {
        let err = JobBatch::parse("[]").unwrap_err();
        assert_eq!(err.code(), "E102");
    }

    #[test]
    fn test_parse_rejects_mixed_papers() {
        let payload = r#"[
            {"coding_answer_id": 1, "answer_id": 1, "student_paper_id": 1, "language": "c", "code": ""},
            {"coding_answer_id": 2, "answer_id": 2, "student_paper_id": 2, "language": "c", "code": ""}
        ]"#;
        assert!(matches!(
            JobBatch::parse(payload),
            Err(GraderError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let payload = r#"[{"coding_answer_id": 1, "language": "c", "code": ""}]"#;
        assert!(matches!(
            JobBatch::parse(payload),
            Err(GraderError::Parse(_))
        ));
        assert!(JobBatch::parse("not json").is_err());
    }
}
