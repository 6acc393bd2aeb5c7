use serde::{Deserialize, Serialize};

// 考试记录状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    PerfectScore, // 满分
    Pass,         // 及格
    MoreReview,   // 需要复习
}

impl ExamStatus {
    pub const PERFECT_SCORE: &'static str = "perfect_score";
    pub const PASS: &'static str = "pass";
    pub const MORE_REVIEW: &'static str = "more_review";

    /// 及格线（得分率）
    pub const PASS_RATIO: f64 = 0.5;

    /// 根据总分与满分判定状态；满分为 0 的考试一律为 more_review
    pub fn classify(total_score: i64, max_score: i64) -> Self {
        if max_score <= 0 {
            return ExamStatus::MoreReview;
        }
        if total_score == max_score {
            ExamStatus::PerfectScore
        } else if total_score as f64 / max_score as f64 >= Self::PASS_RATIO {
            ExamStatus::Pass
        } else {
            ExamStatus::MoreReview
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExamStatus::PerfectScore => Self::PERFECT_SCORE,
            ExamStatus::Pass => Self::PASS,
            ExamStatus::MoreReview => Self::MORE_REVIEW,
        }
    }
}

impl<'de> Deserialize<'de> for ExamStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ExamStatus::PERFECT_SCORE => Ok(ExamStatus::PerfectScore),
            ExamStatus::PASS => Ok(ExamStatus::Pass),
            ExamStatus::MORE_REVIEW => Ok(ExamStatus::MoreReview),
            _ => Err(format!("Invalid exam status: {s}")),
        }
    }
}

/// 考试记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExamRecord {
    pub id: i64,
    pub student_paper_id: i64,
    pub total_score: i64,
    pub status: ExamStatus,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 聚合所需的考试上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamContext {
    pub exam_record_id: i64,
    pub exam_id: i64,
    pub max_score: i64,
}

/// 科目得分
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectScore {
    pub subject_id: i64,
    pub score: i64,
}

/// 一次重算的结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExamSummary {
    pub exam_record_id: i64,
    pub student_paper_id: i64,
    pub total_score: i64,
    pub max_score: i64,
    pub status: ExamStatus,
    pub subject_scores: Vec<SubjectScore>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_perfect_score() {
        assert_eq!(ExamStatus::classify(40, 40), ExamStatus::PerfectScore);
    }

    #[test]
    fn test_classify_pass_boundary() {
        assert_eq!(ExamStatus::classify(20, 40), ExamStatus::Pass);
        assert_eq!(ExamStatus::classify(39, 40), ExamStatus::Pass);
        assert_eq!(ExamStatus::classify(19, 40), ExamStatus::MoreReview);
    }

    #[test]
    fn test_classify_zero_max_score() {
        assert_eq!(ExamStatus::classify(0, 0), ExamStatus::MoreReview);
        assert_eq!(ExamStatus::classify(15, 0), ExamStatus::MoreReview);
    }

    #[test]
    fn test_status_str_round_trip() {
        for status in [
            ExamStatus::PerfectScore,
            ExamStatus::Pass,
            ExamStatus::MoreReview,
        ] {
            assert_eq!(status.to_string().parse::<ExamStatus>().unwrap(), status);
        }
    }
}
