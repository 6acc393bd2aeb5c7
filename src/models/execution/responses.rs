use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{GraderError, Result};

/// 分项得分
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointsBreakdown {
    #[serde(default)]
    pub syntax: i32,
    #[serde(default)]
    pub runtime: i32,
    #[serde(default)]
    pub testcase: i32,
}

impl PointsBreakdown {
    pub fn total(&self) -> i32 {
        self.syntax + self.runtime + self.testcase
    }
}

/// 执行服务的响应
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(rename = "testResults", alias = "test_results", default)]
    pub test_results: Value,
    #[serde(default)]
    pub failures: Value,
    #[serde(default)]
    pub points: Vec<PointsBreakdown>,
}

impl ExecutionResult {
    /// 执行服务只返回一组得分，取第一项
    pub fn breakdown(&self) -> Result<PointsBreakdown> {
        self.points
            .first()
            .copied()
            .ok_or_else(|| GraderError::execution_failure("执行结果缺少 points 字段"))
    }
}

/// 待持久化的判分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAnswer {
    pub syntax_points: i32,
    pub runtime_points: i32,
    pub test_case_points: i32,
    pub total_points: i32,
    pub is_code_success: bool,
    pub test_results: String,
    pub failures: String,
}

impl TryFrom<&ExecutionResult> for GradedAnswer {
    type Error = GraderError;

    fn try_from(result: &ExecutionResult) -> Result<Self> {
        let points = result.breakdown()?;
        Ok(Self {
            syntax_points: points.syntax,
            runtime_points: points.runtime,
            test_case_points: points.testcase,
            total_points: points.total(),
            is_code_success: result.success,
            test_results: serde_json::to_string(&result.test_results)
                .map_err(|e| GraderError::serialization(e.to_string()))?,
            failures: serde_json::to_string(&result.failures)
                .map_err(|e| GraderError::serialization(e.to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graded_answer_from_result() {
        let body = r#"{
            "success": true,
            "testResults": [{"name": "case1", "passed": true}],
            "failures": [],
            "points": [{"syntax": 5, "runtime": 5, "testcase": 10}]
        }"#;
        let result: ExecutionResult = serde_json::from_str(body).unwrap();
        let graded = GradedAnswer::try_from(&result).unwrap();

        assert_eq!(graded.total_points, 20);
        assert_eq!(graded.syntax_points, 5);
        assert_eq!(graded.test_case_points, 10);
        assert!(graded.is_code_success);
        assert_eq!(graded.failures, "[]");
        assert!(graded.test_results.contains("case1"));
    }

    #[test]
    fn test_failed_code_still_scores_partial_points() {
        let body = r#"{"success": false, "failures": ["case2"], "points": [{"syntax": 5}]}"#;
        let result: ExecutionResult = serde_json::from_str(body).unwrap();
        let graded = GradedAnswer::try_from(&result).unwrap();

        assert_eq!(graded.total_points, 5);
        assert!(!graded.is_code_success);
        assert_eq!(graded.test_results, "null");
    }

    #[test]
    fn test_missing_points_is_execution_failure() {
        let result: ExecutionResult = serde_json::from_str(r#"{"success": true}"#).unwrap();
        let err = GradedAnswer::try_from(&result).unwrap_err();
        assert!(matches!(err, GraderError::ExecutionFailure(_)));
    }
}
