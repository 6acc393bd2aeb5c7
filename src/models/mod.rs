pub mod answers;
pub mod exams;
pub mod execution;
pub mod jobs;
pub mod status;

pub use answers::entities::{AnswerRecord, CodingAnswerRecord};
pub use exams::entities::{ExamContext, ExamRecord, ExamStatus, ExamSummary, SubjectScore};
pub use execution::requests::ExecutionRequest;
pub use execution::responses::{ExecutionResult, GradedAnswer, PointsBreakdown};
pub use jobs::entities::{JobBatch, SubmissionJob};
pub use status::entities::JobStatus;
