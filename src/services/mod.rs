pub mod exams;
pub mod grading;

pub use exams::ExamAggregator;
pub use grading::{GradingService, JobOutcome};
