//! 预导入模块，方便使用

pub use super::answers::{ActiveModel as AnswerActiveModel, Entity as Answers, Model as AnswerModel};
pub use super::coding_answers::{
    ActiveModel as CodingAnswerActiveModel, Entity as CodingAnswers, Model as CodingAnswerModel,
};
pub use super::exam_records::{
    ActiveModel as ExamRecordActiveModel, Entity as ExamRecords, Model as ExamRecordModel,
};
pub use super::exam_subject_scores::{
    ActiveModel as ExamSubjectScoreActiveModel, Entity as ExamSubjectScores,
    Model as ExamSubjectScoreModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::student_papers::{
    ActiveModel as StudentPaperActiveModel, Entity as StudentPapers, Model as StudentPaperModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::topics::{ActiveModel as TopicActiveModel, Entity as Topics, Model as TopicModel};
