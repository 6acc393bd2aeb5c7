use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建考试表
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::Title).string().not_null())
                    .col(
                        ColumnDef::new(Exams::MaxScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建知识点表
        manager
            .create_table(
                Table::create()
                    .table(Topics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Topics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Topics::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Topics::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Topics::Table, Topics::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(Questions::TopicId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Questions::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::TopicId)
                            .to(Topics::Table, Topics::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生答卷表
        manager
            .create_table(
                Table::create()
                    .table(StudentPapers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentPapers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentPapers::ExamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentPapers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentPapers::Table, StudentPapers::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建答案表
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Answers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Answers::StudentPaperId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Answers::QuestionId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Answers::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Answers::IsAnswered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Answers::IsCorrect)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Answers::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::StudentPaperId)
                            .to(StudentPapers::Table, StudentPapers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建编程题答案表
        manager
            .create_table(
                Table::create()
                    .table(CodingAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CodingAnswers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CodingAnswers::AnswerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CodingAnswers::Language).string().not_null())
                    .col(
                        ColumnDef::new(CodingAnswers::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(CodingAnswers::AnswerSyntaxPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CodingAnswers::AnswerRuntimePoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CodingAnswers::AnswerTestCasePoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CodingAnswers::IsCodeSuccess)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CodingAnswers::TestResults).text().null())
                    .col(ColumnDef::new(CodingAnswers::Failures).text().null())
                    .col(
                        ColumnDef::new(CodingAnswers::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CodingAnswers::Table, CodingAnswers::AnswerId)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试记录表
        manager
            .create_table(
                Table::create()
                    .table(ExamRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExamRecords::StudentPaperId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ExamRecords::TotalScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ExamRecords::Status)
                            .string()
                            .not_null()
                            .default("more_review"),
                    )
                    .col(
                        ColumnDef::new(ExamRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamRecords::Table, ExamRecords::StudentPaperId)
                            .to(StudentPapers::Table, StudentPapers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试科目得分表
        manager
            .create_table(
                Table::create()
                    .table(ExamSubjectScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamSubjectScores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExamSubjectScores::ExamRecordId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamSubjectScores::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamSubjectScores::ScoreObtained)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ExamSubjectScores::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamSubjectScores::Table, ExamSubjectScores::ExamRecordId)
                            .to(ExamRecords::Table, ExamRecords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamSubjectScores::Table, ExamSubjectScores::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_answers_student_paper_id")
                    .table(Answers::Table)
                    .col(Answers::StudentPaperId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_coding_answers_answer_id")
                    .table(CodingAnswers::Table)
                    .col(CodingAnswers::AnswerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_exam_subject_scores_record_subject")
                    .table(ExamSubjectScores::Table)
                    .col(ExamSubjectScores::ExamRecordId)
                    .col(ExamSubjectScores::SubjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ExamSubjectScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CodingAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Answers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentPapers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Topics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    Title,
    MaxScore,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Topics {
    #[sea_orm(iden = "topics")]
    Table,
    Id,
    SubjectId,
    Name,
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    ExamId,
    TopicId,
    Points,
}

#[derive(DeriveIden)]
enum StudentPapers {
    #[sea_orm(iden = "student_papers")]
    Table,
    Id,
    ExamId,
    UserId,
}

#[derive(DeriveIden)]
enum Answers {
    #[sea_orm(iden = "answers")]
    Table,
    Id,
    StudentPaperId,
    QuestionId,
    Points,
    IsAnswered,
    IsCorrect,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CodingAnswers {
    #[sea_orm(iden = "coding_answers")]
    Table,
    Id,
    AnswerId,
    Language,
    Status,
    AnswerSyntaxPoints,
    AnswerRuntimePoints,
    AnswerTestCasePoints,
    IsCodeSuccess,
    TestResults,
    Failures,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamRecords {
    #[sea_orm(iden = "exam_records")]
    Table,
    Id,
    StudentPaperId,
    TotalScore,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamSubjectScores {
    #[sea_orm(iden = "exam_subject_scores")]
    Table,
    Id,
    ExamRecordId,
    SubjectId,
    ScoreObtained,
    UpdatedAt,
}
