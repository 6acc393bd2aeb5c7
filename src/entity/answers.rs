//! 答案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_paper_id: i64,
    pub question_id: i64,
    pub points: i32,
    pub is_answered: bool,
    pub is_correct: bool,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_papers::Entity",
        from = "Column::StudentPaperId",
        to = "super::student_papers::Column::Id"
    )]
    StudentPaper,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
    #[sea_orm(has_many = "super::coding_answers::Entity")]
    CodingAnswers,
}

impl Related<super::student_papers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentPaper.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::coding_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CodingAnswers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
