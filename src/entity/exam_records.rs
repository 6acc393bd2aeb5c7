//! 考试记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_paper_id: i64,
    pub total_score: i32,
    pub status: String,
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
    #[sea_orm(has_many = "super::exam_subject_scores::Entity")]
    SubjectScores,
}

impl Related<super::student_papers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentPaper.def()
    }
}

impl Related<super::exam_subject_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectScores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
