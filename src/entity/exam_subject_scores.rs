//! 考试科目得分实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_subject_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_record_id: i64,
    pub subject_id: i64,
    pub score_obtained: i32,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam_records::Entity",
        from = "Column::ExamRecordId",
        to = "super::exam_records::Column::Id"
    )]
    ExamRecord,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::exam_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamRecord.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
