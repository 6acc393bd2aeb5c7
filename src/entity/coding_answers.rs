//! 编程题答案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "coding_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub answer_id: i64,
    pub language: String,
    pub status: String,
    pub answer_syntax_points: i32,
    pub answer_runtime_points: i32,
    pub answer_test_case_points: i32,
    pub is_code_success: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub test_results: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub failures: Option<String>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::answers::Entity",
        from = "Column::AnswerId",
        to = "super::answers::Column::Id"
    )]
    Answer,
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
