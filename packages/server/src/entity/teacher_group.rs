use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A teacher's assignment to one course for one grade/section in one year.
///
/// Exposed through the API as the "assignment"; its ID is the `assignment_id`
/// used by every averaging operation.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teacher_group")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub teacher_id: i32,
    #[sea_orm(belongs_to, from = "teacher_id", to = "id")]
    pub teacher: HasOne<super::teacher::Entity>,

    pub year_id: i32,
    #[sea_orm(belongs_to, from = "year_id", to = "id")]
    pub year: HasOne<super::year::Entity>,

    pub grade_id: i32,
    #[sea_orm(belongs_to, from = "grade_id", to = "id")]
    pub grade: HasOne<super::grade::Entity>,

    pub section_id: i32,
    #[sea_orm(belongs_to, from = "section_id", to = "id")]
    pub section: HasOne<super::section::Entity>,

    pub course_id: i32,
    #[sea_orm(belongs_to, from = "course_id", to = "id")]
    pub course: HasOne<super::course::Entity>,

    #[sea_orm(default_value = true)]
    pub status: bool,
}

impl ActiveModelBehavior for ActiveModel {}
