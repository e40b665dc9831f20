use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A weekly class slot for one course in one grade/section.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub grade_id: i32,
    #[sea_orm(belongs_to, from = "grade_id", to = "id")]
    pub grade: HasOne<super::grade::Entity>,

    pub section_id: i32,
    #[sea_orm(belongs_to, from = "section_id", to = "id")]
    pub section: HasOne<super::section::Entity>,

    pub course_id: i32,
    #[sea_orm(belongs_to, from = "course_id", to = "id")]
    pub course: HasOne<super::course::Entity>,

    /// Assignment teaching this slot, when one has been staffed.
    pub teacher_group_id: Option<i32>,
    #[sea_orm(belongs_to, from = "teacher_group_id", to = "id")]
    pub teacher_group: BelongsTo<Option<super::teacher_group::Entity>>,

    /// ISO weekday, 1 = Monday.
    pub weekday: i32,
    pub start_time: Time,
    pub end_time: Time,
}

impl ActiveModelBehavior for ActiveModel {}
