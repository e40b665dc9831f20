use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted block average, one row per (student, teacher group, teaching block).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "block_average")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "block_average_key")]
    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    #[sea_orm(unique_key = "block_average_key")]
    pub teacher_group_id: i32,
    #[sea_orm(belongs_to, from = "teacher_group_id", to = "id")]
    pub teacher_group: HasOne<super::teacher_group::Entity>,

    #[sea_orm(unique_key = "block_average_key")]
    pub teaching_block_id: i32,
    #[sea_orm(belongs_to, from = "teaching_block_id", to = "id")]
    pub teaching_block: HasOne<super::teaching_block::Entity>,

    pub daily_average: f64,
    pub practice_average: f64,
    pub exam_average: f64,
    /// Weighted composite of the three component averages.
    pub block_average: f64,

    #[sea_orm(default_value = true)]
    pub status: bool,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
