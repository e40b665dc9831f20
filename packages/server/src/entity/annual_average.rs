use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted annual course average, one row per (student, teacher group, year).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annual_average")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "annual_average_key")]
    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    #[sea_orm(unique_key = "annual_average_key")]
    pub teacher_group_id: i32,
    #[sea_orm(belongs_to, from = "teacher_group_id", to = "id")]
    pub teacher_group: HasOne<super::teacher_group::Entity>,

    #[sea_orm(unique_key = "annual_average_key")]
    pub year_id: i32,
    #[sea_orm(belongs_to, from = "year_id", to = "id")]
    pub year: HasOne<super::year::Entity>,

    // Slots are indexed by teaching block ordinal.
    pub block1_average: Option<f64>,
    pub block2_average: Option<f64>,
    pub block3_average: Option<f64>,
    pub block4_average: Option<f64>,
    pub course_average: f64,

    #[sea_orm(default_value = true)]
    pub status: bool,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
