use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily qualification of one student in one class session.
///
/// Rows are never deleted; `status = false` removes them from every average.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "qualification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    pub schedule_id: i32,
    #[sea_orm(belongs_to, from = "schedule_id", to = "id")]
    pub schedule: HasOne<super::schedule::Entity>,

    pub school_day_id: i32,
    #[sea_orm(belongs_to, from = "school_day_id", to = "id")]
    pub school_day: HasOne<super::school_day::Entity>,

    /// NULL when the session was not bucketed into a block.
    pub teaching_block_id: Option<i32>,
    #[sea_orm(belongs_to, from = "teaching_block_id", to = "id")]
    pub teaching_block: BelongsTo<Option<super::teaching_block::Entity>>,

    /// NULL when the student attended but was not rated.
    pub rating: Option<f64>,

    #[sea_orm(default_value = true, indexed)]
    pub status: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
