use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A grading period within a year (e.g. a bimester).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teaching_block")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "year_ordinal")]
    pub year_id: i32,
    #[sea_orm(belongs_to, from = "year_id", to = "id")]
    pub year: HasOne<super::year::Entity>,

    /// Position of the block within its year, 1-based. Selects the annual average slot.
    #[sea_orm(unique_key = "year_ordinal")]
    pub ordinal: i32,

    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
}

impl ActiveModelBehavior for ActiveModel {}
