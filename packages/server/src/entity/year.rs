use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Academic year.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "year")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display label, e.g. "2025".
    #[sea_orm(unique)]
    pub label: String,

    #[sea_orm(has_many)]
    pub teaching_blocks: HasMany<super::teaching_block::Entity>,

    #[sea_orm(default_value = true)]
    pub status: bool,
}

impl ActiveModelBehavior for ActiveModel {}
