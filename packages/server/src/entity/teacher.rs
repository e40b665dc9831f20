use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teacher")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub first_name: String,
    pub last_name: String,

    #[sea_orm(has_many)]
    pub groups: HasMany<super::teacher_group::Entity>,

    #[sea_orm(default_value = true)]
    pub status: bool,
}

impl ActiveModelBehavior for ActiveModel {}
