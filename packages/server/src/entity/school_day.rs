use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "school_day")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub year_id: i32,
    #[sea_orm(belongs_to, from = "year_id", to = "id")]
    pub year: HasOne<super::year::Entity>,

    #[sea_orm(unique)]
    pub date: Date,
}

impl ActiveModelBehavior for ActiveModel {}
