use common::ExamKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Score of one student in one graded exam or practice.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exam_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    pub teacher_group_id: i32,
    #[sea_orm(belongs_to, from = "teacher_group_id", to = "id")]
    pub teacher_group: HasOne<super::teacher_group::Entity>,

    pub teaching_block_id: i32,
    #[sea_orm(belongs_to, from = "teaching_block_id", to = "id")]
    pub teaching_block: HasOne<super::teaching_block::Entity>,

    pub kind: ExamKind,
    pub score: f64,

    #[sea_orm(default_value = true, indexed)]
    pub status: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
