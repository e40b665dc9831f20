use chrono::NaiveDate;
use common::BLOCKS_PER_YEAR;
use serde::{Deserialize, Serialize};

use crate::entity::teaching_block;
use crate::error::AppError;

/// Request body for adding a teaching block to a year.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateTeachingBlockRequest {
    /// Display name (1-64 characters).
    #[schema(example = "First bimester")]
    pub name: String,
    /// Position within the year, 1-4. Unique per year.
    #[schema(example = 1)]
    pub ordinal: i32,
    #[schema(value_type = String, format = Date, example = "2025-03-10")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-05-16")]
    pub end_date: NaiveDate,
}

pub fn validate_create_teaching_block(payload: &CreateTeachingBlockRequest) -> Result<(), AppError> {
    let name = payload.name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(AppError::Validation("Name must be 1-64 characters".into()));
    }
    if !(1..=BLOCKS_PER_YEAR as i32).contains(&payload.ordinal) {
        return Err(AppError::Validation(format!(
            "Ordinal must be between 1 and {BLOCKS_PER_YEAR}"
        )));
    }
    if payload.end_date < payload.start_date {
        return Err(AppError::Validation(
            "end_date must not be before start_date".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeachingBlockResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub year_id: i32,
    #[schema(example = 1)]
    pub ordinal: i32,
    #[schema(example = "First bimester")]
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2025-03-10")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-05-16")]
    pub end_date: NaiveDate,
}

impl From<teaching_block::Model> for TeachingBlockResponse {
    fn from(m: teaching_block::Model) -> Self {
        Self {
            id: m.id,
            year_id: m.year_id,
            ordinal: m.ordinal,
            name: m.name,
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}
