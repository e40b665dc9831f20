use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{annual_average, block_average};
use crate::error::AppError;
use crate::grading::{BlockKey, YearKey};
use crate::models::shared::require_id;

/// Request body for computing a block average.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BlockAverageRequest {
    #[schema(example = 12)]
    pub student_id: Option<i32>,
    /// Teacher group ID.
    #[schema(example = 3)]
    pub assignment_id: Option<i32>,
    #[schema(example = 1)]
    pub teaching_block_id: Option<i32>,
}

pub fn validate_block_average_request(payload: &BlockAverageRequest) -> Result<BlockKey, AppError> {
    Ok(BlockKey {
        student_id: require_id(payload.student_id, "student_id")?,
        teacher_group_id: require_id(payload.assignment_id, "assignment_id")?,
        teaching_block_id: require_id(payload.teaching_block_id, "teaching_block_id")?,
    })
}

/// Request body for computing an annual average.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AnnualAverageRequest {
    #[schema(example = 12)]
    pub student_id: Option<i32>,
    /// Teacher group ID.
    #[schema(example = 3)]
    pub assignment_id: Option<i32>,
    #[schema(example = 1)]
    pub year_id: Option<i32>,
}

pub fn validate_annual_average_request(payload: &AnnualAverageRequest) -> Result<YearKey, AppError> {
    Ok(YearKey {
        student_id: require_id(payload.student_id, "student_id")?,
        teacher_group_id: require_id(payload.assignment_id, "assignment_id")?,
        year_id: require_id(payload.year_id, "year_id")?,
    })
}

/// A persisted block average.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlockAverageResponse {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = 12)]
    pub student_id: i32,
    #[schema(example = 3)]
    pub assignment_id: i32,
    #[schema(example = 1)]
    pub teaching_block_id: i32,
    #[schema(example = 7.0)]
    pub daily_average: f64,
    #[schema(example = 10.0)]
    pub practice_average: f64,
    #[schema(example = 5.0)]
    pub exam_average: f64,
    #[schema(example = 7.1)]
    pub block_average: f64,
    pub status: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<block_average::Model> for BlockAverageResponse {
    fn from(m: block_average::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            assignment_id: m.teacher_group_id,
            teaching_block_id: m.teaching_block_id,
            daily_average: m.daily_average,
            practice_average: m.practice_average,
            exam_average: m.exam_average,
            block_average: m.block_average,
            status: m.status,
            updated_at: m.updated_at,
        }
    }
}

/// A persisted annual average.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AnnualAverageResponse {
    #[schema(example = 4)]
    pub id: i32,
    #[schema(example = 12)]
    pub student_id: i32,
    #[schema(example = 3)]
    pub assignment_id: i32,
    #[schema(example = 1)]
    pub year_id: i32,
    #[schema(example = 6.0)]
    pub block1_average: Option<f64>,
    #[schema(example = json!(null))]
    pub block2_average: Option<f64>,
    #[schema(example = 8.0)]
    pub block3_average: Option<f64>,
    #[schema(example = json!(null))]
    pub block4_average: Option<f64>,
    #[schema(example = 7.0)]
    pub course_average: f64,
    pub status: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<annual_average::Model> for AnnualAverageResponse {
    fn from(m: annual_average::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            assignment_id: m.teacher_group_id,
            year_id: m.year_id,
            block1_average: m.block1_average,
            block2_average: m.block2_average,
            block3_average: m.block3_average,
            block4_average: m.block4_average,
            course_average: m.course_average,
            status: m.status,
            updated_at: m.updated_at,
        }
    }
}

/// Descriptive attributes of the assignment an average belongs to.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AssignmentInfo {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Mathematics")]
    pub course: String,
    #[schema(example = "5th")]
    pub grade: String,
    #[schema(example = "A")]
    pub section: String,
}

/// Block average joined with the names needed for presentation.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BlockAverageView {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = 12)]
    pub student_id: i32,
    #[schema(example = "Ana Quispe")]
    pub student_name: String,
    pub assignment: AssignmentInfo,
    #[schema(example = 1)]
    pub teaching_block_id: i32,
    #[schema(example = "First bimester")]
    pub teaching_block_name: String,
    /// Position of the block within its year.
    #[schema(example = 1)]
    pub teaching_block_ordinal: i32,
    #[schema(example = 1)]
    pub year_id: i32,
    #[schema(example = "2025")]
    pub year_label: String,
    #[schema(example = 7.0)]
    pub daily_average: f64,
    #[schema(example = 10.0)]
    pub practice_average: f64,
    #[schema(example = 5.0)]
    pub exam_average: f64,
    #[schema(example = 7.1)]
    pub block_average: f64,
    pub updated_at: DateTime<Utc>,
}

/// Annual average joined with the names needed for presentation.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AnnualAverageView {
    #[schema(example = 4)]
    pub id: i32,
    #[schema(example = 12)]
    pub student_id: i32,
    #[schema(example = "Ana Quispe")]
    pub student_name: String,
    pub assignment: AssignmentInfo,
    #[schema(example = 1)]
    pub year_id: i32,
    #[schema(example = "2025")]
    pub year_label: String,
    #[schema(example = 6.0)]
    pub block1_average: Option<f64>,
    #[schema(example = json!(null))]
    pub block2_average: Option<f64>,
    #[schema(example = 8.0)]
    pub block3_average: Option<f64>,
    #[schema(example = json!(null))]
    pub block4_average: Option<f64>,
    #[schema(example = 7.0)]
    pub course_average: f64,
    pub updated_at: DateTime<Utc>,
}

/// Optional year restriction for per-student listings.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct YearQuery {
    /// Only include averages of this year.
    #[param(example = 1)]
    pub year_id: Option<i32>,
}

/// Query for block averages of one student in one assignment and year.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BlockAverageLookupQuery {
    #[param(example = 12)]
    pub student_id: Option<i32>,
    /// Teacher group ID.
    #[param(example = 3)]
    pub assignment_id: Option<i32>,
    #[param(example = 1)]
    pub year_id: Option<i32>,
}
