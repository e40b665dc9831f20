use chrono::{DateTime, Utc};
use common::ExamKind;
use serde::{Deserialize, Serialize};

use crate::entity::{exam_record, qualification};
use crate::error::AppError;
use crate::models::shared::{require_id, validate_score};

/// Request body for recording a daily qualification.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateQualificationRequest {
    #[schema(example = 12)]
    pub student_id: Option<i32>,
    /// Class slot the qualification was given in.
    #[schema(example = 5)]
    pub schedule_id: Option<i32>,
    #[schema(example = 31)]
    pub school_day_id: Option<i32>,
    /// Omit when the day is not bucketed into a teaching block.
    #[schema(example = 1)]
    pub teaching_block_id: Option<i32>,
    /// Rating on the 0-20 scale. Omit when the student attended but was not rated.
    #[schema(example = 14.5)]
    pub rating: Option<f64>,
}

/// Validated qualification input.
pub struct NewQualification {
    pub student_id: i32,
    pub schedule_id: i32,
    pub school_day_id: i32,
    pub teaching_block_id: Option<i32>,
    pub rating: Option<f64>,
}

pub fn validate_create_qualification(
    payload: &CreateQualificationRequest,
) -> Result<NewQualification, AppError> {
    let teaching_block_id = match payload.teaching_block_id {
        Some(_) => Some(require_id(payload.teaching_block_id, "teaching_block_id")?),
        None => None,
    };
    if let Some(rating) = payload.rating {
        validate_score(rating, "rating")?;
    }
    Ok(NewQualification {
        student_id: require_id(payload.student_id, "student_id")?,
        schedule_id: require_id(payload.schedule_id, "schedule_id")?,
        school_day_id: require_id(payload.school_day_id, "school_day_id")?,
        teaching_block_id,
        rating: payload.rating,
    })
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct QualificationResponse {
    #[schema(example = 301)]
    pub id: i32,
    #[schema(example = 12)]
    pub student_id: i32,
    #[schema(example = 5)]
    pub schedule_id: i32,
    #[schema(example = 31)]
    pub school_day_id: i32,
    #[schema(example = 1)]
    pub teaching_block_id: Option<i32>,
    #[schema(example = 14.5)]
    pub rating: Option<f64>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl From<qualification::Model> for QualificationResponse {
    fn from(m: qualification::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            schedule_id: m.schedule_id,
            school_day_id: m.school_day_id,
            teaching_block_id: m.teaching_block_id,
            rating: m.rating,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

/// Request body for recording an exam or practice score.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateExamRecordRequest {
    #[schema(example = 12)]
    pub student_id: Option<i32>,
    /// Teacher group ID.
    #[schema(example = 3)]
    pub assignment_id: Option<i32>,
    #[schema(example = 1)]
    pub teaching_block_id: Option<i32>,
    pub kind: ExamKind,
    /// Score on the 0-20 scale.
    #[schema(example = 16.0)]
    pub score: f64,
}

/// Validated exam record input.
pub struct NewExamRecord {
    pub student_id: i32,
    pub teacher_group_id: i32,
    pub teaching_block_id: i32,
    pub kind: ExamKind,
    pub score: f64,
}

pub fn validate_create_exam_record(
    payload: &CreateExamRecordRequest,
) -> Result<NewExamRecord, AppError> {
    validate_score(payload.score, "score")?;
    Ok(NewExamRecord {
        student_id: require_id(payload.student_id, "student_id")?,
        teacher_group_id: require_id(payload.assignment_id, "assignment_id")?,
        teaching_block_id: require_id(payload.teaching_block_id, "teaching_block_id")?,
        kind: payload.kind,
        score: payload.score,
    })
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ExamRecordResponse {
    #[schema(example = 88)]
    pub id: i32,
    #[schema(example = 12)]
    pub student_id: i32,
    #[schema(example = 3)]
    pub assignment_id: i32,
    #[schema(example = 1)]
    pub teaching_block_id: i32,
    pub kind: ExamKind,
    #[schema(example = 16.0)]
    pub score: f64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl From<exam_record::Model> for ExamRecordResponse {
    fn from(m: exam_record::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            assignment_id: m.teacher_group_id,
            teaching_block_id: m.teaching_block_id,
            kind: m.kind,
            score: m.score,
            status: m.status,
            created_at: m.created_at,
        }
    }
}
