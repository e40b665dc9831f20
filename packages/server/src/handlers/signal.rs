use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{exam_record, qualification};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::params::AppPath;
use crate::models::signal::{
    CreateExamRecordRequest, CreateQualificationRequest, ExamRecordResponse,
    QualificationResponse, validate_create_exam_record, validate_create_qualification,
};
use crate::state::AppState;
use crate::utils::lookup::{
    find_exam_record, find_qualification, find_schedule, find_school_day, find_student,
    find_teacher_group, find_teaching_block,
};

/// Record a daily qualification.
#[utoipa::path(
    post,
    path = "/qualifications",
    tag = "Signals",
    operation_id = "createQualification",
    summary = "Record a daily qualification",
    description = "Records one student's rating for one class session. When a teaching block is given it must belong to the school day's year. Requires `signal:record` permission.",
    request_body = CreateQualificationRequest,
    responses(
        (status = 201, description = "Qualification recorded", body = QualificationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Referenced row not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_qualification(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateQualificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("signal:record")?;
    let input = validate_create_qualification(&payload)?;

    let txn = state.db.begin().await?;

    find_student(&txn, input.student_id).await?;
    find_schedule(&txn, input.schedule_id).await?;
    let day = find_school_day(&txn, input.school_day_id).await?;
    if let Some(block_id) = input.teaching_block_id {
        let block = find_teaching_block(&txn, block_id).await?;
        if block.year_id != day.year_id {
            return Err(AppError::Validation(
                "Teaching block does not belong to the school day's year".into(),
            ));
        }
    }

    let model = qualification::ActiveModel {
        student_id: Set(input.student_id),
        schedule_id: Set(input.schedule_id),
        school_day_id: Set(input.school_day_id),
        teaching_block_id: Set(input.teaching_block_id),
        rating: Set(input.rating),
        status: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(qualification_id = model.id, "Qualification recorded");
    Ok((StatusCode::CREATED, Json(QualificationResponse::from(model))))
}

/// Deactivate a qualification.
#[utoipa::path(
    delete,
    path = "/qualifications/{id}",
    tag = "Signals",
    operation_id = "deactivateQualification",
    summary = "Deactivate a qualification",
    description = "Marks the qualification inactive so it no longer counts towards any average. The row is kept. Requires `signal:record` permission.",
    params(
        ("id" = i32, Path, description = "Qualification ID")
    ),
    responses(
        (status = 204, description = "Qualification deactivated"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Qualification not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn deactivate_qualification(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("signal:record")?;

    let existing = find_qualification(&state.db, id).await?;
    if existing.status {
        let mut active: qualification::ActiveModel = existing.into();
        active.status = Set(false);
        active.update(&state.db).await?;
        info!("Qualification deactivated");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Record an exam or practice score.
#[utoipa::path(
    post,
    path = "/exam-records",
    tag = "Signals",
    operation_id = "createExamRecord",
    summary = "Record an exam or practice score",
    description = "The teaching block must belong to the assignment's year. Requires `signal:record` permission.",
    request_body = CreateExamRecordRequest,
    responses(
        (status = 201, description = "Exam record created", body = ExamRecordResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Referenced row not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_exam_record(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateExamRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("signal:record")?;
    let input = validate_create_exam_record(&payload)?;

    let txn = state.db.begin().await?;

    find_student(&txn, input.student_id).await?;
    let group = find_teacher_group(&txn, input.teacher_group_id).await?;
    let block = find_teaching_block(&txn, input.teaching_block_id).await?;
    if block.year_id != group.year_id {
        return Err(AppError::Validation(
            "Teaching block does not belong to the assignment's year".into(),
        ));
    }

    let model = exam_record::ActiveModel {
        student_id: Set(input.student_id),
        teacher_group_id: Set(input.teacher_group_id),
        teaching_block_id: Set(input.teaching_block_id),
        kind: Set(input.kind),
        score: Set(input.score),
        status: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(exam_record_id = model.id, kind = %model.kind, "Exam record created");
    Ok((StatusCode::CREATED, Json(ExamRecordResponse::from(model))))
}

/// Deactivate an exam record.
#[utoipa::path(
    delete,
    path = "/exam-records/{id}",
    tag = "Signals",
    operation_id = "deactivateExamRecord",
    summary = "Deactivate an exam record",
    description = "Marks the record inactive so it no longer counts towards any average. Requires `signal:record` permission.",
    params(
        ("id" = i32, Path, description = "Exam record ID")
    ),
    responses(
        (status = 204, description = "Exam record deactivated"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Exam record not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn deactivate_exam_record(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("signal:record")?;

    let existing = find_exam_record(&state.db, id).await?;
    if existing.status {
        let mut active: exam_record::ActiveModel = existing.into();
        active.status = Set(false);
        active.update(&state.db).await?;
        info!("Exam record deactivated");
    }

    Ok(StatusCode::NO_CONTENT)
}
