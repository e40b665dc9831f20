use axum::{Json, extract::State};
use common::{AnnualAverageValues, BlockAverageValues};
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::params::{AppPath, AppQuery};
use crate::grading::query::{list_annual_averages, list_block_averages};
use crate::grading::{AnnualAverageFilter, BlockAverageFilter, GradingService};
use crate::models::average::{
    AnnualAverageRequest, AnnualAverageResponse, AnnualAverageView, BlockAverageLookupQuery,
    BlockAverageRequest, BlockAverageResponse, BlockAverageView, YearQuery,
    validate_annual_average_request, validate_block_average_request,
};
use crate::models::shared::{EmptyListBody, ListResponse, SoftList, require_id};
use crate::state::AppState;

const NO_BLOCK_AVERAGES: &str = "No block averages found";
const NO_ANNUAL_AVERAGES: &str = "No annual averages found";

/// Compute a block average without saving it.
#[utoipa::path(
    post,
    path = "/blocks/preview",
    tag = "Block Averages",
    operation_id = "previewBlockAverage",
    summary = "Preview a block average",
    description = "Computes the daily, practice and exam component averages and the weighted block average for one student, assignment and teaching block. Nothing is persisted. Requires `grade:compute` permission.",
    request_body = BlockAverageRequest,
    responses(
        (status = 200, description = "Computed values", body = BlockAverageValues),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Student, assignment or block not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn preview_block_average(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlockAverageRequest>,
) -> Result<Json<BlockAverageValues>, AppError> {
    auth_user.require_permission("grade:compute")?;
    let key = validate_block_average_request(&payload)?;

    let values = GradingService::new(&state.db, state.weights)
        .compute_block_average(key)
        .await?;

    Ok(Json(values))
}

/// Compute a block average and save it.
#[utoipa::path(
    post,
    path = "/blocks",
    tag = "Block Averages",
    operation_id = "saveBlockAverage",
    summary = "Compute and save a block average",
    description = "Computes the block average and creates or overwrites the single stored row for (student, assignment, teaching block). Requires `grade:compute` permission.",
    request_body = BlockAverageRequest,
    responses(
        (status = 200, description = "Saved block average", body = BlockAverageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Student, assignment or block not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn save_block_average(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlockAverageRequest>,
) -> Result<Json<BlockAverageResponse>, AppError> {
    auth_user.require_permission("grade:compute")?;
    let key = validate_block_average_request(&payload)?;

    let txn = state.db.begin().await?;
    let saved = GradingService::new(&txn, state.weights)
        .save_block_average(key)
        .await?;
    txn.commit().await?;

    Ok(Json(saved.into()))
}

/// Compute an annual average without saving it.
#[utoipa::path(
    post,
    path = "/annual/preview",
    tag = "Annual Averages",
    operation_id = "previewAnnualAverage",
    summary = "Preview an annual average",
    description = "Rolls the stored block averages of the year into four block slots and a course average. Nothing is persisted. Requires `grade:compute` permission.",
    request_body = AnnualAverageRequest,
    responses(
        (status = 200, description = "Computed values", body = AnnualAverageValues),
        (status = 400, description = "Validation error or no usable block averages (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Assignment or year not found, or no block averages for the year (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn preview_annual_average(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AnnualAverageRequest>,
) -> Result<Json<AnnualAverageValues>, AppError> {
    auth_user.require_permission("grade:compute")?;
    let key = validate_annual_average_request(&payload)?;

    let values = GradingService::new(&state.db, state.weights)
        .compute_annual_average(key)
        .await?;

    Ok(Json(values))
}

/// Compute an annual average and save it.
#[utoipa::path(
    post,
    path = "/annual",
    tag = "Annual Averages",
    operation_id = "saveAnnualAverage",
    summary = "Compute and save an annual average",
    description = "Rolls the stored block averages of the year into a course average and creates or overwrites the single stored row for (student, assignment, year). Requires `grade:compute` permission.",
    request_body = AnnualAverageRequest,
    responses(
        (status = 200, description = "Saved annual average", body = AnnualAverageResponse),
        (status = 400, description = "Validation error or no usable block averages (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Assignment or year not found, or no block averages for the year (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn save_annual_average(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AnnualAverageRequest>,
) -> Result<Json<AnnualAverageResponse>, AppError> {
    auth_user.require_permission("grade:compute")?;
    let key = validate_annual_average_request(&payload)?;

    let txn = state.db.begin().await?;
    let saved = GradingService::new(&txn, state.weights)
        .save_annual_average(key)
        .await?;
    txn.commit().await?;

    Ok(Json(saved.into()))
}

/// Block averages of one student.
#[utoipa::path(
    get,
    path = "/blocks/students/{student_id}",
    tag = "Block Averages",
    operation_id = "listStudentBlockAverages",
    summary = "List a student's block averages",
    description = "Returns the student's active block averages, optionally restricted to one year, ordered by block ordinal. Requires `grade:view` permission.",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
        YearQuery,
    ),
    responses(
        (status = 200, description = "Block averages", body = ListResponse<BlockAverageView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Nothing found", body = EmptyListBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(student_id = %student_id))]
pub async fn list_student_block_averages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(student_id): AppPath<i32>,
    AppQuery(query): AppQuery<YearQuery>,
) -> Result<SoftList<BlockAverageView>, AppError> {
    auth_user.require_permission("grade:view")?;

    let filter = BlockAverageFilter {
        student_id: Some(student_id),
        year_id: query.year_id,
        ..Default::default()
    };
    let views = list_block_averages(&state.db, &filter).await?;
    Ok(SoftList::new(views, NO_BLOCK_AVERAGES))
}

/// Block averages of one student in one assignment and year.
#[utoipa::path(
    get,
    path = "/blocks",
    tag = "Block Averages",
    operation_id = "lookupBlockAverages",
    summary = "Look up block averages by student, assignment and year",
    description = "All three query parameters are required. Requires `grade:view` permission.",
    params(BlockAverageLookupQuery),
    responses(
        (status = 200, description = "Block averages", body = ListResponse<BlockAverageView>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Nothing found", body = EmptyListBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn lookup_block_averages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BlockAverageLookupQuery>,
) -> Result<SoftList<BlockAverageView>, AppError> {
    auth_user.require_permission("grade:view")?;

    let filter = BlockAverageFilter {
        student_id: Some(require_id(query.student_id, "student_id")?),
        teacher_group_id: Some(require_id(query.assignment_id, "assignment_id")?),
        year_id: Some(require_id(query.year_id, "year_id")?),
        ..Default::default()
    };
    let views = list_block_averages(&state.db, &filter).await?;
    Ok(SoftList::new(views, NO_BLOCK_AVERAGES))
}

/// Block averages of every student in one assignment.
#[utoipa::path(
    get,
    path = "/blocks/groups/{assignment_id}",
    tag = "Block Averages",
    operation_id = "listGroupBlockAverages",
    summary = "List block averages of an assignment",
    description = "Requires `grade:view` permission.",
    params(
        ("assignment_id" = i32, Path, description = "Teacher group ID")
    ),
    responses(
        (status = 200, description = "Block averages", body = ListResponse<BlockAverageView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Nothing found", body = EmptyListBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(assignment_id = %assignment_id))]
pub async fn list_group_block_averages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(assignment_id): AppPath<i32>,
) -> Result<SoftList<BlockAverageView>, AppError> {
    auth_user.require_permission("grade:view")?;

    let filter = BlockAverageFilter {
        teacher_group_id: Some(assignment_id),
        ..Default::default()
    };
    let views = list_block_averages(&state.db, &filter).await?;
    Ok(SoftList::new(views, NO_BLOCK_AVERAGES))
}

/// Block averages recorded for one teaching block.
#[utoipa::path(
    get,
    path = "/blocks/teaching-blocks/{teaching_block_id}",
    tag = "Block Averages",
    operation_id = "listTeachingBlockAverages",
    summary = "List block averages of a teaching block",
    description = "Requires `grade:view` permission.",
    params(
        ("teaching_block_id" = i32, Path, description = "Teaching block ID")
    ),
    responses(
        (status = 200, description = "Block averages", body = ListResponse<BlockAverageView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Nothing found", body = EmptyListBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(teaching_block_id = %teaching_block_id))]
pub async fn list_teaching_block_averages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(teaching_block_id): AppPath<i32>,
) -> Result<SoftList<BlockAverageView>, AppError> {
    auth_user.require_permission("grade:view")?;

    let filter = BlockAverageFilter {
        teaching_block_id: Some(teaching_block_id),
        ..Default::default()
    };
    let views = list_block_averages(&state.db, &filter).await?;
    Ok(SoftList::new(views, NO_BLOCK_AVERAGES))
}

/// Annual averages of one student.
#[utoipa::path(
    get,
    path = "/annual/students/{student_id}",
    tag = "Annual Averages",
    operation_id = "listStudentAnnualAverages",
    summary = "List a student's annual averages",
    description = "Returns the student's active annual averages, optionally restricted to one year. Requires `grade:view` permission.",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
        YearQuery,
    ),
    responses(
        (status = 200, description = "Annual averages", body = ListResponse<AnnualAverageView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Nothing found", body = EmptyListBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(student_id = %student_id))]
pub async fn list_student_annual_averages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(student_id): AppPath<i32>,
    AppQuery(query): AppQuery<YearQuery>,
) -> Result<SoftList<AnnualAverageView>, AppError> {
    auth_user.require_permission("grade:view")?;

    let filter = AnnualAverageFilter {
        student_id: Some(student_id),
        year_id: query.year_id,
        ..Default::default()
    };
    let views = list_annual_averages(&state.db, &filter).await?;
    Ok(SoftList::new(views, NO_ANNUAL_AVERAGES))
}

/// Annual averages of every student in one assignment.
#[utoipa::path(
    get,
    path = "/annual/groups/{assignment_id}",
    tag = "Annual Averages",
    operation_id = "listGroupAnnualAverages",
    summary = "List annual averages of an assignment",
    description = "Requires `grade:view` permission.",
    params(
        ("assignment_id" = i32, Path, description = "Teacher group ID")
    ),
    responses(
        (status = 200, description = "Annual averages", body = ListResponse<AnnualAverageView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Nothing found", body = EmptyListBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(assignment_id = %assignment_id))]
pub async fn list_group_annual_averages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(assignment_id): AppPath<i32>,
) -> Result<SoftList<AnnualAverageView>, AppError> {
    auth_user.require_permission("grade:view")?;

    let filter = AnnualAverageFilter {
        teacher_group_id: Some(assignment_id),
        ..Default::default()
    };
    let views = list_annual_averages(&state.db, &filter).await?;
    Ok(SoftList::new(views, NO_ANNUAL_AVERAGES))
}

/// Annual averages of one assignment in one year.
#[utoipa::path(
    get,
    path = "/annual/years/{year_id}/groups/{assignment_id}",
    tag = "Annual Averages",
    operation_id = "listYearGroupAnnualAverages",
    summary = "List annual averages of an assignment in a year",
    description = "Requires `grade:view` permission.",
    params(
        ("year_id" = i32, Path, description = "Year ID"),
        ("assignment_id" = i32, Path, description = "Teacher group ID")
    ),
    responses(
        (status = 200, description = "Annual averages", body = ListResponse<AnnualAverageView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Nothing found", body = EmptyListBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(year_id = %year_id, assignment_id = %assignment_id))]
pub async fn list_year_group_annual_averages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath((year_id, assignment_id)): AppPath<(i32, i32)>,
) -> Result<SoftList<AnnualAverageView>, AppError> {
    auth_user.require_permission("grade:view")?;

    let filter = AnnualAverageFilter {
        year_id: Some(year_id),
        teacher_group_id: Some(assignment_id),
        ..Default::default()
    };
    let views = list_annual_averages(&state.db, &filter).await?;
    Ok(SoftList::new(views, NO_ANNUAL_AVERAGES))
}
