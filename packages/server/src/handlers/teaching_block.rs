use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::teaching_block;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::params::AppPath;
use crate::models::shared::ListResponse;
use crate::models::teaching_block::{
    CreateTeachingBlockRequest, TeachingBlockResponse, validate_create_teaching_block,
};
use crate::state::AppState;
use crate::utils::lookup::find_year;

/// Add a teaching block to a year.
#[utoipa::path(
    post,
    path = "/years/{year_id}/teaching-blocks",
    tag = "Teaching Blocks",
    operation_id = "createTeachingBlock",
    summary = "Create a teaching block",
    description = "The ordinal selects which annual average slot the block fills and must be unique within the year. Requires `grade:compute` permission.",
    params(
        ("year_id" = i32, Path, description = "Year ID")
    ),
    request_body = CreateTeachingBlockRequest,
    responses(
        (status = 201, description = "Teaching block created", body = TeachingBlockResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Year not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Ordinal already used in this year (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(year_id = %year_id))]
pub async fn create_teaching_block(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(year_id): AppPath<i32>,
    AppJson(payload): AppJson<CreateTeachingBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("grade:compute")?;
    validate_create_teaching_block(&payload)?;

    find_year(&state.db, year_id).await?;

    let new_block = teaching_block::ActiveModel {
        year_id: Set(year_id),
        ordinal: Set(payload.ordinal),
        name: Set(payload.name.trim().to_string()),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        ..Default::default()
    };

    let block = match new_block.insert(&state.db).await {
        Ok(model) => model,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(AppError::Conflict(format!(
                "Year already has a teaching block with ordinal {}",
                payload.ordinal
            )));
        }
        Err(e) => return Err(e.into()),
    };

    info!(teaching_block_id = block.id, ordinal = block.ordinal, "Teaching block created");
    Ok((StatusCode::CREATED, Json(TeachingBlockResponse::from(block))))
}

/// List the teaching blocks of a year.
#[utoipa::path(
    get,
    path = "/years/{year_id}/teaching-blocks",
    tag = "Teaching Blocks",
    operation_id = "listTeachingBlocks",
    summary = "List teaching blocks of a year",
    description = "Ordered by ordinal. Requires `grade:view` permission.",
    params(
        ("year_id" = i32, Path, description = "Year ID")
    ),
    responses(
        (status = 200, description = "Teaching blocks", body = ListResponse<TeachingBlockResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Year not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(year_id = %year_id))]
pub async fn list_teaching_blocks(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(year_id): AppPath<i32>,
) -> Result<Json<ListResponse<TeachingBlockResponse>>, AppError> {
    auth_user.require_permission("grade:view")?;

    find_year(&state.db, year_id).await?;

    let blocks = teaching_block::Entity::find()
        .filter(teaching_block::Column::YearId.eq(year_id))
        .order_by_asc(teaching_block::Column::Ordinal)
        .all(&state.db)
        .await?;

    Ok(Json(ListResponse {
        data: blocks.into_iter().map(TeachingBlockResponse::from).collect(),
    }))
}
