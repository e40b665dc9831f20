use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// Highest rating or score on the grading scale.
pub const MAX_SCORE: f64 = 20.0;

/// Require an identifier to be present and positive.
pub fn require_id(value: Option<i32>, name: &str) -> Result<i32, AppError> {
    match value {
        None => Err(AppError::Validation(format!("{name} is required"))),
        Some(id) if id <= 0 => Err(AppError::Validation(format!(
            "{name} must be a positive integer"
        ))),
        Some(id) => Ok(id),
    }
}

/// Validate a rating or score against the 0-20 scale.
pub fn validate_score(value: f64, name: &str) -> Result<(), AppError> {
    if !value.is_finite() || !(0.0..=MAX_SCORE).contains(&value) {
        return Err(AppError::Validation(format!(
            "{name} must be between 0 and {MAX_SCORE}"
        )));
    }
    Ok(())
}

/// Successful list response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// Body returned with 404 when a list query matched nothing.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EmptyListBody {
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
    #[schema(example = "No block averages found")]
    pub message: String,
    /// Always empty.
    #[schema(example = json!([]))]
    pub data: Vec<serde_json::Value>,
}

/// List result that reports an empty match as 404 with `data: []` instead of an error.
pub struct SoftList<T> {
    data: Vec<T>,
    empty_message: &'static str,
}

impl<T> SoftList<T> {
    pub fn new(data: Vec<T>, empty_message: &'static str) -> Self {
        Self {
            data,
            empty_message,
        }
    }
}

impl<T: Serialize> IntoResponse for SoftList<T> {
    fn into_response(self) -> Response {
        if self.data.is_empty() {
            let body = EmptyListBody {
                code: "NOT_FOUND",
                message: self.empty_message.into(),
                data: Vec::new(),
            };
            return (StatusCode::NOT_FOUND, Json(body)).into_response();
        }
        Json(ListResponse { data: self.data }).into_response()
    }
}
