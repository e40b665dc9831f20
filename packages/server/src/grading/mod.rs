//! Grade aggregation pipeline.
//!
//! Stage one turns raw signals (daily qualifications, practice and exam scores)
//! into a persisted block average per (student, teacher group, teaching block).
//! Stage two rolls the stored block averages of a year into an annual course
//! average per (student, teacher group, year). The query module reads both
//! back with descriptive attributes joined in.

pub mod query;
pub mod service;

pub use query::{AnnualAverageFilter, BlockAverageFilter};
pub use service::GradingService;

use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GradingError {
    /// Required identifiers missing or malformed, or no usable data to aggregate.
    #[error("{0}")]
    Validation(String),
    /// A referenced row is missing, or the aggregate input set is empty.
    #[error("{0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(#[from] DbErr),
}

/// Identifies one block average row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockKey {
    pub student_id: i32,
    pub teacher_group_id: i32,
    pub teaching_block_id: i32,
}

/// Identifies one annual average row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearKey {
    pub student_id: i32,
    pub teacher_group_id: i32,
    pub year_id: i32,
}
