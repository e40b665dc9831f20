#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a graded exam record.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum ExamKind {
    /// Formal exam.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Exam"))]
    Exam,
    /// Practice exam.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Practice"))]
    Practice,
}

impl ExamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exam => "Exam",
            Self::Practice => "Practice",
        }
    }
}

impl fmt::Display for ExamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
