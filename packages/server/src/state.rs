use std::sync::Arc;

use common::GradeWeights;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::utils::revocation::RevokedTokens;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    /// Component weights, validated at config load.
    pub weights: GradeWeights,
    pub revoked: Arc<RevokedTokens>,
}
