use common::GradeWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Bounds both connect and acquire; every store call inherits it.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    20
}
fn default_connect_timeout_secs() -> u64 {
    8
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// How often expired entries are swept from the revocation set.
    #[serde(default = "default_revocation_sweep_secs")]
    pub revocation_sweep_secs: u64,
}

fn default_token_ttl_hours() -> i64 {
    24 * 7
}
fn default_revocation_sweep_secs() -> u64 {
    300
}

/// Weights of the three block-average components. Must sum to 1.0.
#[derive(Debug, Deserialize, Clone)]
pub struct GradingConfig {
    pub daily_weight: f64,
    pub practice_weight: f64,
    pub exam_weight: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        let weights = GradeWeights::default();
        Self {
            daily_weight: weights.daily,
            practice_weight: weights.practice,
            exam_weight: weights.exam,
        }
    }
}

impl GradingConfig {
    pub fn weights(&self) -> Result<GradeWeights, ConfigError> {
        GradeWeights::new(self.daily_weight, self.practice_weight, self.exam_weight)
            .map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub grading: GradingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., GRADEBOOK__AUTH__JWT_SECRET)
            .add_source(
                Environment::with_prefix("GRADEBOOK")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.grading.weights()?;
        Ok(config)
    }
}
