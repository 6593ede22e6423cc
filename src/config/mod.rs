use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Default artifact location, relative to the working directory. The offline
/// training job writes this file; production deployments must set MODEL_PATH.
pub const DEFAULT_MODEL_PATH: &str = "insurance_model.json";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Filesystem path of the persisted pipeline artifact.
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct CoverageConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
}

impl CoverageConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let cfg = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;
        let server: ServerConfig = cfg.try_deserialize()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CoverageConfig {
            server,
            model: ModelConfig {
                path: get_env("MODEL_PATH", Some(DEFAULT_MODEL_PATH), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
