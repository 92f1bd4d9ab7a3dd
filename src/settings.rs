use crate::error::{ProcessingError, Result};
use crate::storage::StorageTarget;
use crate::utils::constants::{
    DEFAULT_CLIMATE_BASE_URL, DEFAULT_INVENTORY_HEADER_LINES, DEFAULT_STATION_INVENTORY,
    ENVIRONMENT_FILE,
};
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

/// Runtime settings read from the process environment.
///
/// Keys are the lower-cased environment variable names, so `S3_BUCKET_NAME`
/// fills `s3_bucket_name`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    pub s3_bucket_name: Option<String>,

    pub aws_region: Option<String>,

    /// Write the dataset to this directory instead of S3
    pub weather_storage_root: Option<PathBuf>,

    #[validate(length(min = 1))]
    pub climate_base_url: String,

    pub station_inventory: PathBuf,

    #[validate(range(max = 50))]
    pub inventory_header_lines: usize,
}

impl Settings {
    /// Load the environment file (explicit path, or `.environment` found from
    /// the working directory upward) and read settings from the environment
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    ProcessingError::Config(format!(
                        "Failed to load environment file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                debug!(path = %path.display(), "Loaded environment file");
            }
            None => {
                if let Ok(path) = dotenvy::from_filename(ENVIRONMENT_FILE) {
                    debug!(path = %path.display(), "Loaded environment file");
                }
            }
        }

        let config = Self::defaults()?
            .add_source(Environment::default())
            .build()?;
        Self::from_config(config)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("climate_base_url", DEFAULT_CLIMATE_BASE_URL)?
            .set_default("station_inventory", DEFAULT_STATION_INVENTORY)?
            .set_default(
                "inventory_header_lines",
                DEFAULT_INVENTORY_HEADER_LINES as i64,
            )?)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn storage_target(&self) -> Result<StorageTarget> {
        if let Some(root) = self
            .weather_storage_root
            .as_ref()
            .filter(|root| !root.as_os_str().is_empty())
        {
            return Ok(StorageTarget::Local(root.clone()));
        }

        match non_empty(&self.s3_bucket_name) {
            Some(bucket) => Ok(StorageTarget::S3 {
                bucket: bucket.to_string(),
                region: non_empty(&self.aws_region).map(str::to_string),
            }),
            None => Err(ProcessingError::Config(
                "S3_BUCKET_NAME is not set (or set WEATHER_STORAGE_ROOT to write locally)"
                    .to_string(),
            )),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
