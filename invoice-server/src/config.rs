use std::path::PathBuf;

use config::{Config, Environment, File};
use invoice_core::{ComposerOptions, DEFAULT_COMPANY_NAME};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding `<invoice_number>.pdf` files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default = "default_true")]
    pub compress: bool,
    #[serde(default = "default_true")]
    pub header_on_every_page: bool,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_company_name() -> String {
    DEFAULT_COMPANY_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: default_host(),
            port: default_port(),
            output_dir: default_output_dir(),
            company_name: default_company_name(),
            compress: true,
            header_on_every_page: true,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Optional `configuration` file, then `APP__*` environment variables
    /// (after `.env` is loaded).
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn composer_options(&self) -> ComposerOptions {
        ComposerOptions {
            company_name: self.company_name.clone(),
            compress: self.compress,
            header_on_every_page: self.header_on_every_page,
        }
    }
}
