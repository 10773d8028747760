use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Gemini API Key missing! Please add GOOGLE_API_KEY to the .env file.")]
    MissingApiKey,

    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    pub output_dir: PathBuf,
    pub download_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(AppConfig {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            output_dir: PathBuf::from("."),
            download_dir: None,
        })
    }

    /// Where "Download as PDF" copies files: `WORKOUT_DOWNLOAD_DIR`, else the
    /// user's Downloads folder, else the PDF output directory.
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| self.output_dir.clone())
    }

    /// Reads `.env` (if present) and then the process environment.
    ///
    /// Required:
    /// - `GOOGLE_API_KEY`
    ///
    /// Optional:
    /// - `GEMINI_MODEL`, `GEMINI_BASE_URL`, `GEMINI_TIMEOUT_SECS`, `WORKOUT_PDF_DIR`,
    ///   `WORKOUT_DOWNLOAD_DIR`
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment variables from {}", path.display()),
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to load .env file: {}", e),
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup("GOOGLE_API_KEY").unwrap_or_default())?;
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(model) = non_empty("GEMINI_MODEL") {
            config.model = model;
        }

        if let Some(base_url) = non_empty("GEMINI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = non_empty("GEMINI_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = Some(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: "GEMINI_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            }
        }

        if let Some(dir) = non_empty("WORKOUT_PDF_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Some(dir) = non_empty("WORKOUT_DOWNLOAD_DIR") {
            config.download_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("output_dir", &self.output_dir)
            .field("download_dir", &self.download_dir)
            .finish()
    }
}
