use std::env;
use thiserror::Error;

pub const DEFAULT_IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IMGBB_API_KEY is not set")]
    MissingImgbbApiKey,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub imgbb_api_key: String,
    pub imgbb_upload_url: String,
    pub api_base_url: String,
}

impl Config {
    pub fn new(
        imgbb_api_key: impl Into<String>,
        imgbb_upload_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            imgbb_api_key: imgbb_api_key.into(),
            imgbb_upload_url: imgbb_upload_url.into(),
            api_base_url: api_base_url.into(),
        }
    }

    /// Reads `IMGBB_API_KEY` (required), `IMGBB_UPLOAD_URL` and
    /// `API_BASE_URL` (both optional) from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let imgbb_api_key =
            env::var("IMGBB_API_KEY").map_err(|_| ConfigError::MissingImgbbApiKey)?;
        let imgbb_upload_url =
            env::var("IMGBB_UPLOAD_URL").unwrap_or_else(|_| DEFAULT_IMGBB_UPLOAD_URL.to_string());
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            imgbb_api_key,
            imgbb_upload_url,
            api_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-wide environment is only touched once.
    #[test]
    fn from_env_requires_key_and_defaults_urls() {
        env::remove_var("IMGBB_API_KEY");
        env::remove_var("IMGBB_UPLOAD_URL");
        env::remove_var("API_BASE_URL");
        assert!(Config::from_env().is_err());

        env::set_var("IMGBB_API_KEY", "test-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.imgbb_api_key, "test-key");
        assert_eq!(config.imgbb_upload_url, DEFAULT_IMGBB_UPLOAD_URL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        env::set_var("IMGBB_UPLOAD_URL", "http://localhost:9000/1/upload");
        env::set_var("API_BASE_URL", "http://localhost:9001");
        let config = Config::from_env().unwrap();
        assert_eq!(config.imgbb_upload_url, "http://localhost:9000/1/upload");
        assert_eq!(config.api_base_url, "http://localhost:9001");
    }
}
