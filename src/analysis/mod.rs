mod types;

pub use types::{
    AnalysisErrorBody, AnalysisMetadata, AnalysisRequest, AnalysisResponse, Hints, LanguageLists,
    LanguageTexts, ModelName, PromptLanguage, PromptTemplatesResponse,
};

use crate::config::Config;
use crate::error::AnalysisError;
use serde::de::DeserializeOwned;

const ANALYZE_ENDPOINT: &str = "/analyze-furniture";
const PROMPT_TEMPLATES_ENDPOINT: &str = "/prompt-templates";

/// Client for the furniture analysis API.
#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalysisError> {
        log::info!(
            "Requesting analysis of {} image(s)",
            request.image_urls.len()
        );

        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| AnalysisError::Connect {
                base_url: self.base_url.clone(),
                source,
            })?;

        self.handle_response(response).await
    }

    pub async fn prompt_templates(&self) -> Result<PromptTemplatesResponse, AnalysisError> {
        let url = format!("{}{}", self.base_url, PROMPT_TEMPLATES_ENDPOINT);
        log::info!("Fetching prompt templates from {}", url);

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|source| AnalysisError::Connect {
                    base_url: self.base_url.clone(),
                    source,
                })?;

        self.handle_response(response).await
    }

    /// Non-2xx answers carry a structured error body when the API itself
    /// rejected the request; anything else is reported by status code.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AnalysisError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<AnalysisErrorBody>(&body) {
                return Err(AnalysisError::Api {
                    error: err.error,
                    message: err.message,
                    status: err.status,
                });
            }
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|source| AnalysisError::Connect {
                base_url: self.base_url.clone(),
                source,
            })?;
        serde_json::from_str(&body).map_err(AnalysisError::Decode)
    }
}
