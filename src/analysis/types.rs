use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PromptLanguage {
    German,
    English,
}

impl fmt::Display for PromptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptLanguage::German => write!(f, "German"),
            PromptLanguage::English => write!(f, "English"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ModelName {
    #[serde(rename = "gpt-4.1")]
    #[value(name = "gpt-4.1")]
    Gpt41,
    #[serde(rename = "gemini-2.5-pro")]
    #[value(name = "gemini-2.5-pro")]
    Gemini25Pro,
}

/// User-supplied keyword lists that bias the analysis output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hints {
    pub description_keywords: Vec<String>,
    pub designer: Vec<String>,
    pub manufacturer: Vec<String>,
    pub name_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub image_urls: Vec<String>,
    pub hints: Hints,
    pub prompt: String,
    pub def_prompt_lang: PromptLanguage,
    pub model_name: ModelName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisMetadata {
    pub custom_prompt_used: bool,
    pub hints_provided: bool,
    pub prompt_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "_metadata")]
    pub metadata: AnalysisMetadata,
    pub condition: String,
    pub description: String,
    pub designer: String,
    pub hints_used: Hints,
    pub manufacturer: String,
    pub name: String,
    pub price_range_chf: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisErrorBody {
    pub error: String,
    pub message: String,
    #[serde(default)]
    pub status: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageLists {
    pub english: Vec<String>,
    pub german: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageTexts {
    pub english: String,
    pub german: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptTemplatesResponse {
    pub custom_prompt_examples: LanguageLists,
    pub default_templates: LanguageTexts,
    pub supported_languages: LanguageLists,
    pub usage_notes: Vec<String>,
}
