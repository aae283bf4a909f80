//! Gemini `generateContent` client constrained to the [`CvRecord`] schema.
//!
//! The model is asked for `application/json` output matching a response
//! schema; the returned text is then decoded into a [`CvRecord`]. There is no
//! retry: any failure is returned to the caller as is.

use crate::domain::model::CvRecord;
use crate::domain::ports::{ConfigProvider, Structurer};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Checked in this order when no key is configured.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: ServiceErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorDetail {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Response schema for [`CvRecord`], in the OpenAPI subset the service accepts.
pub fn cv_record_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "email": { "type": "STRING" },
            "phone": { "type": "STRING" },
            "summary": {
                "type": "STRING",
                "nullable": true,
                "description": "Short self-presentation phrase"
            },
            "skills": { "type": "ARRAY", "items": { "type": "STRING" } },
            "experiences": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["name", "email", "phone"],
        "propertyOrdering": crate::domain::model::CSV_COLUMNS
    })
}

/// Decodes the model's JSON text into a validated record.
pub fn parse_cv_record(text: &str) -> Result<CvRecord> {
    Ok(serde_json::from_str(text)?)
}

/// Falls back to the standard environment variables when no key is given.
pub fn resolve_api_key(explicit: Option<&str>) -> Option<String> {
    explicit
        .filter(|key| !key.trim().is_empty())
        .map(str::to_string)
        .or_else(|| {
            API_KEY_ENV_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        })
}

pub struct GeminiStructurer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiStructurer {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_endpoint(),
            config.model(),
            resolve_api_key(config.api_key()),
            config.timeout_seconds(),
        )
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl Structurer for GeminiStructurer {
    async fn structure(&self, raw_text: &str) -> Result<CvRecord> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EtlError::MissingConfigError {
                field: API_KEY_ENV_VARS.join(" or "),
            })?;

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: raw_text }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: cv_record_schema(),
            },
        };

        tracing::debug!(
            "Calling model {} with {} chars of text",
            self.model,
            raw_text.chars().count()
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Model response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ServiceErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(EtlError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &generated.usage_metadata {
            tracing::debug!(
                "Token usage: prompt={:?}, candidates={:?}",
                usage.prompt_token_count,
                usage.candidates_token_count
            );
        }

        let text = generated.text().ok_or_else(|| {
            if let Some(reason) = generated
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
            {
                tracing::warn!("Model returned no text (finish reason: {})", reason);
            }
            EtlError::EmptyResponse
        })?;

        parse_cv_record(&text)
    }
}
