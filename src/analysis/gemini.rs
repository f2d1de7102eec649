use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

use super::TextGenerator;

pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Blocking client for the Gemini `generateContent` endpoint, asking for a
/// JSON reply with `title` and `description`.
#[derive(Clone)]
pub struct GeminiClient {
    pub base_url: String,
    pub model: String,
    api_key: String,
    http: HttpClient,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> ChartResult<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("chart-vibe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ChartError::Analysis(format!("http client build failed: {err}")))?;
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: GEMINI_MODEL.to_owned(),
            api_key: api_key.into(),
            http,
        })
    }

    /// Reads the key from `GEMINI_API_KEY`, then `API_KEY`.
    pub fn from_env() -> ChartResult<Self> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
            .ok_or_else(|| {
                ChartError::Analysis("GEMINI_API_KEY (or API_KEY) is not set".to_owned())
            })?;
        Self::new(api_key)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A creative and descriptive title for a chart with this data, under 10 words."
            },
            "description": {
                "type": "STRING",
                "description": "A one-paragraph summary or analysis of what this data could represent, as if for a business report."
            }
        },
        "required": ["title", "description"]
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
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
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> ChartResult<String> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };
        debug!(model = %self.model, prompt_len = prompt.len(), "gemini request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .map_err(|err| ChartError::Analysis(format!("request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::Analysis(format!("gemini returned HTTP {status}")));
        }
        let body: GenerateResponse = response
            .json()
            .map_err(|err| ChartError::Analysis(format!("unreadable reply: {err}")))?;

        body.candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .ok_or_else(|| ChartError::Analysis("reply carried no text".to_owned()))
    }
}
