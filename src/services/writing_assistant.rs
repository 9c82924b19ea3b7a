use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::Config;
use crate::models::{EntityExtractionResult, WritingSuggestion};

const EXTRACT_ENTITIES_PROMPT: &str = r#"You are an expert at analyzing narrative text and extracting story elements.
Extract characters, locations, and events from the provided text.
For characters, identify names, potential roles (protagonist, antagonist, etc.), personality traits, and context.
For locations, identify names, types (mansion, library, etc.), descriptions, and context.
For events, identify significant plot points, actions, or story developments.
Respond with JSON in this exact format: {
  "characters": [{"name": "string", "role": "string", "traits": "string", "context": "string"}],
  "locations": [{"name": "string", "type": "string", "description": "string", "context": "string"}],
  "events": [{"title": "string", "description": "string", "context": "string"}]
}"#;

const SYNONYMS_PROMPT: &str = r#"Provide contextually appropriate synonyms for the given word within the provided context.
Consider tone, formality, and narrative style. Return 3-5 suitable alternatives.
Respond with JSON: {"synonyms": ["word1", "word2", "word3"]}"#;

const ANALYZE_PROMPT: &str = r#"Analyze the provided text for writing improvements. Look for:
1. Grammar and punctuation errors
2. Style improvements (word choice, sentence structure)
3. Plot consistency issues
4. Opportunities for better word choices

For each suggestion, provide the original text, suggested improvement, approximate position (character index), and type.
Respond with JSON: {
  "suggestions": [
    {
      "type": "grammar|style|plot|synonym",
      "originalText": "text to replace",
      "suggestion": "improved text",
      "position": 0,
      "reason": "explanation"
    }
  ]
}"#;

const WRITING_PROMPT_PROMPT: &str = r#"You are a creative writing coach. Based on the provided text, generate a helpful writing prompt or suggestion to continue the story.
Consider character development, plot advancement, sensory details, and narrative tension.
Keep suggestions concise and actionable."#;

const FORMAT_DIALOGUE_PROMPT: &str = r#"Format the provided text with proper dialogue punctuation and structure.
Ensure correct use of quotation marks, commas, and paragraph breaks for dialogue.
Maintain the original meaning and style while improving formatting."#;

#[derive(Debug)]
pub enum AssistantError {
    /// No API key configured; the endpoints degrade rather than the server
    /// failing to start.
    NotConfigured,
    Http(reqwest::Error),
    Malformed(String),
}

impl std::fmt::Display for AssistantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistantError::NotConfigured => write!(f, "Writing assistant is not configured"),
            AssistantError::Http(e) => write!(f, "Text-generation request failed: {}", e),
            AssistantError::Malformed(e) => {
                write!(f, "Text-generation response was malformed: {}", e)
            }
        }
    }
}

impl std::error::Error for AssistantError {}

impl From<reqwest::Error> for AssistantError {
    fn from(e: reqwest::Error) -> Self {
        AssistantError::Http(e)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct SynonymsPayload {
    #[serde(default)]
    synonyms: Vec<String>,
}

#[derive(Deserialize)]
struct SuggestionsPayload {
    #[serde(default)]
    suggestions: Vec<WritingSuggestion>,
}

/// Stateless wrapper around an OpenAI-compatible chat-completions endpoint.
/// All intelligence lives behind this boundary; the rest of the server only
/// sees typed request/response pairs.
#[derive(Debug)]
pub struct WritingAssistant {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    synonym_cache: Cache<String, Vec<String>>,
}

impl WritingAssistant {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
            synonym_cache: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(std::time::Duration::from_secs(60 * 60))
                .build(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn extract_entities(&self, text: &str) -> Result<EntityExtractionResult, AssistantError> {
        let content = self.complete(EXTRACT_ENTITIES_PROMPT, text, true).await?;
        serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse entity extraction result: {}", e);
            AssistantError::Malformed(e.to_string())
        })
    }

    pub async fn generate_synonyms(
        &self,
        word: &str,
        context: &str,
    ) -> Result<Vec<String>, AssistantError> {
        let cache_key = format!("{}\u{1}{}", word, context);
        if let Some(cached) = self.synonym_cache.get(&cache_key).await {
            debug!("Synonym cache hit for '{}'", word);
            return Ok(cached);
        }

        let user = format!("Word: \"{}\"\nContext: \"{}\"", word, context);
        let content = self.complete(SYNONYMS_PROMPT, &user, true).await?;
        let payload: SynonymsPayload =
            serde_json::from_str(&content).map_err(|e| AssistantError::Malformed(e.to_string()))?;

        self.synonym_cache
            .insert(cache_key, payload.synonyms.clone())
            .await;
        Ok(payload.synonyms)
    }

    pub async fn analyze_writing(&self, text: &str) -> Result<Vec<WritingSuggestion>, AssistantError> {
        let content = self.complete(ANALYZE_PROMPT, text, true).await?;
        let payload: SuggestionsPayload =
            serde_json::from_str(&content).map_err(|e| AssistantError::Malformed(e.to_string()))?;
        Ok(payload.suggestions)
    }

    pub async fn generate_writing_prompt(
        &self,
        text: &str,
        context: Option<&str>,
    ) -> Result<String, AssistantError> {
        let user = match context {
            Some(context) => format!("Current text: \"{}\"\nContext: {}", text, context),
            None => format!("Current text: \"{}\"", text),
        };
        self.complete(WRITING_PROMPT_PROMPT, &user, false).await
    }

    pub async fn format_dialogue(&self, text: &str) -> Result<String, AssistantError> {
        self.complete(FORMAT_DIALOGUE_PROMPT, text, false).await
    }

    /// One round trip to the chat-completions endpoint, returning the first
    /// choice's content.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        json_response: bool,
    ) -> Result<String, AssistantError> {
        let api_key = self.api_key.as_ref().ok_or(AssistantError::NotConfigured)?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: json_response.then_some(ResponseFormat { kind: "json_object" }),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AssistantError::Malformed("response carried no content".to_string()))
    }
}
