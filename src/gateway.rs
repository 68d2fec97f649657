use std::env;
use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use reqwest;
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::conversation::{ChatMessage, Citation, Role};
use crate::fleet;

macro_rules! debug_println {
    ($($arg:tt)*) => {
        if std::env::var("CONCIERGE_DEBUG").is_ok() {
            eprintln!($($arg)*);
        }
    };
}

/// A generated reply plus whatever web sources grounded it.
#[derive(Debug, Clone)]
pub struct Advice {
    pub text: String,
    pub sources: Vec<Citation>,
}

/// Boundary toward the hosted generative-text endpoint. The controller only
/// ever sees this trait, so tests substitute doubles for the live client.
pub trait AdviceGateway: Send + Sync {
    fn advise<'a>(
        &'a self,
        history: &'a [ChatMessage],
        input: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Advice>> + Send + 'a>>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: SearchTool,
}

#[derive(Debug, Serialize)]
struct SearchTool {}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    title: String,
    #[serde(default)]
    uri: String,
}

pub struct GatewayClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    web_search: bool,
    client: reqwest::Client,
}

impl GatewayClient {
    /// Builds the live client. The credential comes from the environment at
    /// startup and only matters when the base URL bypasses the relay.
    pub fn from_config(config: &GatewayConfig) -> Self {
        GatewayClient {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: env::var("LUXEDRIVE_API_KEY").ok(),
            web_search: config.web_search,
            client: reqwest::Client::new(),
        }
    }

    async fn request_advice(&self, history: &[ChatMessage], input: &str) -> Result<Advice> {
        let request = build_request(history, input, self.web_search);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug_println!(
            "concierge: POST {} ({} prior turns)",
            url,
            history.len()
        );

        let mut call = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            call = call.header("x-goog-api-key", key);
        }

        let response = call.send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "advice gateway error: {}",
                response.status()
            ));
        }

        let reply: GenerateResponse = response.json().await?;
        advice_from_response(reply)
    }
}

impl AdviceGateway for GatewayClient {
    fn advise<'a>(
        &'a self,
        history: &'a [ChatMessage],
        input: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Advice>> + Send + 'a>> {
        Box::pin(self.request_advice(history, input))
    }
}

fn build_request(history: &[ChatMessage], input: &str, web_search: bool) -> GenerateRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|message| Content {
            role: Some(wire_role(message.role).to_string()),
            parts: vec![Part {
                text: message.text.clone(),
            }],
        })
        .collect();
    contents.push(Content {
        role: Some("user".to_string()),
        parts: vec![Part {
            text: input.to_string(),
        }],
    });

    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: fleet::system_instruction().to_string(),
            }],
        },
        contents,
        tools: web_search.then(|| {
            vec![Tool {
                google_search: SearchTool {},
            }]
        }),
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn advice_from_response(reply: GenerateResponse) -> Result<Advice> {
    let candidate = reply
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("advice gateway returned no candidates"))?;

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(anyhow::anyhow!("advice gateway returned an empty reply"));
    }

    let sources = candidate
        .grounding_metadata
        .map(|metadata| metadata.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .map(|web| Citation {
            title: web.title,
            uri: web.uri,
        })
        .filter(|citation| citation.is_complete())
        .collect();

    Ok(Advice { text, sources })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_history_and_search_tool() {
        let history = vec![
            ChatMessage::model("Welcome.", Vec::new()),
            ChatMessage::user("Hi"),
        ];
        let request = build_request(&history, "Which model suits me?", true);

        let value = serde_json::to_value(&request).unwrap();
        assert!(value["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("LuxeDrive Concierge"));
        assert_eq!(value["contents"][0]["role"], "model");
        assert_eq!(value["contents"][1]["role"], "user");
        assert_eq!(value["contents"][2]["role"], "user");
        assert_eq!(
            value["contents"][2]["parts"][0]["text"],
            "Which model suits me?"
        );
        assert!(value["tools"][0].get("google_search").is_some());
    }

    #[test]
    fn test_request_omits_tools_when_search_disabled() {
        let request = build_request(&[], "range?", false);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_response_text_and_sources_are_extracted() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "The Model Alpha "}, {"text": "fits best."}]
                },
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"title": "A", "uri": "u1"}},
                        {"web": {"title": "", "uri": "u2"}},
                        {"web": {"title": "B", "uri": ""}},
                        {"web": null}
                    ]
                }
            }]
        }"#;
        let reply: GenerateResponse = serde_json::from_str(raw).unwrap();
        let advice = advice_from_response(reply).unwrap();

        assert_eq!(advice.text, "The Model Alpha fits best.");
        assert_eq!(
            advice.sources,
            vec![Citation {
                title: "A".to_string(),
                uri: "u1".to_string(),
            }]
        );
    }

    #[test]
    fn test_ungrounded_response_has_no_sources() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Certainly."}]}
            }]
        }"#;
        let reply: GenerateResponse = serde_json::from_str(raw).unwrap();
        let advice = advice_from_response(reply).unwrap();
        assert_eq!(advice.text, "Certainly.");
        assert!(advice.sources.is_empty());
    }

    #[test]
    fn test_empty_reply_is_an_error() {
        let reply: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(advice_from_response(reply).is_err());

        let blank: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "  "}]}}]}"#,
        )
        .unwrap();
        assert!(advice_from_response(blank).is_err());
    }
}
