//! Client for the external text-generation endpoint.
//!
//! One outbound chat-completions call per quiz request. No timeout, retry
//! or circuit breaking: a slow upstream blocks only its own request.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemma-2-2b-it:nebius";

#[derive(Debug)]
pub enum ModelError {
  Request(reqwest::Error),
  /// The endpoint answered without any completion choice
  EmptyReply,
}

impl std::fmt::Display for ModelError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Request(err) => write!(f, "model request failed: {}", err),
      Self::EmptyReply => write!(f, "model returned no completion choices"),
    }
  }
}

impl std::error::Error for ModelError {}

#[derive(Serialize)]
struct ChatRequest<'a> {
  messages: [ChatMessage<'a>; 1],
  model: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role: &'static str,
  content: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
  choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
  message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
  content: String,
}

#[derive(Clone)]
pub struct ModelClient {
  http: reqwest::Client,
  endpoint: String,
  model: String,
  token: String,
}

impl ModelClient {
  pub fn new(token: String, endpoint: Option<String>, model: Option<String>) -> Self {
    Self {
      http: reqwest::Client::new(),
      endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
      model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
      token,
    }
  }

  /// Send a single user message and return the reply text.
  pub async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
    let request = ChatRequest {
      messages: [ChatMessage {
        role: "user",
        content: prompt,
      }],
      model: &self.model,
    };

    tracing::debug!("Requesting model {} for a question", self.model);

    let reply = self
      .http
      .post(&self.endpoint)
      .bearer_auth(&self.token)
      .json(&request)
      .send()
      .await
      .map_err(ModelError::Request)?
      .error_for_status()
      .map_err(ModelError::Request)?
      .json::<ChatReply>()
      .await
      .map_err(ModelError::Request)?;

    let content = reply
      .choices
      .into_iter()
      .next()
      .ok_or(ModelError::EmptyReply)?
      .message
      .content;
    Ok(content)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_request_body_shape() {
    let request = ChatRequest {
      messages: [ChatMessage {
        role: "user",
        content: "hello",
      }],
      model: DEFAULT_MODEL,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "hello");
    assert_eq!(json["model"], DEFAULT_MODEL);
  }

  #[test]
  fn test_reply_body_shape() {
    let reply: ChatReply = serde_json::from_str(
      r#"{"choices": [{"message": {"role": "assistant", "content": "Sentence: hi"}}]}"#,
    )
    .unwrap();
    assert_eq!(reply.choices[0].message.content, "Sentence: hi");
  }

  #[test]
  fn test_defaults_applied() {
    let client = ModelClient::new("token".to_string(), None, None);
    assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(client.model, DEFAULT_MODEL);
  }
}
