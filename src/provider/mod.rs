//! Provider module — pluggable AI service adapters.
//!
//! A provider knows two things about its service: what a valid API key
//! looks like, and how to send content with that key and get text back.
//! It knows nothing about where the key is stored; the caller retrieves
//! the key from `SecureStorage` and hands it over per call.
//!
//! This module provides:
//! - The `Provider` trait and its value types (here)
//! - `ProviderRegistry`, lazy id → provider lookup (`registry`)
//! - The Google Gemini adapter (`gemini`)
//! - The HTTP seam providers send through (`transport`)

pub mod gemini;
pub mod registry;
pub mod transport;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{ByoaiError, Result};

pub use gemini::GeminiProvider;
pub use registry::ProviderRegistry;
pub use transport::{HttpRequest, HttpResponse, Transport};

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// Outcome of a key format check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ApiKeyValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }

    /// `Err(InvalidApiKey)` carrying the message when invalid.
    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ByoaiError::InvalidApiKey(
                self.error.unwrap_or_else(|| "API key rejected".into()),
            ))
        }
    }
}

/// Static description of a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Human-readable hint, e.g. "AIza... (39 characters)".
    pub key_format: &'static str,
    pub api_url: &'static str,
    /// Where users obtain a key.
    pub api_key_url: Option<&'static str>,
}

/// One piece of request content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text {
        text: String,
    },
    Image {
        /// Base64, optionally as a `data:` URL.
        data: String,
        #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
    Audio {
        data: String,
        #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An image part from raw file bytes.
    pub fn image_from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::Image {
            data: BASE64.encode(bytes),
            mime_type: Some(mime_type.into()),
        }
    }

    /// An audio part from raw file bytes.
    pub fn audio_from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::Audio {
            data: BASE64.encode(bytes),
            mime_type: Some(mime_type.into()),
        }
    }
}

type Parser<T> = Box<dyn FnOnce(&str) -> Result<T> + Send>;

/// What to send and how to turn the raw response text into `T`.
///
/// All domain knowledge (prompts, response shape) lives here, supplied by
/// the caller.
pub struct CallOptions<T> {
    pub content: Vec<ContentPart>,
    parse_response: Parser<T>,
}

impl<T> CallOptions<T> {
    /// Arbitrary content with a parser.
    pub fn multi_modal<F>(content: Vec<ContentPart>, parse_response: F) -> Self
    where
        F: FnOnce(&str) -> Result<T> + Send + 'static,
    {
        Self {
            content,
            parse_response: Box::new(parse_response),
        }
    }

    /// A single text prompt.
    pub fn text<F>(prompt: impl Into<String>, parse_response: F) -> Self
    where
        F: FnOnce(&str) -> Result<T> + Send + 'static,
    {
        Self::multi_modal(vec![ContentPart::text(prompt)], parse_response)
    }

    /// A text prompt followed by one image (`image/jpeg` unless given).
    pub fn image_analysis<F>(
        image_data: impl Into<String>,
        prompt: impl Into<String>,
        parse_response: F,
        mime_type: Option<&str>,
    ) -> Self
    where
        F: FnOnce(&str) -> Result<T> + Send + 'static,
    {
        Self::multi_modal(
            vec![
                ContentPart::text(prompt),
                ContentPart::Image {
                    data: image_data.into(),
                    mime_type: Some(mime_type.unwrap_or("image/jpeg").to_string()),
                },
            ],
            parse_response,
        )
    }

    /// Run the caller's parser over raw response text.
    pub fn parse(self, raw_text: &str) -> Result<T> {
        (self.parse_response)(raw_text)
    }
}

impl CallOptions<String> {
    /// A text prompt whose response is returned unchanged.
    pub fn raw_text(prompt: impl Into<String>) -> Self {
        Self::text(prompt, |raw| Ok(raw.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// An external AI service adapter.
pub trait Provider: Send + Sync {
    fn info(&self) -> &ProviderInfo;

    /// Check the key's format. No network access.
    fn validate_api_key(&self, api_key: &str) -> ApiKeyValidation;

    /// Send `content` authenticated with `api_key`; return the response text.
    fn complete(&self, api_key: &str, content: &[ContentPart]) -> Result<String>;
}

impl<'a> dyn Provider + 'a {
    /// Authenticated call with a caller-supplied parser.
    pub fn call<T>(&self, api_key: &str, options: CallOptions<T>) -> Result<T> {
        tracing::debug!(
            provider = self.info().id,
            parts = options.content.len(),
            "provider call"
        );
        let raw = self.complete(api_key, &options.content)?;
        options.parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_part_json_shape() {
        let parts = vec![
            ContentPart::text("hi"),
            ContentPart::Image {
                data: "abc".into(),
                mime_type: Some("image/png".into()),
            },
            ContentPart::Audio {
                data: "xyz".into(),
                mime_type: None,
            },
        ];
        let json = serde_json::to_string(&parts).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"text","text":"hi"},{"type":"image","data":"abc","mimeType":"image/png"},{"type":"audio","data":"xyz"}]"#
        );
    }

    #[test]
    fn image_from_bytes_is_base64() {
        let part = ContentPart::image_from_bytes(b"\x89PNG", "image/png");
        assert_eq!(
            part,
            ContentPart::Image {
                data: "iVBORw==".into(),
                mime_type: Some("image/png".into()),
            }
        );
    }

    #[test]
    fn image_analysis_defaults_to_jpeg() {
        let opts = CallOptions::image_analysis("data", "describe", |s| Ok(s.len()), None);
        assert_eq!(opts.content.len(), 2);
        assert_eq!(opts.content[0], ContentPart::text("describe"));
        assert!(matches!(
            &opts.content[1],
            ContentPart::Image { mime_type: Some(m), .. } if m == "image/jpeg"
        ));
        assert_eq!(opts.parse("four").unwrap(), 4);
    }

    #[test]
    fn validation_into_result() {
        assert!(ApiKeyValidation::valid().into_result().is_ok());
        let err = ApiKeyValidation::invalid("too short")
            .into_result()
            .unwrap_err();
        assert!(err.to_string().contains("too short"));
    }
}
