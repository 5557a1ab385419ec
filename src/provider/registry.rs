//! Provider lookup by id.

use super::gemini::GeminiProvider;
use super::{Provider, ProviderInfo};

type Factory = Box<dyn Fn() -> Box<dyn Provider> + Send + Sync>;

/// Maps provider ids to factories, in registration order.
///
/// Providers are built on demand; each `get` returns a fresh instance.
pub struct ProviderRegistry {
    entries: Vec<(String, Factory)>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A registry with the providers this crate ships (`gemini`).
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("gemini", || Box::new(GeminiProvider::default()));
        registry
    }

    /// Add or replace the factory for `id`.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Provider> + Send + Sync + 'static,
    {
        let id = id.into();
        let factory: Factory = Box::new(factory);
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((id, factory)),
        }
    }

    /// A new instance of the provider registered as `id`.
    pub fn get(&self, id: &str) -> Option<Box<dyn Provider>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, factory)| factory())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == id)
    }

    /// Registered ids, in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Metadata of every registered provider.
    pub fn all(&self) -> Vec<ProviderInfo> {
        self.entries
            .iter()
            .map(|(_, factory)| factory().info().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::provider::{ApiKeyValidation, ContentPart};

    struct Echo;

    const ECHO_INFO: ProviderInfo = ProviderInfo {
        id: "echo",
        name: "Echo",
        description: "Returns the first text part",
        key_format: "anything",
        api_url: "local://echo",
        api_key_url: None,
    };

    impl Provider for Echo {
        fn info(&self) -> &ProviderInfo {
            &ECHO_INFO
        }

        fn validate_api_key(&self, _api_key: &str) -> ApiKeyValidation {
            ApiKeyValidation::valid()
        }

        fn complete(&self, _api_key: &str, content: &[ContentPart]) -> Result<String> {
            match content.first() {
                Some(ContentPart::Text { text }) => Ok(text.clone()),
                _ => Ok(String::new()),
            }
        }
    }

    #[test]
    fn builtin_has_gemini() {
        let registry = ProviderRegistry::with_builtin();
        assert_eq!(registry.ids(), vec!["gemini"]);
        let gemini = registry.get("gemini").unwrap();
        assert_eq!(gemini.info().name, "Google Gemini");
    }

    #[test]
    fn unknown_id_is_none() {
        let registry = ProviderRegistry::with_builtin();
        assert!(registry.get("openai").is_none());
        assert!(!registry.contains("openai"));
    }

    #[test]
    fn register_keeps_order_and_replaces() {
        let mut registry = ProviderRegistry::with_builtin();
        registry.register("echo", || Box::new(Echo));
        registry.register("gemini", || Box::new(Echo));
        assert_eq!(registry.ids(), vec!["gemini", "echo"]);
        assert_eq!(registry.get("gemini").unwrap().info().id, "echo");
    }

    #[test]
    fn all_lists_metadata() {
        let mut registry = ProviderRegistry::new();
        registry.register("echo", || Box::new(Echo));
        let infos = registry.all();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].api_key_url, None);
    }

    #[test]
    fn call_runs_parser_over_response() {
        let mut registry = ProviderRegistry::new();
        registry.register("echo", || Box::new(Echo));
        let provider = registry.get("echo").unwrap();
        let words = provider
            .call(
                "key",
                crate::provider::CallOptions::text("one two three", |raw| {
                    Ok(raw.split_whitespace().count())
                }),
            )
            .unwrap();
        assert_eq!(words, 3);
    }
}
