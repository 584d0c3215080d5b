use strum::{Display, EnumString};

/// Dimensionality of the `text-embedding-3-small` family used by the cloud
/// and code-assistant providers.
pub const CLOUD_EMBEDDING_DIMS: u32 = 1536;

/// Dimensionality of `nomic-embed-text`, the local default under Ollama.
pub const OLLAMA_EMBEDDING_DIMS: u32 = 768;

/// The closed set of LLM providers the memory-service configuration
/// understands. Parsed from `LLM_PROVIDER` in `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum LlmProvider {
    /// First-party OpenAI API.
    Openai,
    /// OpenAI-compatible relay; chat goes through the `openai` integration
    /// with the chosen model name preserved.
    Openrouter,
    /// GitHub Copilot, routed through the generic `litellm` relay layer.
    GithubCopilot,
    /// Local inference server.
    Ollama,
}

impl LlmProvider {
    /// Lenient parse of an environment value. Unknown or empty names yield
    /// `None`; the configuration builder passes them through as unset.
    pub fn parse(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// Fallback dimensionality of the provider's default embedding model.
    pub fn embedding_dims(self) -> u32 {
        match self {
            Self::Ollama => OLLAMA_EMBEDDING_DIMS,
            _ => CLOUD_EMBEDDING_DIMS,
        }
    }

    /// Default embedding model when `EMBEDDING_MODEL_CHOICE` is unset.
    /// `None` means the provider gets no embedder section at all
    /// (openrouter relays chat only).
    pub fn default_embedding_model(self) -> Option<&'static str> {
        match self {
            Self::Openai => Some("text-embedding-3-small"),
            Self::GithubCopilot => Some("github_copilot/text-embedding-3-small"),
            Self::Ollama => Some("nomic-embed-text"),
            Self::Openrouter => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(LlmProvider::parse("openai"), Some(LlmProvider::Openai));
        assert_eq!(
            LlmProvider::parse("openrouter"),
            Some(LlmProvider::Openrouter)
        );
        assert_eq!(
            LlmProvider::parse("github_copilot"),
            Some(LlmProvider::GithubCopilot)
        );
        assert_eq!(LlmProvider::parse("ollama"), Some(LlmProvider::Ollama));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(LlmProvider::parse(" ollama "), Some(LlmProvider::Ollama));
    }

    #[test]
    fn unknown_provider_is_none() {
        assert_eq!(LlmProvider::parse("anthropic"), None);
        assert_eq!(LlmProvider::parse(""), None);
    }

    #[test]
    fn displays_as_snake_case() {
        assert_eq!(LlmProvider::GithubCopilot.to_string(), "github_copilot");
        assert_eq!(LlmProvider::Openai.to_string(), "openai");
    }

    #[test]
    fn cloud_providers_default_to_1536() {
        assert_eq!(LlmProvider::Openai.embedding_dims(), 1536);
        assert_eq!(LlmProvider::Openrouter.embedding_dims(), 1536);
        assert_eq!(LlmProvider::GithubCopilot.embedding_dims(), 1536);
    }

    #[test]
    fn ollama_defaults_to_768() {
        assert_eq!(LlmProvider::Ollama.embedding_dims(), 768);
    }

    #[test]
    fn openrouter_has_no_embedding_default() {
        assert!(LlmProvider::Openrouter.default_embedding_model().is_none());
        assert_eq!(
            LlmProvider::Ollama.default_embedding_model(),
            Some("nomic-embed-text")
        );
    }
}
