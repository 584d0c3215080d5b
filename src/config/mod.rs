use strum::Display;

use crate::error::ConfigError;
use crate::provider::{CLOUD_EMBEDDING_DIMS, LlmProvider};

#[cfg(test)]
pub(crate) mod test_env;

/// Collection both backends default to when `QDRANT_COLLECTION_NAME` is unset.
pub const DEFAULT_COLLECTION_NAME: &str = "mem0_memories";

/// Local mem0 REST server default.
pub const DEFAULT_MEM0_SERVER_URL: &str = "http://localhost:8000";

/// Which vector store the memory service should be configured with.
/// Anything other than an explicit `qdrant` selector means the managed
/// Supabase backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum VectorStoreBackend {
    #[default]
    Supabase,
    Qdrant,
}

/// Immutable snapshot of the environment-derived settings both tools share.
///
/// Loading never fails: absent or empty variables stay `None` and are passed
/// through to the external clients, which own validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub llm_provider: Option<LlmProvider>,
    /// Raw `LLM_PROVIDER` value, kept for banner output even when it does
    /// not parse to a known provider.
    pub llm_provider_raw: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_model: Option<String>,
    pub embedding_model: Option<String>,
    pub llm_base_url: Option<String>,
    pub database_url: Option<String>,
    pub vector_store: VectorStoreBackend,
    pub qdrant_url: Option<String>,
    pub qdrant_api_key: Option<String>,
    pub collection_name: String,
    /// Explicit `EMBEDDING_DIMS` override; provider fallback applies when unset.
    pub embedding_dims: Option<u32>,
    pub mem0_server_url: String,
}

impl Settings {
    /// Load `.env` (best effort) and snapshot the process environment.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => println!("✅ Loaded environment variables from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => println!("⚠️  Could not load .env file: {e}"),
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let llm_provider_raw = env_nonempty("LLM_PROVIDER");
        let vector_store = match env_nonempty("VECTOR_STORE_PROVIDER").as_deref() {
            Some("qdrant") => VectorStoreBackend::Qdrant,
            _ => VectorStoreBackend::Supabase,
        };

        Self {
            llm_provider: llm_provider_raw.as_deref().and_then(LlmProvider::parse),
            llm_provider_raw,
            llm_api_key: env_nonempty("LLM_API_KEY"),
            llm_model: env_nonempty("LLM_CHOICE"),
            embedding_model: env_nonempty("EMBEDDING_MODEL_CHOICE"),
            llm_base_url: env_nonempty("LLM_BASE_URL"),
            database_url: env_nonempty("DATABASE_URL"),
            vector_store,
            qdrant_url: env_nonempty("QDRANT_URL"),
            qdrant_api_key: env_nonempty("QDRANT_API_KEY"),
            collection_name: env_nonempty("QDRANT_COLLECTION_NAME")
                .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string()),
            embedding_dims: env_nonempty("EMBEDDING_DIMS").and_then(parse_embedding_dims),
            mem0_server_url: env_nonempty("MEM0_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_MEM0_SERVER_URL.to_string()),
        }
    }

    /// Embedding dimensionality for the vector collection: the explicit
    /// override wins, then the provider fallback, then the cloud default.
    pub fn resolved_embedding_dims(&self) -> u32 {
        self.embedding_dims.unwrap_or_else(|| {
            self.llm_provider
                .map_or(CLOUD_EMBEDDING_DIMS, LlmProvider::embedding_dims)
        })
    }

    /// Qdrant connection parameters, required by the vector-database tool.
    pub fn require_qdrant(&self) -> crate::Result<(String, String)> {
        let url = self
            .qdrant_url
            .clone()
            .ok_or(crate::error::ConfigError::Missing { var: "QDRANT_URL" })?;
        let api_key = self
            .qdrant_api_key
            .clone()
            .ok_or(crate::error::ConfigError::Missing {
                var: "QDRANT_API_KEY",
            })?;
        Ok((url, api_key))
    }
}

/// An unparseable override is reported and dropped; the provider fallback
/// still applies.
fn parse_embedding_dims(value: String) -> Option<u32> {
    match value.parse() {
        Ok(dims) => Some(dims),
        Err(e) => {
            println!(
                "⚠️  {}",
                ConfigError::Invalid {
                    var: "EMBEDDING_DIMS",
                    message: e.to_string(),
                }
            );
            None
        }
    }
}

/// Read an environment variable, treating empty/whitespace values as unset.
fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
