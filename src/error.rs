use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `mem0-admin`.
///
/// Each external surface defines its own error variant. The CLI handlers
/// catch these at the action boundary and report them as text; internal glue
/// continues to use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum AdminError {
    // ── Config / environment ─────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Memory service ──────────────────────────────────────────────────
    #[error("memory: {0}")]
    Memory(#[from] MemoryError),

    // ── Vector database ─────────────────────────────────────────────────
    #[error("qdrant: {0}")]
    Qdrant(#[from] QdrantError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be set in the environment or .env file")]
    Missing { var: &'static str },

    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

// ─── Memory service errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configure rejected by memory service (status {status}): {body}")]
    Configure { status: u16, body: String },

    #[error("{endpoint} failed with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
}

// ─── Vector database errors ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum QdrantError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} failed with status {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_missing_displays_var_name() {
        let err = AdminError::Config(ConfigError::Missing { var: "QDRANT_URL" });
        assert!(err.to_string().contains("QDRANT_URL"));
    }

    #[test]
    fn config_invalid_displays_var_and_message() {
        let err = ConfigError::Invalid {
            var: "EMBEDDING_DIMS",
            message: "invalid digit found in string".into(),
        };
        assert!(err.to_string().contains("EMBEDDING_DIMS"));
        assert!(err.to_string().contains("invalid digit"));
    }

    #[test]
    fn memory_status_displays_endpoint_and_code() {
        let err = AdminError::Memory(MemoryError::Status {
            endpoint: "/memories".into(),
            status: 503,
            body: "unavailable".into(),
        });
        assert!(err.to_string().contains("/memories"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn qdrant_api_displays_body() {
        let err = AdminError::Qdrant(QdrantError::Api {
            endpoint: "/collections/mem0_memories".into(),
            status: 404,
            body: "Not found: Collection `mem0_memories` doesn't exist!".into(),
        });
        assert!(err.to_string().contains("doesn't exist"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let admin_err: AdminError = anyhow_err.into();
        assert!(admin_err.to_string().contains("something went wrong"));
    }
}
