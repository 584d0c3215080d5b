//! Credential propagation into the process environment.
//!
//! The external memory service reads API keys from canonical environment
//! variables, not from the configuration structure, so the key supplied via
//! `LLM_API_KEY` has to be exported before the client is constructed. Kept
//! separate from the pure configuration builder so the side effect is
//! isolated and testable on its own.

use crate::provider::LlmProvider;

/// Export the supplied API key under the canonical variables the memory
/// service reads.
///
/// - `openai` / `openrouter`: `OPENAI_API_KEY`, only when currently unset.
/// - `openrouter` additionally: `OPENROUTER_API_KEY`.
/// - other providers: no mutation.
///
/// Must run once at startup, before the memory client is constructed and
/// before anything else reads these variables.
pub fn export_api_keys(provider: Option<LlmProvider>, api_key: Option<&str>) {
    let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) else {
        return;
    };

    match provider {
        Some(LlmProvider::Openai | LlmProvider::Openrouter) => {
            if !is_set("OPENAI_API_KEY") {
                // SAFETY: Called once during startup, before the memory
                // client is constructed and before any task reads the
                // environment.
                unsafe {
                    std::env::set_var("OPENAI_API_KEY", key);
                }
            }
            if provider == Some(LlmProvider::Openrouter) {
                // SAFETY: Same startup-only window as above.
                unsafe {
                    std::env::set_var("OPENROUTER_API_KEY", key);
                }
            }
        }
        _ => {}
    }
}

fn is_set(var: &str) -> bool {
    std::env::var(var).is_ok_and(|v| !v.trim().is_empty())
}
