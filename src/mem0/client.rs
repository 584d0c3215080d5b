use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use super::config::Mem0Config;
use crate::error::MemoryError;
use crate::http::build_admin_client;

/// Filter for list/delete-all operations. At most one of the three ids is
/// set; an empty filter means "no scoping" and the callers substitute the
/// default user sentinel where required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFilter {
    pub user_id: Option<String>,
    pub agent_id: Option<String>,
    pub run_id: Option<String>,
}

impl MemoryFilter {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            user_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn agent(id: impl Into<String>) -> Self {
        Self {
            agent_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn run(id: impl Into<String>) -> Self {
        Self {
            run_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.agent_id.is_none() && self.run_id.is_none()
    }

    fn query(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(id) = &self.user_id {
            pairs.push(("user_id", id.as_str()));
        }
        if let Some(id) = &self.agent_id {
            pairs.push(("agent_id", id.as_str()));
        }
        if let Some(id) = &self.run_id {
            pairs.push(("run_id", id.as_str()));
        }
        pairs
    }
}

/// A stored memory record. Externally owned and opaque: this tool only ever
/// reads it or asks for its deletion by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The service has shipped both a wrapped and a bare list shape; accept
/// either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Wrapped { results: Vec<MemoryRecord> },
    Bare(Vec<MemoryRecord>),
}

impl ListResponse {
    fn into_records(self) -> Vec<MemoryRecord> {
        match self {
            Self::Wrapped { results } => results,
            Self::Bare(records) => records,
        }
    }
}

/// Seam over the memory service so the administrative operations can be
/// exercised against a mock store.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    async fn get_all(&self, filter: &MemoryFilter) -> Result<Vec<MemoryRecord>, MemoryError>;
    async fn delete(&self, memory_id: &str) -> Result<(), MemoryError>;
    async fn delete_all(&self, filter: &MemoryFilter) -> Result<(), MemoryError>;
}

/// REST client for a mem0-compatible memory server.
#[derive(Debug)]
pub struct Mem0Client {
    base_url: String,
    client: Client,
}

impl Mem0Client {
    /// Construct the client and push the built configuration to the server.
    ///
    /// Construction is the only place the configuration is consumed; a
    /// rejected configure call surfaces as an error here, never later.
    pub async fn connect(base_url: &str, config: &Mem0Config) -> Result<Self, MemoryError> {
        let client = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_admin_client(),
        };
        client.configure(config).await?;
        Ok(client)
    }

    async fn configure(&self, config: &Mem0Config) -> Result<(), MemoryError> {
        let url = format!("{}/configure", self.base_url);
        tracing::debug!(url, "pushing memory-service configuration");

        let response = self.client.post(&url).json(config).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MemoryError::Configure { status, body });
        }
        Ok(())
    }

    async fn check(endpoint: &str, response: Response) -> Result<Response, MemoryError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(MemoryError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            })
        }
    }
}

#[async_trait]
impl MemoryStore for Mem0Client {
    async fn get_all(&self, filter: &MemoryFilter) -> Result<Vec<MemoryRecord>, MemoryError> {
        let url = format!("{}/memories", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&filter.query())
            .send()
            .await?;
        let response = Self::check("GET /memories", response).await?;
        let list: ListResponse = response.json().await?;
        Ok(list.into_records())
    }

    async fn delete(&self, memory_id: &str) -> Result<(), MemoryError> {
        let url = format!("{}/memories/{memory_id}", self.base_url);
        let response = self.client.delete(&url).send().await?;
        Self::check("DELETE /memories/{id}", response).await?;
        Ok(())
    }

    async fn delete_all(&self, filter: &MemoryFilter) -> Result<(), MemoryError> {
        let url = format!("{}/memories", self.base_url);
        let response = self
            .client
            .delete(&url)
            .query(&filter.query())
            .send()
            .await?;
        Self::check("DELETE /memories", response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, VectorStoreBackend};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> Mem0Config {
        let settings = Settings {
            llm_provider: Some(crate::LlmProvider::Openai),
            llm_provider_raw: Some("openai".into()),
            llm_api_key: None,
            llm_model: Some("gpt-4o-mini".into()),
            embedding_model: None,
            llm_base_url: None,
            database_url: Some("postgresql://db".into()),
            vector_store: VectorStoreBackend::Supabase,
            qdrant_url: None,
            qdrant_api_key: None,
            collection_name: "mem0_memories".into(),
            embedding_dims: None,
            mem0_server_url: "unused".into(),
        };
        super::super::config::build_config(&settings)
    }

    async fn connected_client(server: &MockServer) -> Mem0Client {
        Mock::given(method("POST"))
            .and(path("/configure"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(server)
            .await;
        Mem0Client::connect(&server.uri(), &test_config())
            .await
            .unwrap()
    }

    #[test]
    fn filter_constructors_set_exactly_one_id() {
        let f = MemoryFilter::agent("a1");
        assert_eq!(f.agent_id.as_deref(), Some("a1"));
        assert!(f.user_id.is_none());
        assert!(f.run_id.is_none());
        assert!(!f.is_empty());
        assert!(MemoryFilter::default().is_empty());
    }

    #[test]
    fn list_response_accepts_both_shapes() {
        let wrapped: ListResponse =
            serde_json::from_str(r#"{"results":[{"id":"m1","memory":"likes rust"}]}"#).unwrap();
        assert_eq!(wrapped.into_records()[0].id, "m1");

        let bare: ListResponse = serde_json::from_str(r#"[{"id":"m2"}]"#).unwrap();
        let records = bare.into_records();
        assert_eq!(records[0].id, "m2");
        assert!(records[0].memory.is_none());
    }

    #[tokio::test]
    async fn connect_pushes_configuration() {
        let server = MockServer::start().await;
        let _client = connected_client(&server).await;
        // expect(1) on the configure mock verifies the push on drop.
    }

    #[tokio::test]
    async fn connect_fails_when_configure_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/configure"))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad vector store"))
            .mount(&server)
            .await;

        let err = Mem0Client::connect(&server.uri(), &test_config())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("bad vector store"));
    }

    #[tokio::test]
    async fn get_all_sends_filter_query() {
        let server = MockServer::start().await;
        let client = connected_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/memories"))
            .and(query_param("user_id", "user123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"id": "m1", "memory": "prefers dark mode", "user_id": "user123",
                     "created_at": "2025-05-01T12:00:00Z"}
                ]
            })))
            .mount(&server)
            .await;

        let records = client.get_all(&MemoryFilter::user("user123")).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].memory.as_deref(), Some("prefers dark mode"));
    }

    #[tokio::test]
    async fn delete_targets_the_record_path() {
        let server = MockServer::start().await;
        let client = connected_client(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/memories/mem789"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client.delete("mem789").await.unwrap();
    }

    #[tokio::test]
    async fn delete_all_passes_run_filter() {
        let server = MockServer::start().await;
        let client = connected_client(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/memories"))
            .and(query_param("run_id", "run42"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client.delete_all(&MemoryFilter::run("run42")).await.unwrap();
    }

    #[tokio::test]
    async fn server_error_surfaces_status_and_body() {
        let server = MockServer::start().await;
        let client = connected_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/memories"))
            .respond_with(ResponseTemplate::new(500).set_body_string("vector store down"))
            .mount(&server)
            .await;

        let err = client
            .get_all(&MemoryFilter::user("user"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("vector store down"));
    }
}
