use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::types::{
    ApiEnvelope, CollectionDescription, CollectionInfo, CollectionsResult, CountRequest,
    CountResult, CreateCollectionRequest, DeletePointsRequest, PointId, ScrollRequest,
    ScrollResult,
};
use crate::error::QdrantError;
use crate::http::build_admin_client;

/// Page cap for clear-collection point enumeration. One page only; clearing
/// larger collections takes repeated invocations.
pub const SCROLL_PAGE_LIMIT: usize = 10_000;

pub struct QdrantClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl QdrantClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(ToString::to_string),
            client: build_admin_client(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let builder = self.client.request(method, &url);
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }

    async fn read<T: DeserializeOwned>(
        endpoint: &str,
        response: Response,
    ) -> Result<T, QdrantError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(QdrantError::Api {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }
        let envelope: ApiEnvelope<T> = response.json().await?;
        Ok(envelope.result)
    }

    pub async fn list_collections(&self) -> Result<Vec<CollectionDescription>, QdrantError> {
        let response = self.request(Method::GET, "/collections").send().await?;
        let result: CollectionsResult = Self::read("GET /collections", response).await?;
        Ok(result.collections)
    }

    pub async fn collection_exists(&self, name: &str) -> Result<bool, QdrantError> {
        Ok(self
            .list_collections()
            .await?
            .iter()
            .any(|c| c.name == name))
    }

    pub async fn collection_info(&self, name: &str) -> Result<CollectionInfo, QdrantError> {
        let response = self
            .request(Method::GET, &format!("/collections/{name}"))
            .send()
            .await?;
        Self::read("GET /collections/{name}", response).await
    }

    pub async fn create_collection(&self, name: &str, dims: u32) -> Result<(), QdrantError> {
        let response = self
            .request(Method::PUT, &format!("/collections/{name}"))
            .json(&CreateCollectionRequest::cosine(dims.into()))
            .send()
            .await?;
        let _created: bool = Self::read("PUT /collections/{name}", response).await?;
        Ok(())
    }

    pub async fn delete_collection(&self, name: &str) -> Result<(), QdrantError> {
        let response = self
            .request(Method::DELETE, &format!("/collections/{name}"))
            .send()
            .await?;
        let _deleted: bool = Self::read("DELETE /collections/{name}", response).await?;
        Ok(())
    }

    pub async fn count(&self, name: &str) -> Result<u64, QdrantError> {
        let response = self
            .request(Method::POST, &format!("/collections/{name}/points/count"))
            .json(&CountRequest { exact: true })
            .send()
            .await?;
        let result: CountResult = Self::read("POST points/count", response).await?;
        Ok(result.count)
    }

    /// Enumerate up to `limit` point ids, without payloads or vectors.
    pub async fn scroll_point_ids(
        &self,
        name: &str,
        limit: usize,
    ) -> Result<Vec<PointId>, QdrantError> {
        let response = self
            .request(Method::POST, &format!("/collections/{name}/points/scroll"))
            .json(&ScrollRequest {
                limit,
                with_payload: false,
                with_vector: false,
            })
            .send()
            .await?;
        let result: ScrollResult = Self::read("POST points/scroll", response).await?;
        Ok(result.points.into_iter().map(|p| p.id).collect())
    }

    pub async fn delete_points(&self, name: &str, ids: Vec<PointId>) -> Result<(), QdrantError> {
        let response = self
            .request(Method::POST, &format!("/collections/{name}/points/delete"))
            .json(&DeletePointsRequest { points: ids })
            .send()
            .await?;
        let _result: serde_json::Value = Self::read("POST points/delete", response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn envelope(result: serde_json::Value) -> serde_json::Value {
        serde_json::json!({"result": result, "status": "ok", "time": 0.001})
    }

    #[test]
    fn strips_trailing_slash() {
        let client = QdrantClient::new("https://q.example:6333/", None);
        assert_eq!(client.base_url, "https://q.example:6333");
    }

    #[tokio::test]
    async fn list_collections_sends_api_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections"))
            .and(header("api-key", "qk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
                serde_json::json!({"collections": [{"name": "mem0_memories"}, {"name": "other"}]}),
            )))
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri(), Some("qk"));
        let collections = client.list_collections().await.unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].name, "mem0_memories");
        assert!(client.collection_exists("other").await.unwrap());
        assert!(!client.collection_exists("absent").await.unwrap());
    }

    #[tokio::test]
    async fn collection_info_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/mem0_memories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "status": "green",
                "points_count": 12,
                "indexed_vectors_count": 12,
                "config": {"params": {"vectors": {"size": 1536, "distance": "Cosine"}}}
            }))))
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri(), None);
        let info = client.collection_info("mem0_memories").await.unwrap();
        assert_eq!(info.points_count, Some(12));
        assert_eq!(info.vector_params().unwrap().size, 1536);
    }

    #[tokio::test]
    async fn missing_collection_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/ghost"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string("Not found: Collection `ghost` doesn't exist!"),
            )
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri(), None);
        let err = client.collection_info("ghost").await.unwrap_err();
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn create_collection_puts_cosine_vectors() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/collections/mem0_memories"))
            .and(body_partial_json(
                serde_json::json!({"vectors": {"size": 768, "distance": "Cosine"}}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!(true))))
            .expect(1)
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri(), None);
        client.create_collection("mem0_memories", 768).await.unwrap();
    }

    #[tokio::test]
    async fn count_requests_exact_totals() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/mem0_memories/points/count"))
            .and(body_partial_json(serde_json::json!({"exact": true})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({"count": 99}))),
            )
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri(), None);
        assert_eq!(client.count("mem0_memories").await.unwrap(), 99);
    }

    #[tokio::test]
    async fn scroll_returns_bare_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/mem0_memories/points/scroll"))
            .and(body_partial_json(
                serde_json::json!({"with_payload": false, "with_vector": false}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "points": [{"id": 1}, {"id": "9c4e1a6e-3f2b-4e1e-9c70-000000000000"}],
                "next_page_offset": null
            }))))
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri(), None);
        let ids = client
            .scroll_point_ids("mem0_memories", SCROLL_PAGE_LIMIT)
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], PointId::Num(1));
    }

    #[tokio::test]
    async fn delete_points_posts_the_id_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/mem0_memories/points/delete"))
            .and(body_partial_json(serde_json::json!({"points": [3, 4]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(serde_json::json!({"operation_id": 7, "status": "acknowledged"}))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri(), None);
        client
            .delete_points("mem0_memories", vec![PointId::Num(3), PointId::Num(4)])
            .await
            .unwrap();
    }
}
