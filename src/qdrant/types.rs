use serde::{Deserialize, Serialize};

/// Standard Qdrant REST envelope: `{"result": ..., "status": "ok", "time": ...}`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub result: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDescription {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CollectionsResult {
    pub collections: Vec<CollectionDescription>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionInfo {
    pub status: String,
    #[serde(default)]
    pub points_count: Option<u64>,
    #[serde(default)]
    pub indexed_vectors_count: Option<u64>,
    #[serde(default)]
    pub config: Option<CollectionConfig>,
}

impl CollectionInfo {
    /// Single-vector parameters, when the collection is not using named
    /// vectors.
    pub fn vector_params(&self) -> Option<&VectorParams> {
        self.config
            .as_ref()?
            .params
            .as_ref()?
            .vectors
            .as_ref()?
            .params()
    }
}

#[derive(Debug, Deserialize)]
pub struct CollectionConfig {
    #[serde(default)]
    pub params: Option<CollectionParams>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionParams {
    #[serde(default)]
    pub vectors: Option<VectorsConfig>,
}

/// Collections created by this tool are single-vector, but inspect must not
/// choke on named-vector collections created elsewhere.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum VectorsConfig {
    Single(VectorParams),
    Named(serde_json::Value),
}

impl VectorsConfig {
    pub fn params(&self) -> Option<&VectorParams> {
        match self {
            Self::Single(params) => Some(params),
            Self::Named(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorParams {
    pub size: u64,
    pub distance: String,
}

#[derive(Debug, Serialize)]
pub struct CreateCollectionRequest {
    pub vectors: VectorParams,
}

impl CreateCollectionRequest {
    pub fn cosine(size: u64) -> Self {
        Self {
            vectors: VectorParams {
                size,
                distance: "Cosine".to_string(),
            },
        }
    }
}

/// Qdrant point ids are either unsigned integers or UUID strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Num(u64),
    Uuid(String),
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Uuid(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScrollResult {
    pub points: Vec<ScrollPoint>,
}

#[derive(Debug, Deserialize)]
pub struct ScrollPoint {
    pub id: PointId,
}

#[derive(Debug, Serialize)]
pub struct ScrollRequest {
    pub limit: usize,
    pub with_payload: bool,
    pub with_vector: bool,
}

#[derive(Debug, Serialize)]
pub struct CountRequest {
    pub exact: bool,
}

#[derive(Debug, Deserialize)]
pub struct CountResult {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct DeletePointsRequest {
    pub points: Vec<PointId>,
}
