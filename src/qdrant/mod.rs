//! Thin REST client for the Qdrant vector database.
//!
//! Only the handful of collection-management calls the admin tool needs;
//! vector contents are never touched beyond enumerating point ids for a
//! clear operation.

pub mod client;
pub mod types;

pub use client::{QdrantClient, SCROLL_PAGE_LIMIT};
pub use types::{CollectionDescription, CollectionInfo, PointId, VectorParams};
