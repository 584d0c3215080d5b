//! Configuration and client adapter for the external memory service.
//!
//! The service owns extraction, consolidation, and similarity search; this
//! module only builds the configuration it expects and wraps its REST
//! operations behind [`MemoryStore`].

pub mod client;
pub mod config;
pub mod credentials;

pub use client::{Mem0Client, MemoryFilter, MemoryRecord, MemoryStore};
pub use config::{Mem0Config, build_config};
pub use credentials::export_api_keys;
