#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod mem0;
pub mod ops;
pub mod provider;
pub mod qdrant;

pub use config::Settings;
pub use error::{AdminError, Result};
pub use provider::LlmProvider;
