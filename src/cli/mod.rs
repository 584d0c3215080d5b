//! Command-line definitions and dispatch for the two admin binaries.

pub mod memories;
pub mod qdrant;

/// Catch an operation error at the action boundary and report it. Nothing
/// propagates out of a CLI action; the process keeps its exit status.
pub(crate) fn report(result: anyhow::Result<()>, context: &str) {
    if let Err(e) = result {
        println!("❌ {context}: {e:#}");
    }
}
