use anyhow::Result;

use crate::mem0::{MemoryFilter, MemoryRecord, MemoryStore};

/// Sentinel user the memory service files unscoped memories under.
pub const DEFAULT_USER_ID: &str = "user";

/// Literal string required to confirm a safe delete-all. Exact match only;
/// lowercase does not count.
pub const DELETE_CONFIRMATION: &str = "DELETE";

pub fn delete_all_confirmed(input: &str) -> bool {
    input == DELETE_CONFIRMATION
}

/// List memories with optional filtering. An empty filter falls back to the
/// default user sentinel.
pub async fn list_memories(
    store: &dyn MemoryStore,
    filter: &MemoryFilter,
) -> Result<Vec<MemoryRecord>> {
    let filter = if filter.is_empty() {
        println!("🔍 Fetching memories for default user: {DEFAULT_USER_ID}");
        MemoryFilter::user(DEFAULT_USER_ID)
    } else {
        println!("🔍 Fetching memories...");
        filter.clone()
    };

    let memories = store.get_all(&filter).await?;
    println!("📋 Found {} memories", memories.len());

    for (i, memory) in memories.iter().enumerate() {
        println!("   {}. ID: {}", i + 1, memory.id);
        println!(
            "      Memory: {}...",
            preview(memory.memory.as_deref().unwrap_or("N/A"), 100)
        );
        println!(
            "      User ID: {}",
            memory.user_id.as_deref().unwrap_or("N/A")
        );
        println!(
            "      Agent ID: {}",
            memory.agent_id.as_deref().unwrap_or("N/A")
        );
        println!(
            "      Created: {}",
            memory.created_at.as_deref().unwrap_or("N/A")
        );
        println!();
    }

    Ok(memories)
}

pub async fn delete_memory(store: &dyn MemoryStore, memory_id: &str) -> Result<()> {
    println!("🗑️  Deleting memory with ID: {memory_id}");
    store.delete(memory_id).await?;
    println!("✅ Memory deleted successfully");
    Ok(())
}

/// Delete all memories matching the filter (one of user/agent/run).
pub async fn delete_filtered(store: &dyn MemoryStore, filter: &MemoryFilter) -> Result<()> {
    let scope = describe_filter(filter);
    println!("🗑️  Deleting all memories for {scope}");
    store.delete_all(filter).await?;
    println!("✅ All memories for {scope} deleted successfully");
    Ok(())
}

fn describe_filter(filter: &MemoryFilter) -> String {
    if let Some(id) = &filter.user_id {
        format!("user: {id}")
    } else if let Some(id) = &filter.agent_id {
        format!("agent: {id}")
    } else if let Some(id) = &filter.run_id {
        format!("run: {id}")
    } else {
        "all".to_string()
    }
}

/// Outcome of a safe delete-all pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeDeleteOutcome {
    /// Nothing stored for the default user.
    Empty,
    /// The operator declined the confirmation.
    Cancelled,
    /// Batch ran to the end; every record was attempted.
    Deleted { deleted: usize, failed: usize },
}

/// Delete every memory of the default user, one record at a time.
///
/// `confirm` receives the record count and decides whether to proceed; the
/// CLI wires it to the literal-`DELETE` prompt. A failing record is reported
/// and skipped, never aborting the batch.
pub async fn safe_delete_all<F>(store: &dyn MemoryStore, confirm: F) -> Result<SafeDeleteOutcome>
where
    F: FnOnce(usize) -> Result<bool>,
{
    println!("🗑️  Safely deleting all memories...");
    println!("💡 This deletes memory data but preserves database structure");

    let memories = store
        .get_all(&MemoryFilter::user(DEFAULT_USER_ID))
        .await?;
    if memories.is_empty() {
        println!("📭 No memories found to delete");
        return Ok(SafeDeleteOutcome::Empty);
    }

    println!("📋 Found {} memories to delete", memories.len());
    if !confirm(memories.len())? {
        println!("❌ Operation cancelled");
        return Ok(SafeDeleteOutcome::Cancelled);
    }

    let mut deleted = 0;
    let mut failed = 0;
    for memory in &memories {
        match store.delete(&memory.id).await {
            Ok(()) => deleted += 1,
            Err(e) => {
                failed += 1;
                println!("⚠️  Could not delete memory {}: {e}", memory.id);
            }
        }
    }

    println!("✅ Successfully deleted {deleted} memories");
    Ok(SafeDeleteOutcome::Deleted { deleted, failed })
}

/// First `max` characters of `text`, char-boundary safe.
fn preview(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
