use anyhow::Result;
use clap::ValueEnum;

use super::memories::DEFAULT_USER_ID;
use crate::mem0::{MemoryFilter, MemoryRecord, MemoryStore};
use crate::qdrant::{QdrantClient, SCROLL_PAGE_LIMIT};

/// Output style for `get-all-memories`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Flattened memory contents as a JSON array.
    Json,
    /// One detailed block per record.
    #[default]
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Collection already present; nothing touched.
    Existing,
    Created,
    /// `--force`: existing collection dropped first.
    Recreated,
}

/// Create the collection, idempotently unless forced.
pub async fn create_collection(
    client: &QdrantClient,
    name: &str,
    dims: u32,
    force: bool,
) -> Result<CreateOutcome> {
    let exists = client.collection_exists(name).await?;
    if exists && !force {
        println!("Collection '{name}' already exists. Use --force to recreate.");
        return Ok(CreateOutcome::Existing);
    }
    if exists {
        println!("Deleting existing collection '{name}'...");
        client.delete_collection(name).await?;
    }

    println!("Creating collection '{name}' with {dims} dimensions...");
    client.create_collection(name, dims).await?;

    println!("✅ Collection '{name}' created successfully!");
    println!("   - Dimensions: {dims}");
    println!("   - Distance: Cosine");

    Ok(if exists {
        CreateOutcome::Recreated
    } else {
        CreateOutcome::Created
    })
}

pub async fn list_collections(client: &QdrantClient) -> Result<()> {
    let collections = client.list_collections().await?;
    if collections.is_empty() {
        println!("No collections found.");
        return Ok(());
    }

    println!("Available collections:");
    println!("{}", "-".repeat(50));
    for collection in collections {
        println!("📁 {}", collection.name);
        // Per-collection detail is best effort; a sick collection should not
        // break the listing.
        match client.collection_info(&collection.name).await {
            Ok(info) => {
                println!("   - Vectors: {}", info.points_count.unwrap_or(0));
                println!("   - Status: {}", info.status);
                if let Some(params) = info.vector_params() {
                    println!("   - Dimensions: {}", params.size);
                    println!("   - Distance: {}", params.distance);
                }
            }
            Err(e) => println!("   - (info unavailable: {e})"),
        }
        println!();
    }
    Ok(())
}

pub async fn delete_collection(client: &QdrantClient, name: &str) -> Result<()> {
    client.delete_collection(name).await?;
    println!("✅ Collection '{name}' deleted successfully!");
    Ok(())
}

pub async fn collection_info(client: &QdrantClient, name: &str) -> Result<()> {
    let info = client.collection_info(name).await?;

    println!("Collection Information: {name}");
    println!("{}", "=".repeat(50));
    println!("Status: {}", info.status);
    println!("Points Count: {}", info.points_count.unwrap_or(0));
    println!(
        "Indexed Vectors Count: {}",
        info.indexed_vectors_count.unwrap_or(0)
    );
    if let Some(params) = info.vector_params() {
        println!("Vector Size: {}", params.size);
        println!("Distance Function: {}", params.distance);
    }
    Ok(())
}

pub async fn count_vectors(client: &QdrantClient, name: &str) -> Result<()> {
    let count = client.count(name).await?;
    println!("Collection '{name}' contains {count} vectors");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    AlreadyEmpty,
    Cleared(usize),
}

/// Remove all points from the collection without deleting it. One scroll
/// page per invocation.
pub async fn clear_collection(client: &QdrantClient, name: &str) -> Result<ClearOutcome> {
    let ids = client.scroll_point_ids(name, SCROLL_PAGE_LIMIT).await?;
    if ids.is_empty() {
        println!("Collection '{name}' is already empty");
        return Ok(ClearOutcome::AlreadyEmpty);
    }

    let cleared = ids.len();
    client.delete_points(name, ids).await?;
    println!("✅ Cleared {cleared} vectors from collection '{name}'");
    Ok(ClearOutcome::Cleared(cleared))
}

pub async fn test_connection(client: &QdrantClient) -> Result<()> {
    println!("Testing Qdrant connection...");
    let collections = client.list_collections().await?;
    println!("✅ Connection successful!");
    println!("Available collections: {}", collections.len());
    Ok(())
}

/// Fetch and print every memory of the default user via the memory service.
pub async fn get_all_memories(store: &dyn MemoryStore, format: OutputFormat) -> Result<()> {
    println!("Retrieving all memories...");
    let memories = store
        .get_all(&MemoryFilter::user(DEFAULT_USER_ID))
        .await?;
    println!("✅ Retrieved {} memories", memories.len());

    match format {
        OutputFormat::Json => {
            println!("\nMemories (JSON format):");
            println!(
                "{}",
                serde_json::to_string_pretty(&flatten_memories(&memories))?
            );
        }
        OutputFormat::List => {
            println!("\nMemories:");
            for (i, memory) in memories.iter().enumerate() {
                println!("{}. ID: {}", i + 1, memory.id);
                println!("   Memory: {}", memory.memory.as_deref().unwrap_or("N/A"));
                println!(
                    "   User ID: {}",
                    memory.user_id.as_deref().unwrap_or("N/A")
                );
                println!(
                    "   Agent ID: {}",
                    memory.agent_id.as_deref().unwrap_or("N/A")
                );
                println!(
                    "   Created: {}",
                    memory.created_at.as_deref().unwrap_or("N/A")
                );
                println!();
            }
        }
    }
    Ok(())
}

/// JSON output carries just the content strings; records without content
/// fall back to their id.
fn flatten_memories(memories: &[MemoryRecord]) -> Vec<String> {
    memories
        .iter()
        .map(|m| m.memory.clone().unwrap_or_else(|| m.id.clone()))
        .collect()
}
