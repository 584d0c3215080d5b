use clap::{Parser, Subcommand};
use dialoguer::Confirm;

use super::report;
use crate::config::Settings;
use crate::mem0::{Mem0Client, build_config, export_api_keys};
use crate::ops::collections::{self, OutputFormat};
use crate::qdrant::QdrantClient;

/// Collection administration for the Qdrant vector store.
#[derive(Parser, Debug)]
#[command(name = "mem0-qdrant")]
#[command(version = "0.1.0")]
#[command(about = "Manage Qdrant collections backing the memory service.", long_about = None)]
pub struct QdrantCli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the memory collection (idempotent unless --force)
    CreateCollection {
        /// Collection name (defaults to QDRANT_COLLECTION_NAME)
        #[arg(long)]
        collection_name: Option<String>,
        /// Drop and recreate an existing collection
        #[arg(long)]
        force: bool,
    },
    /// List all collections with basic details
    ListCollections,
    /// Delete a collection
    DeleteCollection {
        #[arg(long)]
        collection_name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Show detailed information about a collection
    CollectionInfo {
        /// Collection name (defaults to QDRANT_COLLECTION_NAME)
        #[arg(long)]
        collection_name: Option<String>,
    },
    /// Count vectors in a collection
    CountVectors {
        /// Collection name (defaults to QDRANT_COLLECTION_NAME)
        #[arg(long)]
        collection_name: Option<String>,
    },
    /// Remove every vector from a collection without deleting it
    ClearCollection {
        /// Collection name (defaults to QDRANT_COLLECTION_NAME)
        #[arg(long)]
        collection_name: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Fetch all memories through the memory service
    GetAllMemories {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::List)]
        format: OutputFormat,
    },
    /// Verify connectivity to the Qdrant server
    TestConnection,
}

pub async fn run(cli: QdrantCli) -> anyhow::Result<()> {
    let settings = Settings::load();

    match cli.command {
        Command::CreateCollection {
            collection_name,
            force,
        } => {
            let client = qdrant_client(&settings);
            let name = collection_name.unwrap_or_else(|| settings.collection_name.clone());
            let dims = settings.resolved_embedding_dims();
            println!(
                "Provider: {} (embedding dimensions: {dims})",
                settings.llm_provider_raw.as_deref().unwrap_or("not set")
            );
            report(
                collections::create_collection(&client, &name, dims, force)
                    .await
                    .map(|_| ()),
                "Error creating collection",
            );
        }
        Command::ListCollections => {
            let client = qdrant_client(&settings);
            report(
                collections::list_collections(&client).await,
                "Error listing collections",
            );
        }
        Command::DeleteCollection {
            collection_name,
            force,
        } => {
            if !force && !confirm_destructive(&format!("Delete collection '{collection_name}'?"))? {
                println!("Operation cancelled.");
                return Ok(());
            }
            let client = qdrant_client(&settings);
            report(
                collections::delete_collection(&client, &collection_name).await,
                "Error deleting collection",
            );
        }
        Command::CollectionInfo { collection_name } => {
            let client = qdrant_client(&settings);
            let name = collection_name.unwrap_or_else(|| settings.collection_name.clone());
            report(
                collections::collection_info(&client, &name).await,
                "Error getting collection info",
            );
        }
        Command::CountVectors { collection_name } => {
            let client = qdrant_client(&settings);
            let name = collection_name.unwrap_or_else(|| settings.collection_name.clone());
            report(
                collections::count_vectors(&client, &name).await,
                "Error counting vectors",
            );
        }
        Command::ClearCollection {
            collection_name,
            force,
        } => {
            let name = collection_name.unwrap_or_else(|| settings.collection_name.clone());
            if !force
                && !confirm_destructive(&format!("Clear all vectors from collection '{name}'?"))?
            {
                println!("Operation cancelled.");
                return Ok(());
            }
            let client = qdrant_client(&settings);
            report(
                collections::clear_collection(&client, &name).await.map(|_| ()),
                "Error clearing collection",
            );
        }
        Command::GetAllMemories { format } => {
            println!("Collection: {}", settings.collection_name);
            println!(
                "Provider: {}",
                settings.llm_provider_raw.as_deref().unwrap_or("not set")
            );
            let store = memory_client(&settings).await;
            report(
                collections::get_all_memories(&store, format).await,
                "Error retrieving memories",
            );
        }
        Command::TestConnection => {
            println!("Qdrant URL: {}", settings.qdrant_url.as_deref().unwrap_or("not set"));
            println!("Collection: {}", settings.collection_name);
            println!(
                "Provider: {}",
                settings.llm_provider_raw.as_deref().unwrap_or("not set")
            );
            let client = qdrant_client(&settings);
            report(
                collections::test_connection(&client).await,
                "Error testing connection",
            );
        }
    }
    Ok(())
}

/// Build the Qdrant client or exit with remediation hints. Every subcommand
/// except get-all-memories needs it.
fn qdrant_client(settings: &Settings) -> QdrantClient {
    match settings.require_qdrant() {
        Ok((url, api_key)) => QdrantClient::new(&url, Some(&api_key)),
        Err(e) => {
            println!("❌ {e}");
            println!("💡 Set QDRANT_URL and QDRANT_API_KEY in your .env file");
            std::process::exit(1);
        }
    }
}

/// Same connection flow as the memory manager binary.
async fn memory_client(settings: &Settings) -> Mem0Client {
    export_api_keys(settings.llm_provider, settings.llm_api_key.as_deref());
    let config = build_config(settings);
    match Mem0Client::connect(&settings.mem0_server_url, &config).await {
        Ok(client) => client,
        Err(e) => {
            println!("❌ Failed to initialize memory client: {e}");
            println!("💡 Check MEM0_SERVER_URL and your provider variables in .env");
            std::process::exit(1);
        }
    }
}

fn confirm_destructive(prompt: &str) -> anyhow::Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
