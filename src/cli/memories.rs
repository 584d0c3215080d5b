use clap::Parser;
use console::style;
use dialoguer::Input;

use super::report;
use crate::config::Settings;
use crate::mem0::{Mem0Client, MemoryFilter, MemoryStore, build_config, export_api_keys};
use crate::ops::memories::{self, delete_all_confirmed};

/// Memory manager for a mem0-compatible memory service.
#[derive(Parser, Debug)]
#[command(name = "mem0-memories")]
#[command(version = "0.1.0")]
#[command(about = "List, filter, and delete stored memories.", long_about = None)]
pub struct MemoriesCli {
    /// Run in interactive mode
    #[arg(long)]
    pub interactive: bool,

    /// List all memories
    #[arg(long)]
    pub list_all: bool,

    /// List memories (can be filtered with --user-id, --agent-id, --run-id)
    #[arg(long)]
    pub list_memories: bool,

    /// Delete a specific memory by ID (requires --memory-id)
    #[arg(long)]
    pub delete_memory: bool,

    /// Delete all memories for a user (requires --user-id)
    #[arg(long)]
    pub delete_user_memories: bool,

    /// Delete all memories for an agent (requires --agent-id)
    #[arg(long)]
    pub delete_agent_memories: bool,

    /// Delete all memories for a run (requires --run-id)
    #[arg(long)]
    pub delete_run_memories: bool,

    /// Safely delete all memories (preserves database structure)
    #[arg(long)]
    pub safe_delete_all: bool,

    /// User ID for filtering
    #[arg(long)]
    pub user_id: Option<String>,

    /// Agent ID for filtering
    #[arg(long)]
    pub agent_id: Option<String>,

    /// Run ID for filtering
    #[arg(long)]
    pub run_id: Option<String>,

    /// Memory ID for deletion
    #[arg(long)]
    pub memory_id: Option<String>,

    /// Database URL (defaults to DATABASE_URL env var)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Missing-id validation for delete actions. Returns the error text to print
/// before exiting non-zero.
pub fn required_id_error(cli: &MemoriesCli) -> Option<&'static str> {
    if cli.delete_memory && cli.memory_id.is_none() {
        Some("--memory-id is required for --delete-memory")
    } else if cli.delete_user_memories && cli.user_id.is_none() {
        Some("--user-id is required for --delete-user-memories")
    } else if cli.delete_agent_memories && cli.agent_id.is_none() {
        Some("--agent-id is required for --delete-agent-memories")
    } else if cli.delete_run_memories && cli.run_id.is_none() {
        Some("--run-id is required for --delete-run-memories")
    } else {
        None
    }
}

pub async fn run(cli: MemoriesCli) -> anyhow::Result<()> {
    if let Some(message) = required_id_error(&cli) {
        eprintln!("❌ Error: {message}");
        std::process::exit(1);
    }

    let mut settings = Settings::load();
    if let Some(url) = &cli.database_url {
        println!("🔗 Using provided database URL: {}...", url_preview(url));
        settings.database_url = Some(url.clone());
    } else if let Some(url) = &settings.database_url {
        println!(
            "🔗 Using DATABASE_URL from environment: {}...",
            url_preview(url)
        );
    } else {
        println!("⚠️  Warning: No DATABASE_URL found in .env or environment.");
    }

    // Side effect first: the service reads credentials from the environment,
    // not from the configuration structure.
    export_api_keys(settings.llm_provider, settings.llm_api_key.as_deref());

    let config = build_config(&settings);
    let client = match Mem0Client::connect(&settings.mem0_server_url, &config).await {
        Ok(client) => {
            println!("✅ Connected to memory service successfully");
            println!(
                "🤖 LLM Provider: {}",
                settings.llm_provider_raw.as_deref().unwrap_or("not set")
            );
            println!(
                "📝 LLM Model: {}",
                settings.llm_model.as_deref().unwrap_or("not set")
            );
            client
        }
        Err(e) => {
            println!("❌ Failed to initialize memory client: {e}");
            println!("💡 Check your .env file and ensure the required variables are set:");
            println!("   - MEM0_SERVER_URL (memory service endpoint)");
            println!("   - DATABASE_URL (required for the supabase backend)");
            println!("   - LLM_PROVIDER (openai, openrouter, github_copilot, ollama)");
            println!("   - LLM_CHOICE (model name)");
            println!("   - LLM_API_KEY (if using OpenAI/OpenRouter)");
            println!("   - EMBEDDING_MODEL_CHOICE (optional)");
            std::process::exit(1);
        }
    };

    dispatch(&cli, &client).await
}

async fn dispatch(cli: &MemoriesCli, store: &dyn MemoryStore) -> anyhow::Result<()> {
    let filter = MemoryFilter {
        user_id: cli.user_id.clone(),
        agent_id: cli.agent_id.clone(),
        run_id: cli.run_id.clone(),
    };

    if cli.interactive {
        interactive(store).await?;
    } else if cli.list_all || cli.list_memories {
        report(
            memories::list_memories(store, &filter).await.map(|_| ()),
            "Error listing memories",
        );
    } else if cli.delete_memory {
        // Validated upfront.
        let id = cli.memory_id.as_deref().unwrap_or_default();
        report(
            memories::delete_memory(store, id).await,
            "Error deleting memory",
        );
    } else if cli.delete_user_memories {
        let id = cli.user_id.clone().unwrap_or_default();
        report(
            memories::delete_filtered(store, &MemoryFilter::user(id)).await,
            "Error deleting user memories",
        );
    } else if cli.delete_agent_memories {
        let id = cli.agent_id.clone().unwrap_or_default();
        report(
            memories::delete_filtered(store, &MemoryFilter::agent(id)).await,
            "Error deleting agent memories",
        );
    } else if cli.delete_run_memories {
        let id = cli.run_id.clone().unwrap_or_default();
        report(
            memories::delete_filtered(store, &MemoryFilter::run(id)).await,
            "Error deleting run memories",
        );
    } else if cli.safe_delete_all {
        report(
            memories::safe_delete_all(store, prompt_delete_confirmation)
                .await
                .map(|_| ()),
            "Error deleting memories",
        );
    } else {
        println!("🧠 Memory Manager");
        println!("{}", "=".repeat(40));
        println!("Use --help for usage information");
        println!("Use --interactive for interactive mode");
        println!("\nQuick examples:");
        println!("  mem0-memories --interactive");
        println!("  mem0-memories --list-all");
        println!("  mem0-memories --safe-delete-all");
    }
    Ok(())
}

/// Fixed menu of the interactive loop.
const MENU: [&str; 10] = [
    "List all memories",
    "List memories by user ID",
    "List memories by agent ID",
    "List memories by run ID",
    "Delete specific memory by ID",
    "Delete all memories for a user",
    "Delete all memories for an agent",
    "Delete all memories for a run",
    "Safe delete all memories (recommended)",
    "Exit",
];

async fn interactive(store: &dyn MemoryStore) -> anyhow::Result<()> {
    println!("\n🧠 {}", style("Interactive Memory Manager").bold());
    println!("{}", "=".repeat(50));

    loop {
        println!("\nAvailable actions:");
        for (i, action) in MENU.iter().enumerate() {
            println!("{}. {action}", i + 1);
        }

        let choice: String = Input::new()
            .with_prompt("\nEnter your choice (1-10)")
            .interact_text()?;

        match choice.trim() {
            "1" => report(
                memories::list_memories(store, &MemoryFilter::default())
                    .await
                    .map(|_| ()),
                "Error listing memories",
            ),
            "2" => {
                if let Some(id) = prompt_id("Enter user ID")? {
                    report(
                        memories::list_memories(store, &MemoryFilter::user(id))
                            .await
                            .map(|_| ()),
                        "Error listing memories",
                    );
                }
            }
            "3" => {
                if let Some(id) = prompt_id("Enter agent ID")? {
                    report(
                        memories::list_memories(store, &MemoryFilter::agent(id))
                            .await
                            .map(|_| ()),
                        "Error listing memories",
                    );
                }
            }
            "4" => {
                if let Some(id) = prompt_id("Enter run ID")? {
                    report(
                        memories::list_memories(store, &MemoryFilter::run(id))
                            .await
                            .map(|_| ()),
                        "Error listing memories",
                    );
                }
            }
            "5" => {
                if let Some(id) = prompt_id("Enter memory ID")? {
                    report(
                        memories::delete_memory(store, &id).await,
                        "Error deleting memory",
                    );
                }
            }
            "6" => {
                if let Some(id) = prompt_id("Enter user ID")? {
                    report(
                        memories::delete_filtered(store, &MemoryFilter::user(id)).await,
                        "Error deleting user memories",
                    );
                }
            }
            "7" => {
                if let Some(id) = prompt_id("Enter agent ID")? {
                    report(
                        memories::delete_filtered(store, &MemoryFilter::agent(id)).await,
                        "Error deleting agent memories",
                    );
                }
            }
            "8" => {
                if let Some(id) = prompt_id("Enter run ID")? {
                    report(
                        memories::delete_filtered(store, &MemoryFilter::run(id)).await,
                        "Error deleting run memories",
                    );
                }
            }
            "9" => report(
                memories::safe_delete_all(store, prompt_delete_confirmation)
                    .await
                    .map(|_| ()),
                "Error deleting memories",
            ),
            "10" => {
                println!("👋 Goodbye!");
                break;
            }
            _ => println!("❌ Invalid choice. Please try again."),
        }
    }
    Ok(())
}

fn prompt_delete_confirmation(_count: usize) -> anyhow::Result<bool> {
    let input: String = Input::new()
        .with_prompt("Type 'DELETE' to proceed")
        .allow_empty(true)
        .interact_text()?;
    Ok(delete_all_confirmed(&input))
}

fn prompt_id(label: &str) -> anyhow::Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    let trimmed = input.trim().to_string();
    Ok((!trimmed.is_empty()).then_some(trimmed))
}

fn url_preview(url: &str) -> String {
    url.chars().take(50).collect()
}
