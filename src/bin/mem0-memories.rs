use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use mem0_admin::cli::memories::{self, MemoriesCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = MemoriesCli::parse();
    memories::run(cli).await
}
