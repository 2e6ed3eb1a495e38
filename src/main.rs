//! Command-line front end for the shortlinks engine.
//!
//! Exercises the engine against whichever backend the environment selects
//! (`DATABASE_URL`, `FILE_STORAGE_PATH`, or in-memory by default).
//!
//! # Usage
//!
//! ```bash
//! # Allocate a code (dedup returns the existing one)
//! shortlinks shorten https://example.com --owner 1
//!
//! # Resolve a code back to its URL
//! shortlinks resolve abc123
//!
//! # List an owner's active links
//! shortlinks list --owner 1
//!
//! # Queue codes for soft-deletion
//! shortlinks delete abc123 xyz789 --owner 1
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shortlinks::config;
use shortlinks::domain::entities::Resolution;
use shortlinks::state::AppState;

/// Short link allocation and storage engine.
#[derive(Parser)]
#[command(name = "shortlinks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate a short code for a URL
    Shorten {
        /// The URL to shorten
        url: String,

        /// Owner id of the record (0 = anonymous)
        #[arg(long, default_value_t = 0)]
        owner: i64,
    },

    /// Resolve a short code back to its URL
    Resolve {
        /// The short code to look up
        code: String,
    },

    /// List the active links of an owner
    List {
        /// Owner id to list
        #[arg(long, default_value_t = 0)]
        owner: i64,
    },

    /// Queue codes for soft-deletion
    Delete {
        /// Short codes to delete
        codes: Vec<String>,

        /// Owner id; codes owned by others are skipped
        #[arg(long, default_value_t = 0)]
        owner: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = config::load_from_env()?;
    init_tracing(&config);
    config.print_summary();

    let cli = Cli::parse();
    let (state, worker) = AppState::build(&config).await?;

    match cli.command {
        Commands::Shorten { url, owner } => {
            let allocation = state.allocator.allocate(&url, owner).await?;
            if allocation.preexisting {
                println!("{} (already existed)", allocation.code);
            } else {
                println!("{}", allocation.code);
            }
        }

        Commands::Resolve { code } => match state.store.resolve(&code).await? {
            Resolution::Active(url) => println!("{url}"),
            Resolution::Gone => println!("{code}: deleted"),
            Resolution::Missing => println!("{code}: not found"),
        },

        Commands::List { owner } => {
            let links = state.store.list_by_owner(owner).await?;
            if links.is_empty() {
                println!("no links for owner {owner}");
            }
            for (code, url) in links {
                println!("{code}\t{url}");
            }
        }

        Commands::Delete { codes, owner } => {
            let count = codes.len();
            state.enqueue_delete(owner, codes).await?;
            println!("accepted {count} codes for deletion");
        }
    }

    // Dropping the state releases the last queue sender; the worker drains
    // what was enqueued and exits.
    drop(state);
    let _ = worker.await;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
