//! CLI entry point standing in for the out-of-scope HTTP front-end (§1): a
//! thin binary that bootstraps [`jurscreen_core::ScreeningService`] and
//! scans text passed on the command line or over stdin.

use anyhow::{Context, Result};
use clap::Parser;
use jurscreen_core::{ScreeningConfig, ScreeningService};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "screen", about = "Scan text for registry mentions")]
struct Args {
    /// Path to the registry CSV. Overrides REGISTRY_CSV_PATH.
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Cache directory for the compiled automaton. Overrides CACHE_DIR.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Text to scan. If omitted, reads from stdin.
    #[arg(long)]
    text: Option<String>,

    /// Print health status and exit.
    #[arg(long)]
    health: bool,
}

fn main() -> Result<()> {
    jurscreen_core::init_tracing();
    let args = Args::parse();

    let mut config = ScreeningConfig::from_env();
    if let Some(registry) = args.registry {
        config.registry_csv_path = registry;
    }
    if let Some(cache_dir) = args.cache_dir {
        config.cache_dir = cache_dir;
    }

    let service = ScreeningService::bootstrap(config).context("failed to bootstrap screening service")?;

    if args.health {
        let health = service.health();
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    let text = match args.text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("failed to read text from stdin")?;
            buf
        }
    };

    let candidates = service.scan(&text, None);
    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}
