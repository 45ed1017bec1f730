use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use riffstore::config::StoreConfig;
use riffstore::logging;
use riffstore::{SongStore, SongUpdate};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "riffstore")]
#[command(about = "List, fetch and update rifftext songs kept in a JSON file")]
struct Args {
    /// Song data file (default: $RIFFSTORE_DATA, then ./songs.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List songs, optionally filtered by case-insensitive substring on title/artist/tags
    List { query: Option<String> },

    /// Print one song
    Get { id: String },

    /// Create or fully replace a song
    Put {
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        artist: Option<String>,

        /// Repeat for several tags; order is kept
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long, conflicts_with = "rifftext_file", required_unless_present = "rifftext_file")]
        rifftext: Option<String>,

        /// Read rifftext from a file, or "-" for stdin
        #[arg(long)]
        rifftext_file: Option<PathBuf>,
    },

    /// Load the store (seeding it on first run) and print its ids
    Seed,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_rifftext(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read rifftext from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rifftext file {:?}", path))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.quiet);

    let config = args
        .data
        .map(StoreConfig::new)
        .unwrap_or_else(StoreConfig::from_env);

    let store = SongStore::open(&config.data_file)
        .with_context(|| format!("Failed to open song store {:?}", config.data_file))?;
    info!("Opened song store: {:?}", store.path());

    match args.command {
        Command::List { query } => {
            let songs = store.list(query.as_deref());
            print_json(&songs)?;
        }
        Command::Get { id } => {
            let song = store.get(&id)?;
            print_json(&song)?;
        }
        Command::Put {
            id,
            title,
            artist,
            tags,
            rifftext,
            rifftext_file,
        } => {
            let rifftext = match (rifftext, rifftext_file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_rifftext(&path)?,
                (None, None) => anyhow::bail!("One of --rifftext or --rifftext-file is required"),
            };
            let update = SongUpdate {
                title,
                artist,
                tags,
                rifftext,
            };
            let song = store
                .upsert(&id, update)
                .with_context(|| format!("Failed to save song '{}'", id))?;
            print_json(&song)?;
        }
        Command::Seed => {
            let ids: Vec<String> = store.snapshot().keys().map(str::to_string).collect();
            print_json(&ids)?;
        }
    }

    Ok(())
}
