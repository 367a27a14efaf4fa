use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use movie_recs::{
    config::Config,
    db::Snapshot,
    models::Movie,
    services::{MetadataEnricher, Recommender, TmdbProvider, DEFAULT_TOP_N},
};

/// Look up movie recommendations from the terminal
#[derive(Parser, Debug)]
#[command(name = "recs")]
#[command(about = "Movie recommendations from a precomputed similarity snapshot", long_about = None)]
struct Args {
    /// Catalog snapshot, overrides CATALOG_PATH
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Similarity file or chunk directory, overrides SIMILARITY_PATH
    #[arg(long)]
    similarity: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known titles in catalog order
    List {
        /// Print at most this many titles
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Recommend movies similar to TITLE
    Recommend {
        title: String,

        /// Number of recommendations
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        count: usize,

        /// Skip the metadata lookup
        #[arg(long)]
        no_metadata: bool,
    },
    /// Show details for a movie by external id
    Details { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = args.catalog {
        config.catalog_path = path;
    }
    if let Some(path) = args.similarity {
        config.similarity_path = path;
    }

    let snapshot = Snapshot::load(&config.catalog_path, &config.similarity_path)
        .context("Failed to load movie snapshot")?;
    let recommender = Recommender::new(Arc::new(snapshot));
    let enricher = MetadataEnricher::new(
        Arc::new(TmdbProvider::from_config(&config)?),
        config.placeholder_poster.clone(),
    );

    match args.command {
        Command::List { limit } => {
            let titles = recommender.snapshot().catalog.list_titles();
            let limit = limit.unwrap_or(titles.len());
            for title in titles.into_iter().take(limit) {
                println!("{}", title);
            }
        }
        Command::Recommend {
            title,
            count,
            no_metadata,
        } => {
            let entries = recommender.recommend(&title, count)?;
            if no_metadata {
                for (rank, entry) in entries.iter().enumerate() {
                    println!("{:>2}. {} ({})", rank + 1, entry.title, entry.external_id);
                }
            } else {
                let ids: Vec<i64> = entries.iter().map(|e| e.external_id).collect();
                let metadata = enricher.enrich_many(&ids).await;
                for (rank, (entry, metadata)) in entries.into_iter().zip(metadata).enumerate() {
                    let movie = Movie::from_parts(entry, metadata);
                    println!("{:>2}. {} ({})", rank + 1, movie.title, movie.id);
                    print_metadata(&movie);
                }
            }
        }
        Command::Details { id } => {
            let entry = recommender.snapshot().catalog.find_by_external_id(id)?;
            let movie = Movie::from_parts(entry, enricher.enrich(id).await);
            println!("{} ({})", movie.title, movie.id);
            print_metadata(&movie);
            if let Some(description) = &movie.description {
                println!("    {}", description);
            }
        }
    }

    Ok(())
}

fn print_metadata(movie: &Movie) {
    if !movie.genres.is_empty() {
        println!("    genres: {}", movie.genres.join(", "));
    }
    println!("    poster: {}", movie.poster);
}
