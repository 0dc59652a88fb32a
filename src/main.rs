use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crossover::analogy::{AnalogyResolver, ResolverSettings};
use crossover::config::{Config, IndexBackend};
use crossover::documents::fs::FsDocumentStore;
use crossover::explain::ExplanationComposer;
use crossover::index::client::VectorIndexClient;
use crossover::index::memory::InMemoryIndex;
use crossover::index::traits::VectorLookup;
use crossover::llm::client::ChatCompletionsClient;
use crossover::llm::extractor::LlmFeatureExtractor;
use crossover::llm::traits::{OfflineGenerator, TextGenerator};
use crossover::output::terminal;
use crossover::pipeline::EquivalenceEngine;
use crossover::similarity::SimilarityScorer;

/// Crossover: find an artist's counterparts in another genre.
///
/// Translates an artist into a target genre by embedding arithmetic, then
/// scores and explains each equivalent from the artists' documents.
#[derive(Parser)]
#[command(name = "crossover", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find equivalents of an artist in another genre
    Resolve {
        /// Artist id as stored in the vector index
        entity: String,

        /// Genre the artist belongs to
        #[arg(long)]
        from: String,

        /// Genre to find equivalents in
        #[arg(long)]
        to: String,

        /// Number of equivalents to return (default: 5)
        #[arg(long, default_value = "5")]
        top_k: usize,

        /// Also score and explain each equivalent
        #[arg(long)]
        explain: bool,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Score and explain two named artists against each other
    Compare {
        source: String,
        source_group: String,
        target: String,
        target_group: String,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recompute genre centroids in a local index snapshot
    Centroids {
        /// Snapshot to read (defaults to CROSSOVER_INDEX_SNAPSHOT)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Where to write the result (defaults to overwriting the input)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crossover=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            entity,
            from,
            to,
            top_k,
            explain,
            json,
        } => {
            let config = Config::load()?;
            let engine = build_engine(&config)?;

            if !json {
                println!("Resolving {entity} ({from}) into {to}...");
            }

            let report = engine
                .find_equivalents(&entity, &from, &to, top_k, explain)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report);
            }
        }

        Commands::Compare {
            source,
            source_group,
            target,
            target_group,
            json,
        } => {
            let config = Config::load()?;
            let engine = build_engine(&config)?;

            let comparison = engine
                .compare_pair(&source, &source_group, &target, &target_group)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                println!(
                    "\n{}",
                    format!("=== {source} ({source_group}) vs {target} ({target_group}) ===").bold()
                );
                terminal::display_comparison(&comparison);
                println!();
            }
        }

        Commands::Centroids { snapshot, output } => {
            let config = Config::load()?;
            let input = match snapshot {
                Some(path) => path,
                None => match config.require_index()? {
                    IndexBackend::Snapshot(path) => path.clone(),
                    IndexBackend::Remote { .. } => anyhow::bail!(
                        "Centroids can only be rebuilt in a local snapshot.\n\
                         Pass --snapshot or set CROSSOVER_INDEX_SNAPSHOT."
                    ),
                },
            };
            let output = output.unwrap_or_else(|| input.clone());

            let mut index = InMemoryIndex::load_snapshot(&input)?;
            let groups = index.rebuild_centroids(&config.centroid_prefix)?;
            index.save_snapshot(&output)?;

            info!(groups, path = %output.display(), "Centroids rebuilt");
            println!(
                "{} {groups} genre centroids written to {}",
                "Done:".bold(),
                output.display()
            );
        }
    }

    Ok(())
}

/// Wire the configured backends into an equivalence engine.
fn build_engine(config: &Config) -> Result<EquivalenceEngine> {
    let index: Arc<dyn VectorLookup> = match config.require_index()? {
        IndexBackend::Remote { url, api_key } => {
            Arc::new(VectorIndexClient::new(url, api_key, &config.entity_kind)?)
        }
        IndexBackend::Snapshot(path) => Arc::new(InMemoryIndex::load_snapshot(path)?),
    };

    let generator: Arc<dyn TextGenerator> = if config.has_llm() {
        Arc::new(ChatCompletionsClient::new(
            &config.llm_api_url,
            &config.llm_model,
            &config.llm_api_key,
        )?)
    } else {
        info!("No LLM_API_KEY set, using template explanations and empty features");
        Arc::new(OfflineGenerator)
    };

    let call_timeout = Some(config.call_timeout);
    let settings = ResolverSettings {
        centroid_prefix: config.centroid_prefix.clone(),
        call_timeout,
        ..ResolverSettings::default()
    };
    let resolver = match config.seed {
        Some(seed) => AnalogyResolver::with_seed(index.clone(), settings, seed),
        None => AnalogyResolver::new(index.clone(), settings),
    };

    let extractor = Arc::new(LlmFeatureExtractor::new(generator.clone(), call_timeout));
    let documents = Arc::new(FsDocumentStore::new(config.document_dir.clone()));
    let scorer = SimilarityScorer::new(ExplanationComposer::new(generator, call_timeout));

    Ok(
        EquivalenceEngine::new(resolver, index, documents, extractor, scorer)
            .with_concurrency(config.concurrency),
    )
}
