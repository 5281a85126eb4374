use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use thicket::config::PipelineConfig;
use thicket::labeling::stopwords::stopword_set;
use thicket::model::{validate_items, GeneSet};
use thicket::output::terminal;
use thicket::pipeline::cluster;
use thicket::similarity::jaccard::SimilarityMatrix;

/// Thicket: similarity-network pruning and clustering for enrichment
/// results.
///
/// Turns a flat list of significant gene sets into a small number of
/// pruned, labeled clusters of closely related sets.
#[derive(Parser)]
#[command(name = "thicket", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pruning + clustering + labeling pipeline
    Run {
        /// JSON file with an array of gene-set records
        input: PathBuf,

        /// Write the full artifacts as pretty-printed JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Jaccard score required for a similarity edge (exclusive bounds 0..1)
        #[arg(long, default_value = "0.2")]
        threshold: f64,

        /// Minimum number of sets in an interpretable cluster
        #[arg(long, default_value = "3")]
        min_cluster_size: usize,

        /// Minimum occurrences for a token to qualify as a label term
        #[arg(long, default_value = "2")]
        min_term_frequency: usize,

        /// Maximum number of terms in a cluster label
        #[arg(long, default_value = "4")]
        max_label_terms: usize,

        /// Extra stopword to exclude from labels (repeatable)
        #[arg(long = "stopword")]
        stopwords: Vec<String>,
    },

    /// Print pairwise overlap/Jaccard scores for threshold tuning
    Similarity {
        /// JSON file with an array of gene-set records
        input: PathBuf,

        /// Hide pairs with a Jaccard score below this
        #[arg(long, default_value = "0.05")]
        floor: f64,
    },

    /// Print the effective stopword list used for labeling
    Stopwords {
        /// Extra stopword to include (repeatable)
        #[arg(long = "stopword")]
        stopwords: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("thicket=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            threshold,
            min_cluster_size,
            min_term_frequency,
            max_label_terms,
            stopwords,
        } => {
            let items = load_items(&input)?;
            let config = PipelineConfig {
                jaccard_threshold: threshold,
                min_cluster_size,
                min_term_frequency,
                max_label_terms,
                extra_stopwords: stopwords,
            };
            let artifacts = cluster::run(&items, &config)?;
            terminal::display_run(&artifacts);

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&artifacts)?;
                fs::write(&path, json)
                    .with_context(|| format!("writing artifacts to {}", path.display()))?;
                println!("Artifacts written to {}", path.display());
            }
        }

        Commands::Similarity { input, floor } => {
            let items = load_items(&input)?;
            validate_items(&items)?;
            let matrix = SimilarityMatrix::compute(&items)?;
            terminal::display_similarity(&items, &matrix, floor);
        }

        Commands::Stopwords { stopwords } => {
            let mut words: Vec<String> = stopword_set(&stopwords).into_iter().collect();
            words.sort();
            for word in words {
                println!("{word}");
            }
        }
    }

    Ok(())
}

fn load_items(path: &Path) -> Result<Vec<GeneSet>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let items: Vec<GeneSet> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing gene-set records from {}", path.display()))?;
    info!(count = items.len(), "gene sets loaded");
    Ok(items)
}
