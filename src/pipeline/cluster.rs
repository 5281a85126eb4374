// Full clustering pipeline: similarity -> graph -> prune -> split -> label.
//
// Strictly sequential; each stage consumes the previous stage's snapshot
// and produces the next. A failing stage aborts the whole run — there are
// no partial artifacts, and a rerun on the same input fails identically.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::ThicketError;
use crate::labeling::labeler::label_clusters;
use crate::labeling::stopwords::stopword_set;
use crate::model::{validate_items, Cluster, ClusterLabel, ExcludedSet, ExclusionReason, GeneSet};
use crate::network::build::build_network;
use crate::network::community::split_communities;
use crate::network::prune::{remove_minor_components, remove_singletons};
use crate::similarity::jaccard::SimilarityMatrix;

/// Headline numbers for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_sets: usize,
    pub retained_sets: usize,
    pub cluster_count: usize,
    pub jaccard_threshold: f64,
    pub min_cluster_size: usize,
    /// RFC 3339 timestamp of when the artifacts were produced.
    pub generated_at: String,
}

/// Everything the reporting side consumes, as plain structured data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunArtifacts {
    pub summary: RunSummary,
    /// Sets with no similarity edge above threshold.
    pub excluded_isolated: Vec<ExcludedSet>,
    /// Sets from pre-split components below the minimum size, grouped.
    pub excluded_minor: Vec<ExcludedSet>,
    /// Sets from post-split communities below the minimum size, grouped.
    pub excluded_remnants: Vec<ExcludedSet>,
    pub clusters: Vec<Cluster>,
    pub labels: Vec<ClusterLabel>,
}

/// Run the whole pipeline over a batch of gene sets.
pub fn run(items: &[GeneSet], config: &PipelineConfig) -> Result<RunArtifacts, ThicketError> {
    config.validate()?;
    validate_items(items)?;

    let matrix = SimilarityMatrix::compute(items)?;
    let network = build_network(items, &matrix, config.jaccard_threshold)?;

    let singletons = remove_singletons(&network);
    let minor = remove_minor_components(
        &singletons.network,
        config.min_cluster_size,
        ExclusionReason::MinorCluster,
    );
    let split = split_communities(&minor.network, config.min_cluster_size);

    let stopwords = stopword_set(&config.extra_stopwords);
    let labels = label_clusters(
        &split.clusters,
        &stopwords,
        config.min_term_frequency,
        config.max_label_terms,
    )?;

    info!(
        input = items.len(),
        retained = split.network.node_count(),
        clusters = split.clusters.len(),
        "pipeline finished"
    );

    Ok(RunArtifacts {
        summary: RunSummary {
            input_sets: items.len(),
            retained_sets: split.network.node_count(),
            cluster_count: split.clusters.len(),
            jaccard_threshold: config.jaccard_threshold,
            min_cluster_size: config.min_cluster_size,
            generated_at: Utc::now().to_rfc3339(),
        },
        excluded_isolated: singletons.excluded,
        excluded_minor: minor.excluded,
        excluded_remnants: split.excluded,
        clusters: split.clusters,
        labels,
    })
}
