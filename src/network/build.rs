// Build the initial similarity network from a scored matrix.
//
// One node per gene set, one edge per pair whose Jaccard score clears the
// threshold. Edge weight is the raw overlap count, not the Jaccard score —
// the count is what reporting wants to show, and the splitting stage
// ignores weights anyway.

use petgraph::stable_graph::StableUnGraph;
use tracing::info;

use crate::error::ThicketError;
use crate::model::{GeneSet, NodeRecord};
use crate::network::graph::SimilarityNetwork;
use crate::similarity::jaccard::SimilarityMatrix;

/// Construct the thresholded similarity network.
///
/// Node attributes are copied from the gene-set records here and retained
/// through every later deletion. The threshold must be inside (0, 1).
pub fn build_network(
    items: &[GeneSet],
    matrix: &SimilarityMatrix,
    threshold: f64,
) -> Result<SimilarityNetwork, ThicketError> {
    if !threshold.is_finite() || threshold <= 0.0 || threshold >= 1.0 {
        return Err(ThicketError::InvalidThreshold { value: threshold });
    }

    let mut graph = StableUnGraph::with_capacity(items.len(), items.len());
    let indices: Vec<_> = items
        .iter()
        .map(|set| {
            graph.add_node(NodeRecord {
                id: set.id.clone(),
                size: set.size(),
                direction: set.direction,
                fdr: set.fdr,
            })
        })
        .collect();

    for (i, j, score) in matrix.pairs() {
        if score.jaccard > threshold {
            graph.add_edge(indices[i], indices[j], score.overlap as u32);
        }
    }

    let network = SimilarityNetwork::from_graph(graph);
    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        threshold,
        "similarity network built"
    );
    Ok(network)
}
