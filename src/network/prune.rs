// Topological pruning — drop structure too thin to interpret.
//
// Two independent passes. Singleton removal must run before component
// sizing: an isolated node would otherwise count as a size-1 component and
// be conflated with a true doublet. Both passes are idempotent, and both
// return a fresh network snapshot plus the exclusion records reporting
// needs.

use petgraph::stable_graph::NodeIndex;
use tracing::info;

use crate::model::{ExcludedSet, ExclusionReason};
use crate::network::graph::SimilarityNetwork;

/// Result of one pruning pass: the surviving network and what was cut.
pub struct PrunePass {
    pub network: SimilarityNetwork,
    pub excluded: Vec<ExcludedSet>,
}

/// Remove every node with degree 0.
pub fn remove_singletons(network: &SimilarityNetwork) -> PrunePass {
    let doomed: Vec<NodeIndex> = network
        .nodes()
        .into_iter()
        .filter(|&node| network.degree(node) == 0)
        .collect();

    let excluded = doomed
        .iter()
        .map(|&node| ExcludedSet::from_node(network.record(node), ExclusionReason::Isolated, None))
        .collect();

    info!(removed = doomed.len(), "isolated sets pruned");
    PrunePass {
        network: network.without_nodes(&doomed),
        excluded,
    }
}

/// Remove every connected component smaller than `min_size`.
///
/// Members of one removed component share a synthetic group id so they can
/// be reported together. The reason code distinguishes the pre-split
/// doublet cut from the post-split remnant cut.
pub fn remove_minor_components(
    network: &SimilarityNetwork,
    min_size: usize,
    reason: ExclusionReason,
) -> PrunePass {
    let mut doomed = Vec::new();
    let mut excluded = Vec::new();
    let mut group = 0u32;

    for component in network.components() {
        if component.len() >= min_size {
            continue;
        }
        group += 1;
        for &node in &component {
            excluded.push(ExcludedSet::from_node(
                network.record(node),
                reason,
                Some(group),
            ));
            doomed.push(node);
        }
    }

    info!(
        removed = doomed.len(),
        groups = group,
        reason = reason.as_str(),
        "minor components pruned"
    );
    PrunePass {
        network: network.without_nodes(&doomed),
        excluded,
    }
}
