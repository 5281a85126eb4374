// Divisive community splitting, Girvan–Newman style.
//
// Per component: repeatedly remove the highest-betweenness edge from an
// owned local edge list, score the resulting partition with Newman
// modularity against the component's original edges, and keep the best
// partition seen. The loop runs the dendrogram all the way down, so the
// modularity maximum is found globally, and the stopping rule and
// tie-breaks are explicit here rather than inside a library call.
//
// Once partitions are fixed, every cross-community edge is physically
// removed from the working network, and the minimum-size filter runs again
// on the severed graph. Communities that come out of the detector too
// small to interpret are recorded as split remnants rather than silently
// dropped.

use std::collections::{HashMap, VecDeque};

use petgraph::stable_graph::NodeIndex;
use tracing::{debug, info};

use crate::model::{Cluster, ClusterEdge, ExcludedSet, ExclusionReason, NodeRecord};
use crate::network::betweenness::edge_betweenness;
use crate::network::graph::SimilarityNetwork;
use crate::network::prune::remove_minor_components;

/// Floating-point slack for modularity and betweenness comparisons. Ties
/// within this band keep the earlier candidate.
const SCORE_EPS: f64 = 1e-12;

/// Result of the splitting stage: the final disjoint cluster graph, the
/// sub-scale communities it shed, and the assembled cluster records.
pub struct SplitOutcome {
    pub network: SimilarityNetwork,
    pub excluded: Vec<ExcludedSet>,
    pub clusters: Vec<Cluster>,
}

/// Detect communities inside each component, sever the graph along
/// community boundaries, and re-apply the minimum-size filter.
pub fn split_communities(network: &SimilarityNetwork, min_cluster_size: usize) -> SplitOutcome {
    let mut cross_edges: Vec<(NodeIndex, NodeIndex)> = Vec::new();

    for component in network.components() {
        let communities = partition_component(network, &component);
        if communities.len() < 2 {
            continue;
        }
        let mut owner: HashMap<NodeIndex, usize> = HashMap::new();
        for (community, nodes) in communities.iter().enumerate() {
            for &node in nodes {
                owner.insert(node, community);
            }
        }
        for (a, b, _) in network.edges() {
            if let (Some(&ca), Some(&cb)) = (owner.get(&a), owner.get(&b)) {
                if ca != cb {
                    cross_edges.push((a, b));
                }
            }
        }
    }

    info!(cut = cross_edges.len(), "cross-community edges severed");
    let severed = network.without_edges(&cross_edges);
    let pass = remove_minor_components(&severed, min_cluster_size, ExclusionReason::SplitRemnant);
    let clusters = assemble_clusters(&pass.network);

    SplitOutcome {
        network: pass.network,
        excluded: pass.excluded,
        clusters,
    }
}

/// Partition one connected component into communities.
///
/// Returns one or more node groups; a component that never improves on the
/// single-community modularity of zero comes back whole — an acceptable
/// terminal state for an already-cohesive component.
fn partition_component(
    network: &SimilarityNetwork,
    component: &[NodeIndex],
) -> Vec<Vec<NodeIndex>> {
    if component.len() < 2 {
        return vec![component.to_vec()];
    }

    // Local view: component members arrive id-sorted, so local indices and
    // the (u, v) edge order both follow set-id order.
    let local: HashMap<NodeIndex, usize> = component
        .iter()
        .enumerate()
        .map(|(index, &node)| (node, index))
        .collect();
    let mut edges: Vec<(usize, usize)> = Vec::new();
    for (a, b, _) in network.edges() {
        if let (Some(&u), Some(&v)) = (local.get(&a), local.get(&b)) {
            edges.push((u.min(v), u.max(v)));
        }
    }
    edges.sort_unstable();

    if edges.is_empty() {
        return vec![component.to_vec()];
    }

    let n = component.len();
    let mut alive = vec![true; edges.len()];
    let mut best_membership: Vec<usize> = vec![0; n];
    let mut best_q = 0.0; // one community over everything scores exactly zero
    let mut removed = 0usize;

    loop {
        let adjacency = build_adjacency(n, &edges, &alive);
        let scores = edge_betweenness(&adjacency, edges.len());

        // Highest-betweenness living edge; ties keep the first in (u, v)
        // order, i.e. the lexicographically smallest id pair.
        let mut target: Option<usize> = None;
        for (edge, &live) in alive.iter().enumerate() {
            if !live {
                continue;
            }
            match target {
                None => target = Some(edge),
                Some(current) if scores[edge] > scores[current] + SCORE_EPS => {
                    target = Some(edge)
                }
                _ => {}
            }
        }
        let Some(target) = target else { break };

        alive[target] = false;
        removed += 1;

        let membership = local_components(n, &edges, &alive);
        let q = modularity(&edges, &membership);
        if q > best_q + SCORE_EPS {
            best_q = q;
            best_membership = membership;
        }
    }

    debug!(
        nodes = n,
        removed,
        modularity = best_q,
        "component partitioned"
    );

    let community_count = best_membership.iter().copied().max().unwrap_or(0) + 1;
    let mut communities: Vec<Vec<NodeIndex>> = vec![Vec::new(); community_count];
    for (index, &community) in best_membership.iter().enumerate() {
        communities[community].push(component[index]);
    }
    communities.retain(|community| !community.is_empty());
    communities
}

fn build_adjacency(n: usize, edges: &[(usize, usize)], alive: &[bool]) -> Vec<Vec<(usize, usize)>> {
    let mut adjacency = vec![Vec::new(); n];
    for (index, &(u, v)) in edges.iter().enumerate() {
        if !alive[index] {
            continue;
        }
        adjacency[u].push((v, index));
        adjacency[v].push((u, index));
    }
    adjacency
}

/// Component membership over the living edges, ids assigned in node order.
fn local_components(n: usize, edges: &[(usize, usize)], alive: &[bool]) -> Vec<usize> {
    let adjacency = build_adjacency(n, edges, alive);
    let mut membership = vec![usize::MAX; n];
    let mut next = 0usize;

    for start in 0..n {
        if membership[start] != usize::MAX {
            continue;
        }
        membership[start] = next;
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for &(w, _) in &adjacency[v] {
                if membership[w] == usize::MAX {
                    membership[w] = next;
                    queue.push_back(w);
                }
            }
        }
        next += 1;
    }

    membership
}

/// Newman modularity of a partition, scored against the full original edge
/// set of the component (removed edges still count toward degrees).
fn modularity(edges: &[(usize, usize)], membership: &[usize]) -> f64 {
    if edges.is_empty() {
        return 0.0;
    }
    let m = edges.len() as f64;
    let communities = membership.iter().copied().max().unwrap_or(0) + 1;
    let mut intra = vec![0.0f64; communities];
    let mut degree = vec![0.0f64; communities];

    for &(u, v) in edges {
        degree[membership[u]] += 1.0;
        degree[membership[v]] += 1.0;
        if membership[u] == membership[v] {
            intra[membership[u]] += 1.0;
        }
    }

    (0..communities)
        .map(|c| intra[c] / m - (degree[c] / (2.0 * m)).powi(2))
        .sum()
}

/// Number the final components by descending size (id 1 = largest, ties by
/// smallest member id) and collect their member and edge records.
fn assemble_clusters(network: &SimilarityNetwork) -> Vec<Cluster> {
    let mut components = network.components();
    components.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| network.record(a[0]).id.cmp(&network.record(b[0]).id))
    });

    let mut owner: HashMap<NodeIndex, usize> = HashMap::new();
    for (index, component) in components.iter().enumerate() {
        for &node in component {
            owner.insert(node, index);
        }
    }

    let mut clusters: Vec<Cluster> = components
        .iter()
        .enumerate()
        .map(|(index, component)| {
            let mut members: Vec<NodeRecord> = component
                .iter()
                .map(|&node| network.record(node).clone())
                .collect();
            members.sort_by(|a, b| {
                a.fdr
                    .partial_cmp(&b.fdr)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            });
            Cluster {
                id: (index + 1) as u32,
                members,
                edges: Vec::new(),
            }
        })
        .collect();

    for (a, b, weight) in network.edges() {
        if let Some(&index) = owner.get(&a) {
            clusters[index].edges.push(ClusterEdge {
                source: network.record(a).id.clone(),
                target: network.record(b).id.clone(),
                weight,
            });
        }
    }

    clusters
}
