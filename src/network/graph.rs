// Domain wrapper around the weighted undirected similarity graph.
//
// Backed by a petgraph StableUnGraph so node indices stay valid across the
// removals the later stages perform. The graph only ever shrinks after
// construction; every "mutation" here is a snapshot method that clones and
// returns a new value, so no stage can observe another stage's working
// state.
//
// All orderings exposed from this type (node lists, neighbor lists, edge
// lists, components) are sorted by set id, never by hash or insertion
// order, so downstream tie-breaks are deterministic.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;

use crate::model::NodeRecord;

#[derive(Debug, Clone)]
pub struct SimilarityNetwork {
    graph: StableUnGraph<NodeRecord, u32>,
}

impl SimilarityNetwork {
    pub(crate) fn from_graph(graph: StableUnGraph<NodeRecord, u32>) -> Self {
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Attributes of a node in this snapshot.
    pub fn record(&self, node: NodeIndex) -> &NodeRecord {
        &self.graph[node]
    }

    pub fn degree(&self, node: NodeIndex) -> usize {
        self.graph.neighbors(node).count()
    }

    /// All node indices, ordered by set id.
    pub fn nodes(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        nodes.sort_by(|&a, &b| self.graph[a].id.cmp(&self.graph[b].id));
        nodes
    }

    pub fn node_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.graph.node_indices().find(|&n| self.graph[n].id == id)
    }

    /// Neighbors of a node, ordered by set id.
    pub fn neighbors_by_id(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        neighbors.sort_by(|&a, &b| self.graph[a].id.cmp(&self.graph[b].id));
        neighbors
    }

    /// Every edge once, endpoints ordered so the smaller set id comes
    /// first, the list sorted the same way.
    pub fn edges(&self) -> Vec<(NodeIndex, NodeIndex, u32)> {
        let mut edges: Vec<(NodeIndex, NodeIndex, u32)> = self
            .graph
            .edge_references()
            .map(|edge| {
                let (a, b) = (edge.source(), edge.target());
                if self.graph[a].id <= self.graph[b].id {
                    (a, b, *edge.weight())
                } else {
                    (b, a, *edge.weight())
                }
            })
            .collect();
        edges.sort_by(|x, y| {
            (self.graph[x.0].id.as_str(), self.graph[x.1].id.as_str())
                .cmp(&(self.graph[y.0].id.as_str(), self.graph[y.1].id.as_str()))
        });
        edges
    }

    pub fn edge_weight_between(&self, a: NodeIndex, b: NodeIndex) -> Option<u32> {
        self.graph.find_edge(a, b).map(|edge| self.graph[edge])
    }

    /// Connected components. Each component's members are sorted by set id,
    /// and components are ordered by their smallest member id.
    pub fn components(&self) -> Vec<Vec<NodeIndex>> {
        let mut seen: HashSet<NodeIndex> = HashSet::new();
        let mut components = Vec::new();

        for start in self.nodes() {
            if seen.contains(&start) {
                continue;
            }
            seen.insert(start);
            let mut queue = VecDeque::from([start]);
            let mut members = Vec::new();
            while let Some(node) = queue.pop_front() {
                members.push(node);
                for neighbor in self.neighbors_by_id(node) {
                    if seen.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
            members.sort_by(|&a, &b| self.graph[a].id.cmp(&self.graph[b].id));
            components.push(members);
        }

        components
    }

    /// Snapshot with the given nodes (and their incident edges) removed.
    pub fn without_nodes(&self, doomed: &[NodeIndex]) -> Self {
        let mut graph = self.graph.clone();
        for &node in doomed {
            let _ = graph.remove_node(node);
        }
        Self { graph }
    }

    /// Snapshot with the given edges removed. Node set is unchanged.
    pub fn without_edges(&self, doomed: &[(NodeIndex, NodeIndex)]) -> Self {
        let mut graph = self.graph.clone();
        for &(a, b) in doomed {
            if let Some(edge) = graph.find_edge(a, b) {
                let _ = graph.remove_edge(edge);
            }
        }
        Self { graph }
    }
}
