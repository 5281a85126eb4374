// Data models — the records that flow through the pipeline.
//
// These are explicit, fixed-attribute types: every node carries exactly the
// attributes documented here, and unknown input fields are rejected at
// deserialization. They're separate from the graph machinery so the
// reporting side can consume them without touching petgraph.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ThicketError;
use crate::labeling::labeler::tokenize_name;

/// Aggregate effect direction of a gene set's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(alias = "up", alias = "UP")]
    Up,
    #[serde(alias = "down", alias = "DOWN")]
    Down,
    #[serde(alias = "mixed", alias = "MIXED")]
    Mixed,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Mixed => "Mixed",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A significant gene set from upstream enrichment results.
///
/// Immutable after ingestion. The id doubles as the node name for cluster
/// labeling, so it must tokenize to something usable (see
/// [`validate_items`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneSet {
    pub id: String,
    /// Member identifiers. A BTreeSet keeps serialization deterministic.
    pub members: BTreeSet<String>,
    /// Significance (FDR) value from the upstream test.
    pub fdr: f64,
    pub direction: Direction,
}

impl GeneSet {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Validate a batch of gene sets before the pipeline touches them.
///
/// Fails on blank or duplicate ids, empty member sets, non-finite or
/// negative scores, and names that would break label tokenization later.
pub fn validate_items(items: &[GeneSet]) -> Result<(), ThicketError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for set in items {
        if set.id.trim().is_empty() {
            return Err(ThicketError::BlankSetId);
        }
        if !seen.insert(set.id.as_str()) {
            return Err(ThicketError::DuplicateSetId { id: set.id.clone() });
        }
        if set.members.is_empty() {
            return Err(ThicketError::EmptyMemberSet { id: set.id.clone() });
        }
        if !set.fdr.is_finite() || set.fdr < 0.0 {
            return Err(ThicketError::InvalidScore { id: set.id.clone() });
        }
        if tokenize_name(&set.id).is_empty() {
            return Err(ThicketError::UntokenizableName { id: set.id.clone() });
        }
    }
    Ok(())
}

/// Node attributes carried through the graph and into the final artifacts.
/// Copied from the [`GeneSet`] at graph construction and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub size: usize,
    pub direction: Direction,
    pub fdr: f64,
}

/// Why a gene set was removed from the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// No similarity edge above threshold to any other set.
    Isolated,
    /// Part of a connected component below the minimum cluster size.
    MinorCluster,
    /// Part of a post-split community below the minimum cluster size.
    SplitRemnant,
}

impl ExclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusionReason::Isolated => "isolated",
            ExclusionReason::MinorCluster => "minor cluster",
            ExclusionReason::SplitRemnant => "split remnant",
        }
    }
}

/// A gene set excluded during pruning, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedSet {
    pub id: String,
    pub size: usize,
    pub direction: Direction,
    pub fdr: f64,
    pub reason: ExclusionReason,
    /// Shared synthetic id linking sets excluded as one group (e.g. the two
    /// halves of a doublet), so they can be reported together.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,
}

impl ExcludedSet {
    pub(crate) fn from_node(node: &NodeRecord, reason: ExclusionReason, group: Option<u32>) -> Self {
        Self {
            id: node.id.clone(),
            size: node.size,
            direction: node.direction,
            fdr: node.fdr,
            reason,
            group,
        }
    }
}

/// An edge that survived into a final cluster. Endpoints are set ids,
/// ordered so source < target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEdge {
    pub source: String,
    pub target: String,
    /// Overlap count between the two member sets.
    pub weight: u32,
}

/// A final cluster: a connected component of the post-split network.
///
/// Ids are assigned by descending size (id 1 = largest) for deterministic
/// downstream ordering. Members are sorted by significance, then id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: u32,
    pub members: Vec<NodeRecord>,
    pub edges: Vec<ClusterEdge>,
}

/// The machine-derived label for one cluster.
///
/// An empty term list is a legitimate outcome (no token cleared the
/// frequency bar) — it is a distinct unlabeled state, not an error, and no
/// placeholder string is ever stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterLabel {
    pub cluster_id: u32,
    pub terms: Vec<String>,
}

impl ClusterLabel {
    pub fn is_unlabeled(&self) -> bool {
        self.terms.is_empty()
    }

    /// The display form, or None for an unlabeled cluster. Rendering of the
    /// unlabeled state is the consumer's decision.
    pub fn text(&self) -> Option<String> {
        if self.terms.is_empty() {
            None
        } else {
            Some(self.terms.join(" "))
        }
    }
}
