// Jaccard similarity between gene-set member lists.
//
// For every unordered pair (x, y) we count the shared members and score
//
//   jaccard = |x ∩ y| / (|x| + |y| − |x ∩ y|)
//
// This gives 0.0 for disjoint sets and 1.0 for identical ones. Only the
// upper triangle is stored; the accessor is symmetric by construction and
// the diagonal is never consulted.

use serde::{Deserialize, Serialize};

use crate::error::ThicketError;
use crate::model::GeneSet;

/// The similarity scores for one unordered pair of gene sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    /// Number of shared member identifiers.
    pub overlap: usize,
    /// Jaccard score in [0, 1].
    pub jaccard: f64,
}

/// Complete pairwise similarity matrix over a fixed item list.
///
/// Pure function of the input member sets; items are addressed by their
/// position in the input slice. Recomputed from scratch if inputs change,
/// never patched in place.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    item_count: usize,
    /// Upper triangle, row-major: (0,1), (0,2), ..., (1,2), ...
    scores: Vec<PairScore>,
}

impl SimilarityMatrix {
    /// Score every unordered pair of items.
    ///
    /// A pair of two empty member sets has no defined Jaccard score and is
    /// rejected. Ingestion validation discards empty sets earlier than
    /// this, but the guard stays: a NaN must never enter the matrix.
    pub fn compute(items: &[GeneSet]) -> Result<Self, ThicketError> {
        let n = items.len();
        let mut scores = Vec::with_capacity(n * n.saturating_sub(1) / 2);

        for i in 0..n {
            for j in (i + 1)..n {
                let overlap = items[i].members.intersection(&items[j].members).count();
                let union = items[i].size() + items[j].size() - overlap;
                if union == 0 {
                    return Err(ThicketError::UndefinedSimilarity {
                        a: items[i].id.clone(),
                        b: items[j].id.clone(),
                    });
                }
                scores.push(PairScore {
                    overlap,
                    jaccard: overlap as f64 / union as f64,
                });
            }
        }

        Ok(Self {
            item_count: n,
            scores,
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// The score for the pair (i, j), in either order. None for the
    /// diagonal or an out-of-range index.
    pub fn score(&self, i: usize, j: usize) -> Option<&PairScore> {
        if i == j || i >= self.item_count || j >= self.item_count {
            return None;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        Some(&self.scores[triangle_offset(self.item_count, lo, hi)])
    }

    /// Iterate every unordered pair once, in (i, j) order with i < j.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, &PairScore)> + '_ {
        let n = self.item_count;
        (0..n)
            .flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
            .zip(self.scores.iter())
            .map(|((i, j), score)| (i, j, score))
    }
}

/// Index of the pair (i, j) with i < j in a row-major upper triangle.
fn triangle_offset(n: usize, i: usize, j: usize) -> usize {
    i * (2 * n - i - 1) / 2 + (j - i - 1)
}
