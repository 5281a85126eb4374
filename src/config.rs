// Central pipeline configuration.
//
// Every tunable knob of the network pipeline lives here with its default.
// Validation runs before any computation starts: a bad threshold is a
// caller mistake and fails fast, it never produces a half-built graph.

use crate::error::ThicketError;

/// Configuration for a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Similarity edges require a Jaccard score strictly above this.
    /// Must be inside (0, 1).
    pub jaccard_threshold: f64,
    /// Connected components smaller than this are pruned away.
    pub min_cluster_size: usize,
    /// A token must appear at least this often across a cluster's member
    /// names to qualify as a label term.
    pub min_term_frequency: usize,
    /// Labels carry at most this many terms.
    pub max_label_terms: usize,
    /// Extra stopwords excluded from labels, on top of the built-in domain
    /// list and the generic English list.
    pub extra_stopwords: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            jaccard_threshold: 0.2,
            min_cluster_size: 3,
            min_term_frequency: 2,
            max_label_terms: 4,
            extra_stopwords: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Check every parameter range. Call this before computing anything.
    pub fn validate(&self) -> Result<(), ThicketError> {
        if !self.jaccard_threshold.is_finite()
            || self.jaccard_threshold <= 0.0
            || self.jaccard_threshold >= 1.0
        {
            return Err(ThicketError::InvalidThreshold {
                value: self.jaccard_threshold,
            });
        }
        if self.min_cluster_size < 2 {
            return Err(ThicketError::InvalidMinClusterSize {
                value: self.min_cluster_size,
            });
        }
        if self.min_term_frequency < 1 {
            return Err(ThicketError::InvalidTermFrequency);
        }
        if self.max_label_terms < 1 {
            return Err(ThicketError::InvalidLabelTerms);
        }
        Ok(())
    }
}
