// Error taxonomy for the network pipeline.
//
// Two failure families: bad input data (surfaced to the caller rather than
// silently skipped, since it indicates an upstream problem) and bad
// configuration (rejected before any computation starts). An unlabeled
// cluster is NOT an error — it is an explicit empty-label state in the
// artifacts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThicketError {
    #[error("gene set id is blank")]
    BlankSetId,

    #[error("duplicate gene set id '{id}'")]
    DuplicateSetId { id: String },

    #[error("gene set '{id}' has no members")]
    EmptyMemberSet { id: String },

    #[error("gene set '{id}' has an invalid significance score (must be finite and non-negative)")]
    InvalidScore { id: String },

    #[error("similarity between '{a}' and '{b}' is undefined (both member sets empty)")]
    UndefinedSimilarity { a: String, b: String },

    #[error("gene set name '{id}' yields no usable label tokens")]
    UntokenizableName { id: String },

    #[error("jaccard threshold must be inside (0, 1), got {value}")]
    InvalidThreshold { value: f64 },

    #[error("minimum cluster size must be at least 2, got {value}")]
    InvalidMinClusterSize { value: usize },

    #[error("minimum label term frequency must be at least 1")]
    InvalidTermFrequency,

    #[error("maximum label terms must be at least 1")]
    InvalidLabelTerms,
}
