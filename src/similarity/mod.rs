// Pairwise set similarity — overlap counts and Jaccard scores.

pub mod jaccard;
