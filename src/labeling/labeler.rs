// Frequency-based cluster labeling.
//
// A cluster's label is the common vocabulary of its member names: split
// each name into tokens, drop stopwords, count what remains across the
// whole cluster, and keep the handful of terms that repeat. Everything is
// a pure function of the current membership — same names in, same label
// out, with tie-breaks on first occurrence rather than map iteration
// order.

use std::collections::{HashMap, HashSet};

use crate::error::ThicketError;
use crate::model::{Cluster, ClusterLabel};

/// Tokens shorter than this after cleanup carry no label value.
const MIN_TOKEN_LEN: usize = 2;

/// Split a set name into cleaned label tokens.
///
/// Splits on any non-alphanumeric delimiter (underscore by convention),
/// lowercases, strips digits and punctuation, and drops what shrinks below
/// the minimum length. An empty result marks a name labeling can do
/// nothing with.
pub fn tokenize_name(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.chars()
                .filter(|c| c.is_ascii_alphabetic())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
        .collect()
}

/// Rank the label terms for one group of member names.
///
/// Terms must clear `min_freq` occurrences across all names; the top
/// `max_terms` survive, ordered by frequency with first-occurrence order
/// breaking ties. An empty result is the legitimate "no common
/// vocabulary" outcome, not an error.
pub fn label_terms(
    names: &[&str],
    stopwords: &HashSet<String>,
    min_freq: usize,
    max_terms: usize,
) -> Result<Vec<String>, ThicketError> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut position = 0usize;

    for name in names {
        let tokens = tokenize_name(name);
        if tokens.is_empty() {
            return Err(ThicketError::UntokenizableName {
                id: (*name).to_string(),
            });
        }
        for token in tokens {
            if stopwords.contains(&token) {
                continue;
            }
            *counts.entry(token.clone()).or_insert(0) += 1;
            first_seen.entry(token).or_insert(position);
            position += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_freq)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| first_seen[&a.0].cmp(&first_seen[&b.0])));

    Ok(ranked
        .into_iter()
        .take(max_terms)
        .map(|(term, _)| term)
        .collect())
}

/// Label every cluster. Labels come back in cluster order; an unlabeled
/// cluster carries an empty term list.
pub fn label_clusters(
    clusters: &[Cluster],
    stopwords: &HashSet<String>,
    min_freq: usize,
    max_terms: usize,
) -> Result<Vec<ClusterLabel>, ThicketError> {
    clusters
        .iter()
        .map(|cluster| {
            let names: Vec<&str> = cluster
                .members
                .iter()
                .map(|member| member.id.as_str())
                .collect();
            let terms = label_terms(&names, stopwords, min_freq, max_terms)?;
            Ok(ClusterLabel {
                cluster_id: cluster.id,
                terms,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_and_lowercases() {
        assert_eq!(
            tokenize_name("KEGG_CELL_CYCLE"),
            vec!["kegg", "cell", "cycle"]
        );
    }

    #[test]
    fn tokenize_strips_digits_inside_tokens() {
        // G2M loses its digit but keeps its letters
        assert_eq!(
            tokenize_name("BIOCARTA_G2M_ARREST"),
            vec!["biocarta", "gm", "arrest"]
        );
    }

    #[test]
    fn tokenize_drops_all_digit_and_short_tokens() {
        assert!(tokenize_name("12_34_5").is_empty());
        assert_eq!(tokenize_name("A_DNA_9"), vec!["dna"]);
    }

    #[test]
    fn untokenizable_member_name_is_an_error() {
        let stopwords = HashSet::new();
        let result = label_terms(&["___"], &stopwords, 2, 4);
        assert!(matches!(
            result,
            Err(ThicketError::UntokenizableName { .. })
        ));
    }

    #[test]
    fn terms_ranked_by_frequency_then_first_seen() {
        let stopwords = HashSet::new();
        let names = ["ALPHA_BETA_GAMMA", "BETA_GAMMA_DELTA", "GAMMA_BETA_ALPHA"];
        let terms = label_terms(&names, &stopwords, 2, 4).unwrap();
        // gamma and beta both appear 3x; alpha first-seen earliest of the 2x
        assert_eq!(terms, vec!["beta", "gamma", "alpha"]);
    }

    #[test]
    fn below_frequency_terms_never_label() {
        let stopwords = HashSet::new();
        let names = ["ONE_ALPHA", "TWO_BETA", "THREE_GAMMA"];
        let terms = label_terms(&names, &stopwords, 2, 4).unwrap();
        assert!(terms.is_empty());
    }

    #[test]
    fn max_terms_caps_the_label() {
        let stopwords = HashSet::new();
        let names = ["AA_BB_CC_DD_EE", "AA_BB_CC_DD_EE"];
        let terms = label_terms(&names, &stopwords, 2, 4).unwrap();
        assert_eq!(terms, vec!["aa", "bb", "cc", "dd"]);
    }

    #[test]
    fn labeling_is_deterministic() {
        let stopwords = HashSet::new();
        let names = ["DNA_REPAIR_EXCISION", "DNA_REPAIR_MISMATCH", "DNA_DAMAGE_REPAIR"];
        let first = label_terms(&names, &stopwords, 2, 4).unwrap();
        for _ in 0..10 {
            assert_eq!(label_terms(&names, &stopwords, 2, 4).unwrap(), first);
        }
    }
}
