// Stopword lists for cluster labeling.
//
// Three layers: source-library tags and generic biology vocabulary (the
// domain list below), the generic English list from the stop-words crate,
// and whatever extras the caller configures. A term on any layer never
// appears in a label.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Source-library tags and biology terms too generic to label anything.
///
/// The tag entries cover the common set-collection prefixes (KEGG,
/// Reactome, GO namespaces, MSigDB hallmark sets); the rest are process
/// words that appear in half of all pathway names and would otherwise
/// dominate every label.
pub const DOMAIN_STOPWORDS: &[&str] = &[
    // collection tags
    "kegg",
    "reactome",
    "biocarta",
    "wikipathways",
    "wp",
    "pid",
    "hallmark",
    "gobp",
    "gocc",
    "gomf",
    "gsea",
    "msigdb",
    // direction suffixes
    "up",
    "dn",
    // generic biology / process vocabulary
    "pathway",
    "pathways",
    "signaling",
    "signalling",
    "cascade",
    "process",
    "processes",
    "regulation",
    "regulated",
    "positive",
    "negative",
    "cell",
    "cellular",
    "gene",
    "genes",
    "expression",
    "protein",
    "proteins",
    "complex",
    "activity",
    "response",
    "mediated",
    "dependent",
    "induced",
    "binding",
    "molecular",
    "biological",
    "function",
    "system",
    "via",
    "targets",
];

/// The effective stopword set: domain list ∪ generic English ∪ extras.
pub fn stopword_set(extra: &[String]) -> HashSet<String> {
    let mut words: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
    words.extend(DOMAIN_STOPWORDS.iter().map(|word| word.to_string()));
    words.extend(extra.iter().map(|word| word.to_lowercase()));
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_all_three_layers() {
        let words = stopword_set(&["cycle".to_string()]);
        assert!(words.contains("kegg"), "domain layer");
        assert!(words.contains("the"), "generic English layer");
        assert!(words.contains("cycle"), "configured extras");
    }

    #[test]
    fn extras_are_lowercased() {
        let words = stopword_set(&["CYCLE".to_string()]);
        assert!(words.contains("cycle"));
    }
}
