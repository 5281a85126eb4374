// Composition tests — the full pipeline from gene sets to labeled clusters.
//
// These exercise the data flow between stages:
//   Similarity -> Graph -> Prune -> Split -> Label
// with no filesystem or terminal side effects, plus the serialization
// contract the reporting side depends on.

use thicket::config::PipelineConfig;
use thicket::error::ThicketError;
use thicket::model::{Direction, ExclusionReason, GeneSet};
use thicket::pipeline::cluster::{run, RunArtifacts};

fn set(id: &str, members: Vec<String>) -> GeneSet {
    GeneSet {
        id: id.to_string(),
        members: members.into_iter().collect(),
        fdr: 0.01,
        direction: Direction::Up,
    }
}

fn block(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

// ============================================================
// Scenario: nothing overlaps — everything is a singleton
// ============================================================

#[test]
fn all_disjoint_sets_leave_an_empty_network() {
    let items: Vec<GeneSet> = [
        "GOBP_ALPHA_PROCESS",
        "KEGG_BETA_SIGNALING",
        "REACTOME_GAMMA_CASCADE",
        "WP_DELTA_NETWORK",
        "HALLMARK_EPSILON_STATE",
    ]
    .iter()
    .enumerate()
    .map(|(index, id)| set(id, block(&format!("m{index}"), 4)))
    .collect();

    let artifacts = run(&items, &PipelineConfig::default()).unwrap();

    assert_eq!(artifacts.summary.input_sets, 5);
    assert_eq!(artifacts.summary.retained_sets, 0);
    assert_eq!(artifacts.summary.cluster_count, 0);
    assert!(artifacts.clusters.is_empty());
    assert!(artifacts.labels.is_empty());

    assert_eq!(artifacts.excluded_isolated.len(), 5);
    for record in &artifacts.excluded_isolated {
        assert_eq!(record.reason, ExclusionReason::Isolated);
        assert_eq!(record.group, None);
    }
    assert!(artifacts.excluded_minor.is_empty());
    assert!(artifacts.excluded_remnants.is_empty());
}

// ============================================================
// Scenario: one connected pair — excluded as a doublet
// ============================================================

#[test]
fn connected_pair_is_excluded_as_minor_cluster() {
    // jaccard(A, B) = 2/4 = 0.5, no other connections
    let items = vec![
        set("KEGG_DNA_REPAIR", vec!["g1".into(), "g2".into(), "g3".into()]),
        set(
            "REACTOME_DNA_REPAIR",
            vec!["g2".into(), "g3".into(), "g4".into()],
        ),
    ];

    let artifacts = run(&items, &PipelineConfig::default()).unwrap();

    assert_eq!(artifacts.summary.retained_sets, 0);
    assert!(artifacts.clusters.is_empty());
    assert!(artifacts.excluded_isolated.is_empty(), "both have degree 1");

    assert_eq!(artifacts.excluded_minor.len(), 2);
    let group = artifacts.excluded_minor[0].group;
    assert!(group.is_some());
    for record in &artifacts.excluded_minor {
        assert_eq!(record.reason, ExclusionReason::MinorCluster);
        assert_eq!(record.group, group, "doublet halves report together");
    }
}

// ============================================================
// Scenario: two tight triangles with a weak bridge
// ============================================================

fn bridged_triangles() -> Vec<GeneSet> {
    let x_core = block("x", 8);
    let y_core = block("y", 8);
    let bridge = block("b", 6);

    let mut x1 = x_core.clone();
    x1.extend(block("x1u", 2));
    x1.extend(bridge.clone());
    let mut x2 = x_core.clone();
    x2.extend(block("x2u", 2));
    let mut x3 = x_core.clone();
    x3.extend(block("x3u", 2));

    let mut y1 = y_core.clone();
    y1.extend(block("y1u", 2));
    y1.extend(bridge);
    let mut y2 = y_core.clone();
    y2.extend(block("y2u", 2));
    let mut y3 = y_core;
    y3.extend(block("y3u", 2));

    vec![
        set("GOBP_DNA_REPAIR_NUCLEOTIDE_EXCISION", x1),
        set("KEGG_DNA_EXCISION_REPAIR", x2),
        set("REACTOME_DNA_REPAIR_PATHWAY", x3),
        set("HALLMARK_INTERFERON_ALPHA_RESPONSE", y1),
        set("REACTOME_INTERFERON_ALPHA_BETA", y2),
        set("WP_INTERFERON_GAMMA_CASCADE", y3),
    ]
}

#[test]
fn bridge_is_severed_and_both_triangles_are_labeled() {
    let artifacts = run(&bridged_triangles(), &PipelineConfig::default()).unwrap();

    assert_eq!(artifacts.summary.retained_sets, 6);
    assert_eq!(artifacts.clusters.len(), 2);
    assert!(artifacts.excluded_isolated.is_empty());
    assert!(artifacts.excluded_minor.is_empty());
    assert!(artifacts.excluded_remnants.is_empty());

    // both clusters kept in full, the bridge edge gone
    for cluster in &artifacts.clusters {
        assert_eq!(cluster.members.len(), 3);
        assert_eq!(cluster.edges.len(), 3);
    }

    // library tags and generic vocabulary are stopworded away; what
    // repeats is the real common vocabulary of each triangle
    assert_eq!(artifacts.labels.len(), 2);
    assert_eq!(artifacts.labels[0].cluster_id, 1);
    assert_eq!(
        artifacts.labels[0].terms,
        vec!["dna", "repair", "excision"]
    );
    assert_eq!(artifacts.labels[1].cluster_id, 2);
    assert_eq!(artifacts.labels[1].terms, vec!["interferon", "alpha"]);
}

// ============================================================
// Scenario: common vocabulary entirely stopworded — unlabeled cluster
// ============================================================

#[test]
fn fully_stopworded_cluster_is_explicitly_unlabeled() {
    // the three names form one triangle; "cell" is a built-in domain
    // stopword and "cycle" is configured away, leaving checkpoint /
    // arrest / g2m at one occurrence each — below the frequency bar
    let core = block("c", 8);
    let mut a = core.clone();
    a.extend(block("au", 2));
    let mut b = core.clone();
    b.extend(block("bu", 2));
    let mut c = core;
    c.extend(block("cu", 2));

    let items = vec![
        set("KEGG_CELL_CYCLE_CHECKPOINT", a),
        set("REACTOME_CELL_CYCLE_ARREST", b),
        set("BIOCARTA_CELL_CYCLE_G2M", c),
    ];

    let config = PipelineConfig {
        extra_stopwords: vec!["cycle".to_string()],
        ..Default::default()
    };
    let artifacts = run(&items, &config).unwrap();

    assert_eq!(artifacts.clusters.len(), 1);
    assert_eq!(artifacts.labels.len(), 1);
    assert!(artifacts.labels[0].is_unlabeled());
    assert_eq!(artifacts.labels[0].text(), None);

    // without the extra stopword, "cycle" repeats and labels the cluster
    let artifacts = run(&items, &PipelineConfig::default()).unwrap();
    assert_eq!(artifacts.labels[0].terms, vec!["cycle"]);
}

// ============================================================
// Configuration and input failures abort before computing
// ============================================================

#[test]
fn invalid_threshold_fails_fast() {
    let config = PipelineConfig {
        jaccard_threshold: 1.2,
        ..Default::default()
    };
    let result = run(&bridged_triangles(), &config);
    assert!(matches!(
        result,
        Err(ThicketError::InvalidThreshold { .. })
    ));
}

#[test]
fn empty_member_set_fails_fast() {
    let mut items = bridged_triangles();
    items.push(set("GOBP_EMPTY", Vec::new()));
    let result = run(&items, &PipelineConfig::default());
    assert!(matches!(result, Err(ThicketError::EmptyMemberSet { .. })));
}

// ============================================================
// Artifact serialization round trip
// ============================================================

#[test]
fn artifacts_survive_a_json_round_trip() {
    let artifacts = run(&bridged_triangles(), &PipelineConfig::default()).unwrap();
    let json = serde_json::to_string_pretty(&artifacts).unwrap();
    let parsed: RunArtifacts = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.summary.cluster_count, artifacts.summary.cluster_count);
    assert_eq!(parsed.clusters, artifacts.clusters);
    assert_eq!(parsed.labels, artifacts.labels);
    assert_eq!(parsed.excluded_isolated, artifacts.excluded_isolated);
}

// ============================================================
// Determinism across repeated runs
// ============================================================

#[test]
fn repeated_runs_produce_identical_structure() {
    let items = bridged_triangles();
    let config = PipelineConfig::default();
    let first = run(&items, &config).unwrap();
    for _ in 0..5 {
        let next = run(&items, &config).unwrap();
        assert_eq!(next.clusters, first.clusters);
        assert_eq!(next.labels, first.labels);
        assert_eq!(next.excluded_isolated, first.excluded_isolated);
        assert_eq!(next.excluded_minor, first.excluded_minor);
        assert_eq!(next.excluded_remnants, first.excluded_remnants);
    }
}
