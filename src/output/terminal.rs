// Colored terminal output for cluster reports and similarity tables.
//
// This module handles all terminal-specific formatting: colors, tables,
// summaries. The JSON artifacts stay plain; presentation decisions (like
// how to render an unlabeled cluster) live here and nowhere else.

use std::collections::HashSet;

use colored::{ColoredString, Colorize};

use crate::model::{Direction, ExcludedSet, GeneSet};
use crate::pipeline::cluster::RunArtifacts;
use crate::similarity::jaccard::SimilarityMatrix;

/// Display a full pipeline run: clusters with labels, then exclusions.
pub fn display_run(artifacts: &RunArtifacts) {
    let summary = &artifacts.summary;
    println!(
        "\n{}",
        format!(
            "=== Similarity network ({} sets in, {} retained, {} clusters) ===",
            summary.input_sets, summary.retained_sets, summary.cluster_count
        )
        .bold()
    );
    println!();

    if artifacts.clusters.is_empty() {
        println!("  No clusters survived pruning. Try lowering the Jaccard threshold.");
    }

    for cluster in &artifacts.clusters {
        let label = artifacts
            .labels
            .iter()
            .find(|label| label.cluster_id == cluster.id)
            .and_then(|label| label.text());
        let heading = format!(
            "Cluster {} ({} sets, {} edges)",
            cluster.id,
            cluster.members.len(),
            cluster.edges.len()
        );
        match label {
            Some(text) => println!("  {}  {}", heading.bold(), text.bright_green()),
            None => println!("  {}  {}", heading.bold(), "unlabeled".dimmed()),
        }

        println!(
            "    {:<44} {:>9}  {:>5}  {}",
            "Set".dimmed(),
            "FDR".dimmed(),
            "Size".dimmed(),
            "Dir".dimmed(),
        );
        for member in &cluster.members {
            println!(
                "    {:<44} {:>9.2e}  {:>5}  {}",
                member.id,
                member.fdr,
                member.size,
                colorize_direction(member.direction),
            );
        }
        println!();
    }

    display_exclusions(artifacts);
}

fn display_exclusions(artifacts: &RunArtifacts) {
    if !artifacts.excluded_isolated.is_empty() {
        println!(
            "  {} {} isolated sets excluded",
            "!".yellow(),
            artifacts.excluded_isolated.len()
        );
    }
    if !artifacts.excluded_minor.is_empty() {
        println!(
            "  {} {} sets in {} minor clusters excluded",
            "~".yellow(),
            artifacts.excluded_minor.len(),
            group_count(&artifacts.excluded_minor)
        );
    }
    if !artifacts.excluded_remnants.is_empty() {
        println!(
            "  {} {} sets in {} split remnants excluded",
            "-".dimmed(),
            artifacts.excluded_remnants.len(),
            group_count(&artifacts.excluded_remnants)
        );
    }
}

fn group_count(excluded: &[ExcludedSet]) -> usize {
    excluded
        .iter()
        .filter_map(|set| set.group)
        .collect::<HashSet<u32>>()
        .len()
}

/// Display the pairwise similarity table for threshold tuning. Pairs below
/// the floor are hidden.
pub fn display_similarity(items: &[GeneSet], matrix: &SimilarityMatrix, floor: f64) {
    let mut pairs: Vec<(usize, usize, f64, usize)> = matrix
        .pairs()
        .filter(|(_, _, score)| score.jaccard >= floor)
        .map(|(i, j, score)| (i, j, score.jaccard, score.overlap))
        .collect();
    pairs.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    println!(
        "\n{}",
        format!("=== Pairwise similarity ({} pairs >= {floor}) ===", pairs.len()).bold()
    );
    println!();
    println!(
        "  {:<44} {:<44} {:>8}  {:>7}",
        "Set".dimmed(),
        "Set".dimmed(),
        "Jaccard".dimmed(),
        "Overlap".dimmed(),
    );
    for (i, j, jaccard, overlap) in pairs {
        println!(
            "  {:<44} {:<44} {:>8.3}  {:>7}",
            items[i].id, items[j].id, jaccard, overlap,
        );
    }
}

fn colorize_direction(direction: Direction) -> ColoredString {
    match direction {
        Direction::Up => "Up".red(),
        Direction::Down => "Down".blue(),
        Direction::Mixed => "Mixed".yellow(),
    }
}
