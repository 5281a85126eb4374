// Unweighted edge betweenness via Brandes' accumulation.
//
// For every source node, one BFS computes shortest-path counts (sigma),
// then a reverse sweep over the BFS stack pushes pair dependencies back
// down the predecessor edges. Summing over all sources counts every
// unordered pair from both endpoints, so the totals are halved at the end.
//
// The splitting stage treats the graph as unweighted: betweenness here is
// about how bridge-like an edge is, not how heavy.

use std::collections::VecDeque;

/// Betweenness score per edge.
///
/// `adjacency[v]` lists `(neighbor, edge index)` pairs; `edge_count` sizes
/// the output. Edges absent from the adjacency (already removed) score 0.
pub fn edge_betweenness(adjacency: &[Vec<(usize, usize)>], edge_count: usize) -> Vec<f64> {
    let n = adjacency.len();
    let mut scores = vec![0.0f64; edge_count];

    for source in 0..n {
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist = vec![-1i64; n];

        sigma[source] = 1.0;
        dist[source] = 0;
        let mut queue = VecDeque::from([source]);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &(w, edge) in &adjacency[v] {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push((v, edge));
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &(v, edge) in &predecessors[w] {
                let credit = sigma[v] / sigma[w] * (1.0 + delta[w]);
                scores[edge] += credit;
                delta[v] += credit;
            }
        }
    }

    for score in scores.iter_mut() {
        *score /= 2.0;
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<(usize, usize)>> {
        let mut adjacency = vec![Vec::new(); n];
        for (index, &(u, v)) in edges.iter().enumerate() {
            adjacency[u].push((v, index));
            adjacency[v].push((u, index));
        }
        adjacency
    }

    #[test]
    fn path_graph_edges_carry_equal_load() {
        // 0 - 1 - 2: each edge lies on two of the three pairs
        let edges = [(0, 1), (1, 2)];
        let scores = edge_betweenness(&adjacency(3, &edges), edges.len());
        assert!((scores[0] - 2.0).abs() < 1e-9);
        assert!((scores[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn triangle_edges_carry_only_their_own_pair() {
        let edges = [(0, 1), (1, 2), (0, 2)];
        let scores = edge_betweenness(&adjacency(3, &edges), edges.len());
        for score in scores {
            assert!((score - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn star_spokes_carry_their_leaf_pairs() {
        // center 0, leaves 1..=3: each spoke carries its own pair plus the
        // two leaf-to-leaf pairs through it
        let edges = [(0, 1), (0, 2), (0, 3)];
        let scores = edge_betweenness(&adjacency(4, &edges), edges.len());
        for score in scores {
            assert!((score - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bridge_between_triangles_dominates() {
        // triangles 0-1-2 and 3-4-5 joined by 2-3
        let edges = [
            (0, 1),
            (1, 2),
            (0, 2),
            (3, 4),
            (4, 5),
            (3, 5),
            (2, 3),
        ];
        let scores = edge_betweenness(&adjacency(6, &edges), edges.len());
        let bridge = scores[6];
        assert!((bridge - 9.0).abs() < 1e-9, "bridge carries all 9 cross pairs, got {bridge}");
        for (index, score) in scores.iter().enumerate().take(6) {
            assert!(
                *score < bridge,
                "intra-triangle edge {index} should score below the bridge"
            );
        }
    }

    #[test]
    fn split_shortest_paths_share_credit() {
        // square 0-1-2-3-0: the two pairs of opposite corners each have two
        // shortest paths, so each edge gets 1 (its own pair) + 0.5 + 0.5
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
        let scores = edge_betweenness(&adjacency(4, &edges), edges.len());
        for score in scores {
            assert!((score - 2.0).abs() < 1e-9, "expected 2.0, got {score}");
        }
    }
}
