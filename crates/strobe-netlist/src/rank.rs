//! Canonical evaluation order.
//!
//! Gates are ranked by Kahn's algorithm over the ordering edges, always
//! taking the lowest-index ready gate. When every remaining gate sits on a
//! cycle, the lowest-index remaining gate is promoted regardless of its
//! unresolved inputs. The result is a total order that depends only on the
//! gate order and the wiring, never on hashing or traversal accidents.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Result of ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    /// `rank[g]` is the position of gate `g` in `order`.
    pub rank: Vec<u32>,
    /// Gate indices in evaluation order.
    pub order: Vec<u32>,
    /// Number of gates promoted to break a cycle.
    pub promotions: usize,
}

/// Rank `gate_count` gates given ordering edges `(from, to)`.
///
/// Edge endpoints must be `< gate_count`.
pub fn rank_gates(gate_count: usize, edges: &[(u32, u32)]) -> Ranking {
    let mut in_degree = vec![0u32; gate_count];
    let mut succ: Vec<Vec<u32>> = vec![Vec::new(); gate_count];
    for &(from, to) in edges {
        in_degree[to as usize] += 1;
        succ[from as usize].push(to);
    }

    let mut ranked = vec![false; gate_count];
    let mut rank = vec![0u32; gate_count];
    let mut order = Vec::with_capacity(gate_count);
    let mut ready: BinaryHeap<Reverse<u32>> = (0..gate_count as u32)
        .filter(|&g| in_degree[g as usize] == 0)
        .map(Reverse)
        .collect();
    let mut next_unranked = 0usize;
    let mut promotions = 0;

    while order.len() < gate_count {
        let gate = match ready.pop() {
            Some(Reverse(g)) => g,
            None => {
                // Everything left is on or behind a cycle.
                while ranked[next_unranked] {
                    next_unranked += 1;
                }
                promotions += 1;
                next_unranked as u32
            }
        };
        if ranked[gate as usize] {
            continue;
        }
        ranked[gate as usize] = true;
        rank[gate as usize] = order.len() as u32;
        order.push(gate);
        for &s in &succ[gate as usize] {
            let d = &mut in_degree[s as usize];
            *d = d.saturating_sub(1);
            if *d == 0 && !ranked[s as usize] {
                ready.push(Reverse(s));
            }
        }
    }

    Ranking {
        rank,
        order,
        promotions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn chain_is_ranked_in_dependency_order() {
        // 2 -> 0 -> 1
        let r = rank_gates(3, &[(2, 0), (0, 1)]);
        assert_eq!(r.order, vec![2, 0, 1]);
        assert_eq!(r.rank, vec![1, 2, 0]);
        assert_eq!(r.promotions, 0);
    }

    #[test]
    fn ties_break_by_index() {
        let r = rank_gates(4, &[(3, 0)]);
        assert_eq!(r.order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn ring_promotes_lowest_index() {
        // 0 -> 1 -> 2 -> 0
        let r = rank_gates(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(r.order, vec![0, 1, 2]);
        assert_eq!(r.promotions, 1);
    }

    #[test]
    fn self_loop_is_ranked() {
        let r = rank_gates(2, &[(1, 1), (0, 1)]);
        assert_eq!(r.order, vec![0, 1]);
        assert_eq!(r.promotions, 1);
    }

    proptest! {
        #[test]
        fn order_is_a_permutation_respecting_acyclic_edges(
            n in 1usize..40,
            raw in prop::collection::vec((0u32..40, 0u32..40), 0..80),
        ) {
            // Forward-only edges form a DAG.
            let edges: Vec<(u32, u32)> = raw
                .into_iter()
                .map(|(a, b)| (a % n as u32, b % n as u32))
                .filter(|(a, b)| a < b)
                .collect();
            let r = rank_gates(n, &edges);
            let mut seen = r.order.clone();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..n as u32).collect::<Vec<_>>());
            prop_assert_eq!(r.promotions, 0);
            for (a, b) in edges {
                prop_assert!(r.rank[a as usize] < r.rank[b as usize]);
            }
        }
    }
}
