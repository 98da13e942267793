//! Undirected reachability over arbitrary node types.

use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Symmetric adjacency sets. Self-loops are legal.
#[derive(Debug, Clone)]
pub struct ReachabilityGraph<N> {
    adjacency: HashMap<N, HashSet<N>>,
}

impl<N> Default for ReachabilityGraph<N> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }
}

impl<N: Eq + Hash + Clone> ReachabilityGraph<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` without any edge. No-op if it is already known.
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    pub fn add_edge(&mut self, u: N, v: N) {
        self.adjacency.entry(u.clone()).or_default().insert(v.clone());
        self.adjacency.entry(v).or_default().insert(u);
    }

    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    #[must_use]
    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Every node met as a neighbor while walking out of `start`.
    ///
    /// `start` itself is part of the result only when some walk leads back to
    /// it (a self-loop or a cycle). Unknown nodes reach nothing.
    #[must_use]
    pub fn reachable_nodes(&self, start: &N) -> HashSet<N> {
        let mut reached = HashSet::new();
        if !self.contains(start) {
            return reached;
        }

        let mut expanded: HashSet<&N> = HashSet::from([start]);
        let mut worklist: Vec<&N> = vec![start];
        while let Some(node) = worklist.pop() {
            for neighbor in self.adjacency.get(node).into_iter().flatten() {
                reached.insert(neighbor.clone());
                if expanded.insert(neighbor) {
                    worklist.push(neighbor);
                }
            }
        }
        reached
    }
}

impl<N: Eq + Hash + Clone + Ord> ReachabilityGraph<N> {
    /// Partition of all registered nodes. Each component is sorted and the
    /// components are ordered by their smallest node.
    #[must_use]
    pub fn connected_components(&self) -> Vec<Vec<N>> {
        let mut assigned: HashSet<&N> = HashSet::new();
        let mut components = Vec::new();

        for node in self.adjacency.keys().sorted() {
            if assigned.contains(node) {
                continue;
            }
            let mut component = self.reachable_nodes(node);
            component.insert(node.clone());
            for member in &component {
                if let Some((key, _)) = self.adjacency.get_key_value(member) {
                    assigned.insert(key);
                }
            }
            components.push(component.into_iter().sorted().collect());
        }
        components
    }
}

impl<N: fmt::Display + Ord> fmt::Display for ReachabilityGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, neighbors) in self.adjacency.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            writeln!(f, "{}: [{}]", node, neighbors.iter().sorted().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(u32, u32)]) -> ReachabilityGraph<u32> {
        let mut g = ReachabilityGraph::new();
        for &(u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    #[test]
    fn self_loop_reaches_itself() {
        let g = graph(&[(1, 1)]);
        assert_eq!(g.reachable_nodes(&1), HashSet::from([1]));
    }

    #[test]
    fn start_is_excluded_without_a_way_back() {
        let mut g = ReachabilityGraph::new();
        g.add_node(7);
        assert!(g.reachable_nodes(&7).is_empty());

        // An undirected edge always leads back.
        let g = graph(&[(1, 2)]);
        assert_eq!(g.reachable_nodes(&1), HashSet::from([1, 2]));
    }

    #[test]
    fn triangle() {
        let g = graph(&[(1, 2), (2, 3), (3, 1)]);
        for n in 1..=3 {
            assert_eq!(g.reachable_nodes(&n), HashSet::from([1, 2, 3]));
        }
    }

    #[test]
    fn disjoint_groups_stay_apart() {
        let g = graph(&[(1, 2), (2, 3), (10, 11)]);
        let left = g.reachable_nodes(&1);
        let right = g.reachable_nodes(&10);
        assert!(left.is_disjoint(&right));
        assert_eq!(right, HashSet::from([10, 11]));
    }

    #[test]
    fn unknown_node_reaches_nothing() {
        let g = graph(&[(1, 2)]);
        assert!(g.reachable_nodes(&5).is_empty());
        assert!(!g.contains(&5));
    }

    #[test]
    fn components_include_isolated_nodes() {
        let mut g = graph(&[(4, 2), (3, 3), (9, 8)]);
        g.add_node(1);
        g.add_node(2);
        assert_eq!(g.node_count(), 6);
        assert_eq!(
            g.connected_components(),
            vec![vec![1], vec![2, 4], vec![3], vec![8, 9]]
        );
    }

    #[test]
    fn works_for_string_nodes() {
        let mut g: ReachabilityGraph<String> = ReachabilityGraph::new();
        g.add_edge("a".to_string(), "b".to_string());
        g.add_node("c".to_string());
        assert_eq!(g.connected_components().len(), 2);
        assert_eq!(g.to_string(), "a: [b]\nb: [a]\nc: []\n");
    }
}
