//! Dependency graph derived from positive reliance.

use itertools::Itertools;
use reliance::RelianceSet;
use std::collections::BTreeSet;
use std::fmt;

/// Represents the dependency relationships between rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    /// Rule ID to the rules it positively relies on, i.e. the rules whose
    /// application can trigger it.
    dependency_map: Vec<BTreeSet<usize>>,
}

impl DependencyGraph {
    /// Per rule ID, the IDs of the rules it depends on.
    #[must_use]
    pub fn dependency_map(&self) -> &[BTreeSet<usize>] {
        &self.dependency_map
    }

    #[must_use]
    pub fn dependencies(&self, rule_id: usize) -> &BTreeSet<usize> {
        &self.dependency_map[rule_id]
    }

    #[must_use]
    #[inline]
    pub fn rule_count(&self) -> usize {
        self.dependency_map.len()
    }

    /// A positive edge `source -> target` makes `target` depend on `source`.
    /// Negative edges never order rules.
    #[must_use]
    pub fn from_reliances(reliances: &RelianceSet) -> Self {
        let mut dependency_map = vec![BTreeSet::new(); reliances.rule_count()];
        for edge in reliances.positive() {
            dependency_map[edge.target].insert(edge.source);
        }
        Self { dependency_map }
    }

    /// Rules that depend on each rule; the transpose of the dependency map.
    #[must_use]
    pub(crate) fn dependents(&self) -> Vec<BTreeSet<usize>> {
        let mut out = vec![BTreeSet::new(); self.dependency_map.len()];
        for (rule_id, deps) in self.dependency_map.iter().enumerate() {
            for &dep in deps {
                out[dep].insert(rule_id);
            }
        }
        out
    }
}

impl fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nDependency Graph:")?;
        writeln!(f, "{}", "-".repeat(45))?;

        for (rule_id, deps) in self.dependency_map.iter().enumerate() {
            writeln!(f, "Rule {}: [{}]", rule_id, deps.iter().join(", "))?;
        }
        Ok(())
    }
}
