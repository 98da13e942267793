//! Catalog of per-rule metadata for reliance analysis.
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::atom::{AtomArgumentSignature, AtomSignature};
use itertools::Itertools;
use model::{Rule, Variable};

mod populate;

/// Per-rule catalog with precomputed metadata.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    /// The original rule.
    rule: Rule,

    /// Signature fingerprints of the body literals, in source order.
    body_fingerprints: Vec<u64>,
    /// Signature fingerprints of the head literals, in source order.
    head_fingerprints: Vec<u64>,
    body_fingerprint_set: HashSet<u64>,
    head_fingerprint_set: HashSet<u64>,

    frontier: BTreeSet<Variable>,
    existentials: BTreeSet<Variable>,

    /// Every position at which a variable occurs, sorted.
    /// Example: for `q(?X, !Y) :- p(?X, ?X)` → `{ ?X: [b0.0, b0.1, h0.0], !Y: [h0.1] }`.
    variable_occurrences: HashMap<Variable, Vec<AtomArgumentSignature>>,
}

// Getters and basic accessors
impl RuleCatalog {
    /// The underlying rule.
    #[inline]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[inline]
    pub fn body_fingerprints(&self) -> &[u64] {
        &self.body_fingerprints
    }

    #[inline]
    pub fn head_fingerprints(&self) -> &[u64] {
        &self.head_fingerprints
    }

    #[inline]
    pub fn frontier(&self) -> &BTreeSet<Variable> {
        &self.frontier
    }

    #[inline]
    pub fn existentials(&self) -> &BTreeSet<Variable> {
        &self.existentials
    }

    #[inline]
    pub fn is_existential(&self, var: &Variable) -> bool {
        self.existentials.contains(var)
    }

    /// Positions of `var`; empty if the variable does not occur in the rule.
    pub fn occurrences(&self, var: &Variable) -> &[AtomArgumentSignature] {
        self.variable_occurrences
            .get(var)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Indices of the body literals mentioning `var`.
    pub fn body_atoms_with(&self, var: &Variable) -> BTreeSet<usize> {
        self.atoms_with(var, false)
    }

    /// Indices of the head literals mentioning `var`.
    pub fn head_atoms_with(&self, var: &Variable) -> BTreeSet<usize> {
        self.atoms_with(var, true)
    }

    fn atoms_with(&self, var: &Variable, in_head: bool) -> BTreeSet<usize> {
        self.occurrences(var)
            .iter()
            .map(AtomArgumentSignature::atom_signature)
            .filter(|a| a.in_head() == in_head)
            .map(AtomSignature::index)
            .collect()
    }

    /// Whether some head literal of `self` has the signature of a body
    /// literal of `other`. Without this, `self` cannot positively feed `other`.
    pub fn head_feeds_body_of(&self, other: &RuleCatalog) -> bool {
        !self.head_fingerprint_set.is_disjoint(&other.body_fingerprint_set)
    }

    /// Whether the heads of `self` and `other` share a signature.
    pub fn head_overlaps_head_of(&self, other: &RuleCatalog) -> bool {
        !self.head_fingerprint_set.is_disjoint(&other.head_fingerprint_set)
    }
}

// Construction
impl RuleCatalog {
    /// Build a catalog from a single rule.
    pub fn from_rule(rule: &Rule) -> Self {
        let mut catalog = Self {
            rule: rule.clone(),
            body_fingerprints: Vec::new(),
            head_fingerprints: Vec::new(),
            body_fingerprint_set: HashSet::new(),
            head_fingerprint_set: HashSet::new(),
            frontier: rule.frontier_variables(),
            existentials: rule.existential_variables(),
            variable_occurrences: HashMap::new(),
        };
        catalog.populate_all_metadata();
        catalog
    }
}

impl fmt::Display for RuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rule: {}", self.rule)?;
        writeln!(
            f,
            "  frontier:     [{}]",
            self.frontier.iter().map(ToString::to_string).join(", ")
        )?;
        writeln!(
            f,
            "  existentials: [{}]",
            self.existentials.iter().map(ToString::to_string).join(", ")
        )?;
        writeln!(f, "  occurrences:")?;
        for (var, positions) in self.variable_occurrences.iter().sorted_by_key(|(v, _)| *v) {
            writeln!(
                f,
                "    {}: [{}]",
                var,
                positions.iter().map(ToString::to_string).join(", ")
            )?;
        }
        Ok(())
    }
}
