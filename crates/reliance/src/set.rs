//! Reliance edges between the rules of a rule set.

use crate::negative::negative_reliance;
use crate::positive::positive_reliance;
use crate::{SOURCE_SUFFIX, TARGET_SUFFIX};
use catalog::RuleCatalog;
use common::AnalysisConfig;
use itertools::Itertools;
use model::Rule;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fmt;
use tracing::info;

/// Polarity of a reliance edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelianceKind {
    Positive,
    Negative,
}

impl fmt::Display for RelianceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "+"),
            Self::Negative => write!(f, "-"),
        }
    }
}

/// `source` relies on `target` with the given polarity; both are positions
/// in the analyzed rule slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelianceEdge {
    pub source: usize,
    pub target: usize,
    pub kind: RelianceKind,
}

impl fmt::Display for RelianceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.kind {
            RelianceKind::Positive => "->",
            RelianceKind::Negative => "-o",
        };
        write!(f, "{} {} {}", self.source, arrow, self.target)
    }
}

/// All reliance edges of a rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelianceSet {
    rule_count: usize,
    edges: BTreeSet<RelianceEdge>,
}

impl RelianceSet {
    /// Number of rules the edges range over.
    #[must_use]
    #[inline]
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Every edge, ordered by source, target and polarity.
    pub fn edges(&self) -> impl Iterator<Item = &RelianceEdge> {
        self.edges.iter()
    }

    pub fn positive(&self) -> impl Iterator<Item = &RelianceEdge> {
        self.of_kind(RelianceKind::Positive)
    }

    pub fn negative(&self) -> impl Iterator<Item = &RelianceEdge> {
        self.of_kind(RelianceKind::Negative)
    }

    fn of_kind(&self, kind: RelianceKind) -> impl Iterator<Item = &RelianceEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    #[must_use]
    pub fn contains(&self, source: usize, target: usize, kind: RelianceKind) -> bool {
        self.edges.contains(&RelianceEdge {
            source,
            target,
            kind,
        })
    }

    /// Targets of the `kind` edges leaving `source`, ascending.
    #[must_use]
    pub fn successors(&self, source: usize, kind: RelianceKind) -> Vec<usize> {
        self.of_kind(kind)
            .filter(|e| e.source == source)
            .map(|e| e.target)
            .collect()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl fmt::Display for RelianceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nReliances:")?;
        writeln!(f, "{}", "-".repeat(45))?;
        for source in 0..self.rule_count {
            for kind in [RelianceKind::Positive, RelianceKind::Negative] {
                let targets = self.successors(source, kind);
                if !targets.is_empty() {
                    writeln!(f, "Rule {} {}: [{}]", source, kind, targets.iter().join(", "))?;
                }
            }
        }
        Ok(())
    }
}

/// Evaluate every ordered pair of `rules`, self-pairs included.
///
/// Each rule is renamed apart once per side up front; the pair analyses are
/// independent and run on the rayon pool when `config.parallel` is set. The
/// result does not depend on that choice.
#[must_use]
pub fn compute_reliances(rules: &[Rule], config: &AnalysisConfig) -> RelianceSet {
    let sources: Vec<RuleCatalog> = rules
        .iter()
        .map(|r| RuleCatalog::from_rule(&r.renamed(SOURCE_SUFFIX)))
        .collect();
    let targets: Vec<RuleCatalog> = rules
        .iter()
        .map(|r| RuleCatalog::from_rule(&r.renamed(TARGET_SUFFIX)))
        .collect();

    let pair_edges = |(i, j): (usize, usize)| {
        let positive = positive_reliance(&sources[i], &targets[j], config).then_some(RelianceEdge {
            source: i,
            target: j,
            kind: RelianceKind::Positive,
        });
        let negative = (config.compute_negative
            && negative_reliance(&sources[i], &targets[j], config))
        .then_some(RelianceEdge {
            source: i,
            target: j,
            kind: RelianceKind::Negative,
        });
        positive.into_iter().chain(negative)
    };

    let pairs: Vec<(usize, usize)> = (0..rules.len())
        .cartesian_product(0..rules.len())
        .collect();
    let edges: BTreeSet<RelianceEdge> = if config.parallel {
        pairs.into_par_iter().flat_map_iter(pair_edges).collect()
    } else {
        pairs.into_iter().flat_map(pair_edges).collect()
    };

    let set = RelianceSet {
        rule_count: rules.len(),
        edges,
    };
    info!(
        "Computed reliances over {} rules: {} positive, {} negative",
        set.rule_count,
        set.positive().count(),
        set.negative().count()
    );
    set
}
