//! Analysis pipeline and stratification for existential rule sets.

use crate::dependency_graph::DependencyGraph;
use crate::reachability::ReachabilityGraph;
use common::AnalysisConfig;
use evaluator::applicability_verdicts;
use itertools::Itertools;
use model::Rule;
use reliance::{compute_reliances, RelianceSet};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, info};

/// Analyze a rule set and stratify it into rule layers.
///
/// Rule IDs below refer to positions in [`Stratifier::rules`], the rules that
/// survived the applicability pre-pass. Each stratum is a set of rule IDs that
/// can be chased as a unit after all preceding strata have been computed. A
/// stratum is marked recursive when it corresponds to a strongly connected
/// component (SCC) of the positive reliance graph with more than one rule or
/// a single rule that relies on itself.
#[derive(Debug, Clone)]
pub struct Stratifier {
    config: AnalysisConfig,

    // Applicability verdict for every input rule, in input order.
    applicability: Vec<bool>,
    // Retained rules and the input position each one came from.
    rules: Vec<Rule>,
    origins: Vec<usize>,

    reliances: RelianceSet,
    dependency_graph: DependencyGraph,
    // Connected components of the undirected reliance graph (both polarities).
    components: Vec<Vec<usize>>,

    // rule IDs per stratum in evaluation order
    strata: Vec<Vec<usize>>,
    // true iff corresponding stratum is recursive
    is_recursive_stratum_bitmap: Vec<bool>,
}

impl Stratifier {
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Applicability verdict per input rule, parallel with the input slice.
    #[must_use]
    pub fn applicability(&self) -> &[bool] {
        &self.applicability
    }

    /// Input positions of the rules removed by the applicability pre-pass.
    #[must_use]
    pub fn dropped(&self) -> Vec<usize> {
        let kept: HashSet<usize> = self.origins.iter().copied().collect();
        (0..self.applicability.len())
            .filter(|i| !kept.contains(i))
            .collect()
    }

    /// The analyzed rules; rule IDs index into this slice.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Input position of rule `rule_id`.
    #[must_use]
    pub fn origin(&self, rule_id: usize) -> usize {
        self.origins[rule_id]
    }

    #[must_use]
    pub fn reliances(&self) -> &RelianceSet {
        &self.reliances
    }

    /// Underlying dependency graph (rule -> rules it positively relies on).
    #[must_use]
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.dependency_graph
    }

    /// Connected components over all reliance edges, isolated rules included.
    #[must_use]
    pub fn components(&self) -> &[Vec<usize>] {
        &self.components
    }

    /// Rule IDs per stratum, in evaluation order.
    #[must_use]
    pub fn strata(&self) -> &[Vec<usize>] {
        &self.strata
    }

    /// Return strata as rule references instead of IDs.
    #[must_use]
    pub fn stratum_rules(&self) -> Vec<Vec<&Rule>> {
        self.strata
            .iter()
            .map(|s| s.iter().map(|&rid| &self.rules[rid]).collect())
            .collect()
    }

    /// Bitmap indicating which strata are recursive (parallel with `strata`).
    #[must_use]
    pub fn is_recursive_stratum_bitmap(&self) -> &[bool] {
        &self.is_recursive_stratum_bitmap
    }

    /// Whether the given stratum (by index) is recursive.
    #[must_use]
    pub fn is_recursive_stratum(&self, idx: usize) -> bool {
        self.is_recursive_stratum_bitmap[idx]
    }

    /// Run the whole analysis.
    ///
    /// Algorithm outline:
    /// 1. Decide applicability of every rule; drop the inapplicable ones if
    ///    configured to.
    /// 2. Compute positive and negative reliances between the retained rules.
    /// 3. Connected components of the undirected reliance graph.
    /// 4. Kosaraju over the positive dependency graph to obtain SCCs and mark
    ///    recursive ones (size > 1 or self loop).
    /// 5. Iteratively merge all currently dependency-free non-recursive SCCs
    ///    into a single wider stratum to reduce chase passes.
    #[must_use]
    pub fn from_rules(rules: &[Rule], config: &AnalysisConfig) -> Self {
        let applicability = applicability_verdicts(rules);
        let origins: Vec<usize> = (0..rules.len())
            .filter(|&i| {
                let keep = applicability[i] || !config.drop_inapplicable_rules;
                if !keep {
                    debug!("Dropping inapplicable rule {}: {}", i, rules[i]);
                }
                keep
            })
            .collect();
        let retained: Vec<Rule> = origins.iter().map(|&i| rules[i].clone()).collect();
        info!(
            "Applicability: {} of {} rules applicable, {} analyzed",
            applicability.iter().filter(|&&a| a).count(),
            rules.len(),
            retained.len()
        );

        let reliances = compute_reliances(&retained, config);

        let mut graph = ReachabilityGraph::new();
        for rule_id in 0..retained.len() {
            graph.add_node(rule_id);
        }
        for edge in reliances.edges() {
            graph.add_edge(edge.source, edge.target);
        }
        let components = graph.connected_components();

        let dependency_graph = DependencyGraph::from_reliances(&reliances);
        let (strata, is_recursive_stratum_bitmap) = Self::stratify(&dependency_graph);
        info!(
            "Stratified {} rules into {} strata ({} components)",
            retained.len(),
            strata.len(),
            components.len()
        );

        Self {
            config: *config,
            applicability,
            rules: retained,
            origins,
            reliances,
            dependency_graph,
            components,
            strata,
            is_recursive_stratum_bitmap,
        }
    }

    fn stratify(dependency_graph: &DependencyGraph) -> (Vec<Vec<usize>>, Vec<bool>) {
        let dep_map = dependency_graph.dependency_map();
        let rule_count = dependency_graph.rule_count();

        // Kosaraju step 1: order by finish time.
        let mut order = Vec::with_capacity(rule_count);
        let mut visited = vec![false; rule_count];
        for rule_id in 0..rule_count {
            Self::dfs_order(dep_map, &mut visited, &mut order, rule_id);
        }
        order.reverse();

        // Kosaraju step 2: assign SCCs on the transposed graph in reverse
        // finish order.
        let transpose = dependency_graph.dependents();
        let mut assigned = vec![false; rule_count];
        let mut pending: Vec<(Vec<usize>, bool)> = Vec::new();
        for node in order {
            if !assigned[node] {
                let mut scc = Vec::new();
                Self::dfs_assign(&transpose, &mut assigned, &mut scc, node);
                scc.sort_unstable();
                let is_recursive = scc.len() > 1 || dep_map[scc[0]].contains(&scc[0]);
                pending.push((scc, is_recursive));
            }
        }

        // Merge phase: repeatedly take all remaining SCCs with no external
        // dependencies. Merge the non-recursive ones together; keep recursive
        // ones separate to preserve fixpoint boundaries.
        let mut strata: Vec<Vec<usize>> = Vec::new();
        let mut bitmap: Vec<bool> = Vec::new();
        while !pending.is_empty() {
            let remaining: BTreeSet<usize> = pending
                .iter()
                .flat_map(|(s, _)| s.iter().copied())
                .collect();

            let (ready, still): (Vec<_>, Vec<_>) = pending.into_iter().partition(|(s, _)| {
                !s.iter().any(|rid| {
                    dep_map[*rid]
                        .iter()
                        .any(|d| remaining.contains(d) && !s.contains(d))
                })
            });
            pending = still;

            let (recursive, flat): (Vec<_>, Vec<_>) =
                ready.into_iter().partition(|(_, is_rec)| *is_rec);
            let batch: Vec<usize> = flat.into_iter().flat_map(|(s, _)| s).sorted().collect();
            if !batch.is_empty() {
                strata.push(batch);
                bitmap.push(false);
            }
            for (s, _) in recursive.into_iter().sorted() {
                strata.push(s);
                bitmap.push(true);
            }
        }
        (strata, bitmap)
    }

    /// DFS used in the first pass of Kosaraju to record finishing order.
    fn dfs_order(
        dep_map: &[BTreeSet<usize>],
        visited: &mut [bool],
        order: &mut Vec<usize>,
        node: usize,
    ) {
        if visited[node] {
            return;
        }
        visited[node] = true;
        for &c in &dep_map[node] {
            Self::dfs_order(dep_map, visited, order, c);
        }
        order.push(node);
    }

    /// DFS on the transposed graph to collect one SCC.
    fn dfs_assign(
        transpose: &[BTreeSet<usize>],
        assigned: &mut [bool],
        scc: &mut Vec<usize>,
        node: usize,
    ) {
        if assigned[node] {
            return;
        }
        assigned[node] = true;
        scc.push(node);
        for &p in &transpose[node] {
            Self::dfs_assign(transpose, assigned, scc, p);
        }
    }
}

impl fmt::Display for Stratifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nConfiguration: {}", self.config)?;
        let dropped = self.dropped();
        if !dropped.is_empty() {
            writeln!(f, "Dropped inapplicable input rules: [{}]", dropped.iter().join(", "))?;
        }

        write!(f, "{}", self.reliances)?;

        writeln!(f, "\nComponents:")?;
        writeln!(f, "{}", "-".repeat(45))?;
        for (idx, component) in self.components.iter().enumerate() {
            writeln!(f, "#{} [{}]", idx + 1, component.iter().join(", "))?;
        }

        writeln!(f, "\nStratum:")?;
        writeln!(f, "{}", "-".repeat(45))?;
        for (idx, stratum) in self.strata.iter().enumerate() {
            let recursive = self.is_recursive_stratum(idx);
            writeln!(
                f,
                "#{} [{}] [{}]",
                idx + 1,
                if recursive {
                    "recursive"
                } else {
                    "non-recursive"
                },
                stratum.iter().join(", ")
            )?;
            for rid in stratum {
                writeln!(f, "  {}", self.rules[*rid])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
