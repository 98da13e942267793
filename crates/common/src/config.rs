//! Analysis options shared by the reliance computer and the stratifier.

use std::fmt;

/// Switches for the rule analysis pipeline.
///
/// None of these change *what* counts as reliance except
/// `applicability_filter`, which decides whether a piece-unifier alone is
/// enough or whether it must also witness a real chase step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnalysisConfig {
    /// Skip the subset search for pairs that share no literal signature.
    pub predicate_prefilter: bool,
    /// Require reliance unifiers to describe a step where both rules fire.
    pub applicability_filter: bool,
    /// Remove inapplicable (tautological) rules before computing reliances.
    pub drop_inapplicable_rules: bool,
    /// Analyze rule pairs on the rayon thread pool.
    pub parallel: bool,
    /// Compute negative reliance (restraint) edges as well.
    pub compute_negative: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            predicate_prefilter: true,
            applicability_filter: true,
            drop_inapplicable_rules: true,
            parallel: false,
            compute_negative: true,
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn with_predicate_prefilter(mut self, enabled: bool) -> Self {
        self.predicate_prefilter = enabled;
        self
    }

    #[must_use]
    pub fn with_applicability_filter(mut self, enabled: bool) -> Self {
        self.applicability_filter = enabled;
        self
    }

    #[must_use]
    pub fn with_drop_inapplicable_rules(mut self, enabled: bool) -> Self {
        self.drop_inapplicable_rules = enabled;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    #[must_use]
    pub fn with_compute_negative(mut self, enabled: bool) -> Self {
        self.compute_negative = enabled;
        self
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| if b { "on" } else { "off" };
        write!(
            f,
            "prefilter={}, applicability={}, drop-inapplicable={}, parallel={}, negative={}",
            flag(self.predicate_prefilter),
            flag(self.applicability_filter),
            flag(self.drop_inapplicable_rules),
            flag(self.parallel),
            flag(self.compute_negative)
        )
    }
}
