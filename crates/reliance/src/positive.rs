//! Positive reliance: `R1 -> R2`.

use crate::pairing::{pairings, unify_pairing, Pairing};
use crate::{Unifier, SOURCE_SUFFIX, TARGET_SUFFIX};
use catalog::RuleCatalog;
use common::AnalysisConfig;
use evaluator::{entails_with, FreeVariables};
use model::{Instance, Literal, Rule};
use tracing::{debug, trace};

/// Whether applying `r1` can trigger a new application of `r2`.
///
/// The rules are renamed apart first, so `r1` and `r2` may be the same rule.
#[must_use]
pub fn positively_relies(r1: &Rule, r2: &Rule, config: &AnalysisConfig) -> bool {
    let source = RuleCatalog::from_rule(&r1.renamed(SOURCE_SUFFIX));
    let target = RuleCatalog::from_rule(&r2.renamed(TARGET_SUFFIX));
    positive_reliance(&source, &target, config)
}

/// [`positively_relies`] over catalogs of rules that are already renamed
/// apart.
pub(crate) fn positive_reliance(
    source: &RuleCatalog,
    target: &RuleCatalog,
    config: &AnalysisConfig,
) -> bool {
    if config.predicate_prefilter && !source.head_feeds_body_of(target) {
        trace!("prefilter: no head of {} feeds {}", source.rule(), target.rule());
        return false;
    }

    let head = source.rule().head();
    let body = target.rule().body();
    let relies = pairings(head.len(), body.len()).any(|pairing| {
        let Some(unifier) = unify_pairing(head, body, &pairing) else {
            return false;
        };
        is_piece_unifier(source, target, &pairing, &unifier)
            && (!config.applicability_filter
                || witnesses_chase_step(source, target, &pairing, &unifier))
    });

    debug!(
        "positive {} -> {}: {}",
        source.rule(),
        target.rule(),
        relies
    );
    relies
}

/// Injectivity on the existentials of the source plus the piece condition on
/// the unmatched body literals of the target.
fn is_piece_unifier(
    source: &RuleCatalog,
    target: &RuleCatalog,
    pairing: &Pairing,
    unifier: &Unifier,
) -> bool {
    source.existentials().iter().all(|existential| {
        let Some(class) = unifier.class(existential) else {
            return true;
        };
        if class.rigid().is_some() {
            return false;
        }
        class
            .members()
            .iter()
            .filter(|v| *v != existential)
            .all(|v| {
                // A member from the source would merge two source terms into
                // one fresh null.
                source.occurrences(v).is_empty()
                    && target
                        .body_atoms_with(v)
                        .iter()
                        .all(|&index| pairing.covers_right(index))
            })
    })
}

/// Whether the unifier describes a chase step where the source fires and its
/// output completes a trigger for the target that was neither present before
/// nor already satisfied.
fn witnesses_chase_step(
    source: &RuleCatalog,
    target: &RuleCatalog,
    pairing: &Pairing,
    unifier: &Unifier,
) -> bool {
    // Existentials represent their classes so they stay free in the queries.
    let sigma = unifier.substitution(|v| u8::from(!v.is_existential()));
    let image = |literals: &[Literal]| -> Vec<Literal> {
        literals.iter().map(|l| sigma.apply_to_literal(l)).collect()
    };

    let body = target.rule().body();
    let mut before: Instance = image(source.rule().body()).into_iter().collect();
    before.extend(
        body.iter()
            .enumerate()
            .filter(|(index, _)| !pairing.covers_right(*index))
            .map(|(_, l)| sigma.apply_to_literal(l)),
    );

    let source_head = image(source.rule().head());
    let source_free = FreeVariables::Only(source.existentials().clone());
    if entails_with(&before, &source_head, &source_free) {
        trace!("source is already satisfied under {}", unifier);
        return false;
    }

    if pairing
        .right
        .iter()
        .all(|&index| before.contains(&sigma.apply_to_literal(&body[index])))
    {
        trace!("target trigger predates the source step under {}", unifier);
        return false;
    }

    let mut after = before;
    after.extend(source_head);
    let target_free = FreeVariables::Only(target.existentials().clone());
    !entails_with(&after, &image(target.rule().head()), &target_free)
}
