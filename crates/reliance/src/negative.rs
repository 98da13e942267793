//! Negative reliance (restraint): `R1 -o R2`.
//!
//! `R1` restrains `R2` when an application of `R1` can map the existential
//! part of an earlier `R2` application onto other terms, so that the nulls
//! `R2` introduced were never needed.

use crate::pairing::{pairings, unify_pairing, Pairing};
use crate::{Unifier, SOURCE_SUFFIX, TARGET_SUFFIX};
use catalog::RuleCatalog;
use common::AnalysisConfig;
use evaluator::{entails_with, FreeVariables};
use model::{Instance, Literal, Rule, Term, Variable};
use tracing::{debug, trace};

/// Whether applying `r1` can make an earlier application of `r2` redundant.
///
/// Rules without existential variables can never be restrained.
#[must_use]
pub fn negatively_relies(r1: &Rule, r2: &Rule, config: &AnalysisConfig) -> bool {
    let source = RuleCatalog::from_rule(&r1.renamed(SOURCE_SUFFIX));
    let target = RuleCatalog::from_rule(&r2.renamed(TARGET_SUFFIX));
    negative_reliance(&source, &target, config)
}

pub(crate) fn negative_reliance(
    source: &RuleCatalog,
    target: &RuleCatalog,
    config: &AnalysisConfig,
) -> bool {
    if target.existentials().is_empty() {
        return false;
    }
    if config.predicate_prefilter && !source.head_overlaps_head_of(target) {
        trace!("prefilter: heads of {} and {} are disjoint", source.rule(), target.rule());
        return false;
    }

    let source_head = source.rule().head();
    let target_head = target.rule().head();
    let relies = pairings(source_head.len(), target_head.len()).any(|pairing| {
        if !touches_existential(target, &pairing) {
            return false;
        }
        let Some(unifier) = unify_pairing(source_head, target_head, &pairing) else {
            return false;
        };
        is_restraining_unifier(source, target, &pairing, &unifier)
            && (!config.applicability_filter || witnesses_restraint(source, target, &unifier))
    });

    debug!(
        "negative {} -o {}: {}",
        source.rule(),
        target.rule(),
        relies
    );
    relies
}

fn touches_existential(target: &RuleCatalog, pairing: &Pairing) -> bool {
    let head = target.rule().head();
    pairing
        .right
        .iter()
        .any(|&index| head[index].variables().any(|v| target.is_existential(v)))
}

fn is_restraining_unifier(
    source: &RuleCatalog,
    target: &RuleCatalog,
    pairing: &Pairing,
    unifier: &Unifier,
) -> bool {
    // Source nulls may only be identified with target nulls.
    let injective = source.existentials().iter().all(|existential| {
        let Some(class) = unifier.class(existential) else {
            return true;
        };
        class.rigid().is_none()
            && class
                .members()
                .iter()
                .all(|v| v == existential || target.is_existential(v))
    });
    if !injective {
        return false;
    }

    // The nulls of the restrained application must be covered as a whole.
    target
        .existentials()
        .iter()
        .filter(|v| {
            pairing
                .right
                .iter()
                .any(|&index| target.head_atoms_with(v).contains(&index))
        })
        .all(|v| {
            target
                .head_atoms_with(v)
                .iter()
                .all(|&index| pairing.covers_right(index))
        })
}

/// Replay both applications: `R2` fires first and introduces its nulls, then
/// `R1` fires over the same trigger terms.
fn witnesses_restraint(source: &RuleCatalog, target: &RuleCatalog, unifier: &Unifier) -> bool {
    let rank = |v: &Variable| {
        if v.is_universal() {
            0
        } else if source.is_existential(v) {
            1
        } else {
            2
        }
    };
    // Target existentials keep their identity: they are the nulls of the
    // earlier application.
    let mut sigma = unifier.substitution(rank);
    for existential in target.existentials() {
        sigma.bind(existential.clone(), Term::Variable(existential.clone()));
    }
    let image = |literals: &[Literal]| -> Vec<Literal> {
        literals.iter().map(|l| sigma.apply_to_literal(l)).collect()
    };

    let mut facts: Instance = image(source.rule().body()).into_iter().collect();
    facts.extend(image(target.rule().body()));

    let target_head = image(target.rule().head());
    let target_free = FreeVariables::Only(target.existentials().clone());
    if entails_with(&facts, &target_head, &target_free) {
        trace!("restrained rule would not fire under {}", unifier);
        return false;
    }

    facts.extend(target_head);
    let source_free = FreeVariables::Only(source.existentials().clone());
    !entails_with(&facts, &image(source.rule().head()), &source_free)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(n: &str) -> Term {
        Term::universal(n)
    }
    fn e(n: &str) -> Term {
        Term::existential(n)
    }
    fn lit(p: &str, args: Vec<Term>) -> Literal {
        Literal::new(p, args)
    }
    fn rule(head: Vec<Literal>, body: Vec<Literal>) -> Rule {
        Rule::new(body, head).unwrap()
    }

    fn restrains(r1: &Rule, r2: &Rule) -> bool {
        negatively_relies(r1, r2, &AnalysisConfig::default())
    }

    fn reflexive() -> Rule {
        // q(?X, ?X) :- p(?X) .
        rule(vec![lit("q", vec![u("X"), u("X")])], vec![lit("p", vec![u("X")])])
    }

    fn some_successor() -> Rule {
        // q(?X, !Y) :- p(?X) .
        rule(vec![lit("q", vec![u("X"), e("Y")])], vec![lit("p", vec![u("X")])])
    }

    #[test]
    fn datalog_rule_restrains_existential_rule() {
        assert!(restrains(&reflexive(), &some_successor()));
    }

    #[test]
    fn rules_without_existentials_are_never_restrained() {
        assert!(!restrains(&some_successor(), &reflexive()));
        assert!(!restrains(&reflexive(), &reflexive()));
    }

    #[test]
    fn rule_does_not_restrain_itself() {
        assert!(!restrains(&some_successor(), &some_successor()));
        let unfiltered = AnalysisConfig::default().with_applicability_filter(false);
        assert!(negatively_relies(&some_successor(), &some_successor(), &unfiltered));
    }

    #[test]
    fn disjoint_heads() {
        // r(?X, ?X) :- p(?X) .
        let other = rule(vec![lit("r", vec![u("X"), u("X")])], vec![lit("p", vec![u("X")])]);
        assert!(!restrains(&other, &some_successor()));
        let off = AnalysisConfig::default().with_predicate_prefilter(false);
        assert!(!negatively_relies(&other, &some_successor(), &off));
    }

    #[test]
    fn null_must_be_covered_by_the_whole_piece() {
        // q(?X, !Y), s(!Y) :- p(?X) . matching q alone leaves s(!Y) unexplained.
        let target = rule(
            vec![lit("q", vec![u("X"), e("Y")]), lit("s", vec![e("Y")])],
            vec![lit("p", vec![u("X")])],
        );
        assert!(!restrains(&reflexive(), &target));

        // q(?X, ?X), s(?X) :- p(?X) . covers both literals.
        let source = rule(
            vec![lit("q", vec![u("X"), u("X")]), lit("s", vec![u("X")])],
            vec![lit("p", vec![u("X")])],
        );
        assert!(restrains(&source, &target));
    }

    #[test]
    fn source_null_cannot_stand_for_a_universal() {
        // q(!Z, !Z) :- t(?W) .  against  q(?X, !Y) :- p(?X) .
        let source = rule(
            vec![lit("q", vec![e("Z"), e("Z")])],
            vec![lit("t", vec![u("W")])],
        );
        assert!(!restrains(&source, &some_successor()));
    }
}
