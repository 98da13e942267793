//! Tautology detection for single rules.

use crate::{entails_with, FreeVariables};
use model::{Instance, Rule};
use tracing::debug;

/// Whether firing `rule` can ever add information.
///
/// The body is frozen into an instance (each body variable stands for
/// itself). The rule is inapplicable iff that instance already entails the
/// head when only the existential variables may be substituted; frontier
/// variables are pinned because they are the very same terms as their body
/// occurrences.
#[must_use]
pub fn is_applicable(rule: &Rule) -> bool {
    let frozen = Instance::from_body(rule);
    let free = FreeVariables::Only(rule.existential_variables());
    let applicable = !entails_with(&frozen, rule.head(), &free);
    if !applicable {
        debug!("Rule is never applicable: {}", rule);
    }
    applicable
}

/// Applicability verdict per rule, parallel with `rules`.
#[must_use]
pub fn applicability_verdicts(rules: &[Rule]) -> Vec<bool> {
    rules.iter().map(is_applicable).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{Literal, Term};

    fn c(v: &str) -> Term {
        Term::constant(v)
    }
    fn u(n: &str) -> Term {
        Term::universal(n)
    }
    fn e(n: &str) -> Term {
        Term::existential(n)
    }
    fn rule(head: Vec<Literal>, body: Vec<Literal>) -> Rule {
        Rule::new(body, head).unwrap()
    }
    fn lit(p: &str, args: Vec<Term>) -> Literal {
        Literal::new(p, args)
    }

    #[test]
    fn existential_head_over_other_predicate() {
        // q(!Y) :- p(?X) .
        assert!(is_applicable(&rule(
            vec![lit("q", vec![e("Y")])],
            vec![lit("p", vec![u("X")])]
        )));
    }

    #[test]
    fn ground_tautology() {
        // q(c) :- q(c) .
        assert!(!is_applicable(&rule(
            vec![lit("q", vec![c("c")])],
            vec![lit("q", vec![c("c")])]
        )));
    }

    #[test]
    fn existential_satisfied_by_constant() {
        // q(!Y) :- q(c) .
        assert!(!is_applicable(&rule(
            vec![lit("q", vec![e("Y")])],
            vec![lit("q", vec![c("c")])]
        )));
    }

    #[test]
    fn constant_head_over_variable_body() {
        // q(c) :- q(?X) .
        assert!(is_applicable(&rule(
            vec![lit("q", vec![c("c")])],
            vec![lit("q", vec![u("X")])]
        )));
    }

    #[test]
    fn existential_satisfied_by_body_variable() {
        // q(!Y) :- q(?X) .
        assert!(!is_applicable(&rule(
            vec![lit("q", vec![e("Y")])],
            vec![lit("q", vec![u("X")])]
        )));
    }

    #[test]
    fn frontier_copy() {
        // q(?X) :- q(?X) .
        assert!(!is_applicable(&rule(
            vec![lit("q", vec![u("X")])],
            vec![lit("q", vec![u("X")])]
        )));
    }

    #[test]
    fn frontier_is_pinned() {
        // q(?X, ?Y) :- q(?Y, ?X) . swaps arguments, so it is not a tautology
        // even though q(?Y, ?X) matches q(?X, ?Y) under free variables.
        assert!(is_applicable(&rule(
            vec![lit("q", vec![u("X"), u("Y")])],
            vec![lit("q", vec![u("Y"), u("X")])]
        )));
    }

    #[test]
    fn existentials_must_join() {
        // r(?X, !Y), r(!Y, ?X) :- r(?X, ?Z) . needs a two-cycle the body lacks.
        let r = rule(
            vec![lit("r", vec![u("X"), e("Y")]), lit("r", vec![e("Y"), u("X")])],
            vec![lit("r", vec![u("X"), u("Z")])],
        );
        assert!(is_applicable(&r));

        // r(?X, !Y) :- r(?X, ?Z), r(?Z, ?X) . is satisfied by ?Z.
        let r = rule(
            vec![lit("r", vec![u("X"), e("Y")])],
            vec![lit("r", vec![u("X"), u("Z")]), lit("r", vec![u("Z"), u("X")])],
        );
        assert!(!is_applicable(&r));
    }

    #[test]
    fn verdicts_are_parallel_and_repeatable() {
        let rules = vec![
            rule(vec![lit("q", vec![e("Y")])], vec![lit("p", vec![u("X")])]),
            rule(vec![lit("q", vec![u("X")])], vec![lit("q", vec![u("X")])]),
        ];
        assert_eq!(applicability_verdicts(&rules), vec![true, false]);
        assert_eq!(applicability_verdicts(&rules), applicability_verdicts(&rules));
    }
}
