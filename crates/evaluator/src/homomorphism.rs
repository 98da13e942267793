//! Homomorphism search from a query into an instance.

use crate::Substitution;
use itertools::Itertools;
use model::{Instance, Literal, Term, Variable};
use std::collections::BTreeSet;
use tracing::trace;

/// Which query variables the search may substitute.
///
/// A variable outside the free set is rigid: it only matches an identical
/// term in the instance, exactly like a constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeVariables {
    /// Every variable of the query, regardless of its quantifier.
    All,
    /// Only the listed variables.
    Only(BTreeSet<Variable>),
}

impl FreeVariables {
    #[must_use]
    pub fn is_free(&self, var: &Variable) -> bool {
        match self {
            Self::All => true,
            Self::Only(vars) => vars.contains(var),
        }
    }
}

/// True iff some substitution of the query variables maps every literal of
/// `query` onto a literal of `instance`.
#[must_use]
pub fn entails(instance: &Instance, query: &[Literal]) -> bool {
    entails_with(instance, query, &FreeVariables::All)
}

/// [`entails`] with only the variables selected by `free` substitutable.
#[must_use]
pub fn entails_with(instance: &Instance, query: &[Literal], free: &FreeVariables) -> bool {
    find_homomorphism(instance, query, free).is_some()
}

/// Search for a substitution θ over the free variables of `query` such that
/// θ(L) is a literal of `instance` for every literal L of `query`.
///
/// Algorithm outline:
/// 1. Take the query literals in the given order.
/// 2. For the current literal, try every instance literal with the same
///    signature and extend θ argument by argument; a clash rejects the
///    candidate.
/// 3. Recurse on the remaining literals; undo the extension on failure.
///
/// The empty query is entailed by every instance.
#[must_use]
pub fn find_homomorphism(
    instance: &Instance,
    query: &[Literal],
    free: &FreeVariables,
) -> Option<Substitution> {
    let mut subst = Substitution::empty();
    let found = search(instance, query, free, &mut subst);
    trace!(
        "homomorphism {} -> {}: {}",
        query.iter().join(", "),
        instance,
        if found { "found" } else { "none" }
    );
    found.then_some(subst)
}

fn search(
    instance: &Instance,
    query: &[Literal],
    free: &FreeVariables,
    subst: &mut Substitution,
) -> bool {
    let Some((first, rest)) = query.split_first() else {
        return true;
    };

    for candidate in instance.candidates(&first.signature()) {
        let mut added = Vec::new();
        if extend(first, candidate, free, subst, &mut added) && search(instance, rest, free, subst)
        {
            return true;
        }
        for var in &added {
            subst.unbind(var);
        }
    }
    false
}

/// Extend `subst` so that it maps `query` onto `target`, recording new
/// bindings in `added`. Returns `false` on the first clash; the caller
/// removes whatever was recorded.
fn extend(
    query: &Literal,
    target: &Literal,
    free: &FreeVariables,
    subst: &mut Substitution,
    added: &mut Vec<Variable>,
) -> bool {
    for (q, t) in query.arguments().iter().zip(target.arguments()) {
        match q {
            Term::Variable(v) if free.is_free(v) => match subst.lookup(v) {
                Some(bound) if bound != t => return false,
                Some(_) => {}
                None => {
                    subst.bind(v.clone(), t.clone());
                    added.push(v.clone());
                }
            },
            _ => {
                if q != t {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn c(v: &str) -> Term {
        Term::constant(v)
    }
    fn u(n: &str) -> Term {
        Term::universal(n)
    }
    fn e(n: &str) -> Term {
        Term::existential(n)
    }
    fn lit(p: &str, args: Vec<Term>) -> Literal {
        Literal::new(p, args)
    }
    fn instance(literals: Vec<Literal>) -> Instance {
        literals.into_iter().collect()
    }

    #[test]
    fn single_fact() {
        let i = instance(vec![lit("p", vec![c("a")])]);
        assert!(entails(&i, &[lit("p", vec![u("X")])]));
        assert!(entails(&i, &[lit("p", vec![e("X")])]));
        assert!(!entails(&i, &[lit("q", vec![u("X")])]));
        assert!(!entails(&i, &[lit("q", vec![e("X")])]));
    }

    #[test]
    fn arity_is_part_of_matching() {
        let i = instance(vec![lit("p", vec![c("a"), c("b")])]);
        assert!(!entails(&i, &[lit("p", vec![u("X")])]));
        assert!(entails(&i, &[lit("p", vec![u("X"), u("Y")])]));
    }

    #[test]
    fn constants_and_nulls_are_never_substituted() {
        let i = instance(vec![lit("p", vec![c("a")]), lit("r", vec![Term::null("1")])]);
        assert!(entails(&i, &[lit("p", vec![c("a")])]));
        assert!(!entails(&i, &[lit("p", vec![c("b")])]));
        assert!(entails(&i, &[lit("r", vec![Term::null("1")])]));
        assert!(!entails(&i, &[lit("r", vec![c("1")])]));
    }

    #[test]
    fn join_consistency() {
        // p(a, b), p(b, c): ?X -> ?Y -> ?Z chain exists, ?X -> ?X loop does not.
        let i = instance(vec![lit("p", vec![c("a"), c("b")]), lit("p", vec![c("b"), c("c")])]);
        assert!(entails(
            &i,
            &[lit("p", vec![u("X"), u("Y")]), lit("p", vec![u("Y"), u("Z")])]
        ));
        assert!(!entails(&i, &[lit("p", vec![u("X"), u("X")])]));
        assert!(!entails(
            &i,
            &[lit("p", vec![u("X"), u("Y")]), lit("p", vec![u("Y"), u("X")])]
        ));
    }

    #[test]
    fn backtracks_over_first_choice() {
        // The first candidate for p(?X) is a dead end.
        let i = instance(vec![
            lit("p", vec![c("a")]),
            lit("p", vec![c("b")]),
            lit("q", vec![c("b")]),
        ]);
        let s = find_homomorphism(
            &i,
            &[lit("p", vec![u("X")]), lit("q", vec![u("X")])],
            &FreeVariables::All,
        )
        .unwrap();
        assert_eq!(s.lookup(&Variable::universal("X")), Some(&c("b")));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn rigid_variables_match_only_themselves() {
        let i = instance(vec![lit("q", vec![u("X")])]);
        let only_y = FreeVariables::Only(BTreeSet::from([Variable::existential("Y")]));
        assert!(entails_with(&i, &[lit("q", vec![u("X")])], &only_y));
        assert!(entails_with(&i, &[lit("q", vec![e("Y")])], &only_y));
        assert!(!entails_with(&i, &[lit("q", vec![u("Z")])], &only_y));
        assert!(!entails_with(&i, &[lit("q", vec![c("c")])], &only_y));
        // Under `All`, ?Z may be mapped onto the frozen ?X.
        assert!(entails(&i, &[lit("q", vec![u("Z")])]));
    }

    #[test]
    fn empty_query_and_empty_instance() {
        assert!(entails(&Instance::new(), &[]));
        assert!(!entails(&Instance::new(), &[lit("p", vec![])]));
        assert!(entails(&instance(vec![lit("p", vec![])]), &[lit("p", vec![])]));
    }

    #[test]
    fn repeated_runs_agree() {
        let i = instance(vec![lit("p", vec![c("a"), c("b")]), lit("p", vec![c("b"), c("a")])]);
        let q = [lit("p", vec![u("X"), u("Y")]), lit("p", vec![u("Y"), u("X")])];
        let first = find_homomorphism(&i, &q, &FreeVariables::All);
        for _ in 0..5 {
            assert_eq!(find_homomorphism(&i, &q, &FreeVariables::All), first);
        }
    }

    fn arb_term() -> impl Strategy<Value = Term> {
        prop_oneof![
            "[a-c]".prop_map(|s| Term::constant(s)),
            "[X-Z]".prop_map(|s| Term::universal(s)),
        ]
    }

    fn arb_literal() -> impl Strategy<Value = Literal> {
        ("[pq]", prop::collection::vec(arb_term(), 1..=2))
            .prop_map(|(p, args)| Literal::new(&p, args))
    }

    fn arb_fact() -> impl Strategy<Value = Literal> {
        ("[pq]", prop::collection::vec("[a-c]".prop_map(|s| Term::constant(s)), 1..=2))
            .prop_map(|(p, args)| Literal::new(&p, args))
    }

    proptest! {
        #[test]
        fn shrinking_the_instance_never_creates_entailment(
            facts in prop::collection::vec(arb_fact(), 0..8),
            query in prop::collection::vec(arb_literal(), 1..4),
            victim in any::<prop::sample::Index>(),
        ) {
            let full: Instance = facts.iter().cloned().collect();
            let before = entails(&full, &query);
            if !facts.is_empty() {
                let mut smaller = full.clone();
                smaller.remove(&facts[victim.index(facts.len())]);
                let after = entails(&smaller, &query);
                prop_assert!(before || !after);
            }
        }

        #[test]
        fn witness_maps_query_into_instance(
            facts in prop::collection::vec(arb_fact(), 0..8),
            query in prop::collection::vec(arb_literal(), 1..4),
        ) {
            let i: Instance = facts.into_iter().collect();
            if let Some(theta) = find_homomorphism(&i, &query, &FreeVariables::All) {
                for l in &query {
                    prop_assert!(i.contains(&theta.apply_to_literal(l)));
                }
            }
        }
    }
}
