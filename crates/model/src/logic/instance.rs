//! Finite literal sets used as homomorphism targets.

use super::{Literal, Rule, Signature};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An order-irrelevant set of ground-or-frozen literals, indexed by
/// signature so that matching only ever looks at candidates with the right
/// predicate and arity.
///
/// Variables inside an instance are *frozen*: they stand for themselves and
/// only match an identical term or a free query variable.
#[derive(Debug, Clone, Default)]
pub struct Instance {
    literals: HashSet<Literal>,
    // Insertion order per signature keeps the search order reproducible.
    by_signature: HashMap<Signature, Vec<Literal>>,
}

impl Instance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The body of `rule` as an instance; each body variable is frozen.
    #[must_use]
    pub fn from_body(rule: &Rule) -> Self {
        rule.body().iter().cloned().collect()
    }

    /// Add a literal. Returns `false` if it was already present.
    pub fn insert(&mut self, literal: Literal) -> bool {
        if !self.literals.insert(literal.clone()) {
            return false;
        }
        self.by_signature
            .entry(literal.signature())
            .or_default()
            .push(literal);
        true
    }

    /// Remove a literal. Returns `false` if it was absent.
    pub fn remove(&mut self, literal: &Literal) -> bool {
        if !self.literals.remove(literal) {
            return false;
        }
        let signature = literal.signature();
        if let Some(bucket) = self.by_signature.get_mut(&signature) {
            bucket.retain(|l| l != literal);
            if bucket.is_empty() {
                self.by_signature.remove(&signature);
            }
        }
        true
    }

    #[must_use]
    #[inline]
    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Literals with the given signature, in insertion order.
    #[must_use]
    pub fn candidates(&self, signature: &Signature) -> &[Literal] {
        self.by_signature
            .get(signature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn has_signature(&self, signature: &Signature) -> bool {
        self.by_signature.contains_key(signature)
    }

    /// The literals in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> + '_ {
        self.literals.iter().sorted()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.literals == other.literals
    }
}

impl Eq for Instance {}

impl FromIterator<Literal> for Instance {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        let mut instance = Self::new();
        instance.extend(iter);
        instance
    }
}

impl Extend<Literal> for Instance {
    fn extend<I: IntoIterator<Item = Literal>>(&mut self, iter: I) {
        for literal in iter {
            self.insert(literal);
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.literals.iter().map(ToString::to_string).sorted().join(", ");
        write!(f, "{{{shown}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Term;

    fn c(v: &str) -> Term {
        Term::constant(v)
    }
    fn u(n: &str) -> Term {
        Term::universal(n)
    }

    #[test]
    fn insert_dedups_and_indexes() {
        let mut i = Instance::new();
        assert!(i.insert(Literal::new("p", vec![c("a")])));
        assert!(!i.insert(Literal::new("p", vec![c("a")])));
        assert!(i.insert(Literal::new("p", vec![c("b")])));
        assert!(i.insert(Literal::new("p", vec![c("a"), c("b")])));

        assert_eq!(i.len(), 3);
        assert_eq!(i.candidates(&Signature::new("p", 1)).len(), 2);
        assert_eq!(i.candidates(&Signature::new("p", 2)).len(), 1);
        assert!(i.candidates(&Signature::new("q", 1)).is_empty());
        assert_eq!(i.iter().count(), 3);
    }

    #[test]
    fn iteration_is_sorted() {
        let i: Instance = vec![
            Literal::new("q", vec![c("a")]),
            Literal::new("p", vec![c("b")]),
            Literal::new("p", vec![c("a")]),
        ]
        .into_iter()
        .collect();
        let order: Vec<String> = i.iter().map(ToString::to_string).collect();
        assert_eq!(order, vec!["p(a)", "p(b)", "q(a)"]);
    }

    #[test]
    fn remove_updates_index() {
        let mut i: Instance = vec![
            Literal::new("p", vec![c("a")]),
            Literal::new("p", vec![c("b")]),
        ]
        .into_iter()
        .collect();
        assert!(i.remove(&Literal::new("p", vec![c("a")])));
        assert!(!i.remove(&Literal::new("p", vec![c("a")])));
        assert_eq!(i.candidates(&Signature::new("p", 1)).len(), 1);
        assert!(i.remove(&Literal::new("p", vec![c("b")])));
        assert!(!i.has_signature(&Signature::new("p", 1)));
        assert!(i.is_empty());
    }

    #[test]
    fn frozen_body() {
        let rule = Rule::new(
            vec![
                Literal::new("p", vec![u("X")]),
                Literal::new("r", vec![u("X"), c("a")]),
            ],
            vec![Literal::new("q", vec![u("X")])],
        )
        .unwrap();
        let i = Instance::from_body(&rule);
        assert_eq!(i.len(), 2);
        assert!(i.contains(&Literal::new("p", vec![u("X")])));
        assert_eq!(i.to_string(), "{p(?X), r(?X, a)}");
    }

    #[test]
    fn equality_ignores_order() {
        let a: Instance = vec![Literal::new("p", vec![c("a")]), Literal::new("q", vec![])]
            .into_iter()
            .collect();
        let b: Instance = vec![Literal::new("q", vec![]), Literal::new("p", vec![c("a")])]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }
}
