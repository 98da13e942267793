//! Substitution: mapping variables to terms.

use itertools::Itertools;
use model::{Literal, Term, Variable};
use std::collections::HashMap;
use std::fmt;

/// A finite map from variables to terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    bindings: HashMap<Variable, Term>,
}

impl Substitution {
    /// The identity substitution.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, var: Variable, term: Term) {
        self.bindings.insert(var, term);
    }

    pub fn unbind(&mut self, var: &Variable) -> Option<Term> {
        self.bindings.remove(var)
    }

    #[must_use]
    pub fn lookup(&self, var: &Variable) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Image of `term`; unbound variables and rigid terms map to themselves.
    #[must_use]
    pub fn apply_to_term(&self, term: &Term) -> Term {
        match term {
            Term::Variable(v) => self.bindings.get(v).cloned().unwrap_or_else(|| term.clone()),
            Term::Constant(_) | Term::LabeledNull(_) => term.clone(),
        }
    }

    #[must_use]
    pub fn apply_to_literal(&self, literal: &Literal) -> Literal {
        literal.map_terms(|t| self.apply_to_term(t))
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.bindings.iter()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .bindings
            .iter()
            .map(|(v, t)| format!("{v} -> {t}"))
            .sorted()
            .join(", ");
        write!(f, "{{{pairs}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_leaves_rigid_and_unbound_terms() {
        let mut s = Substitution::empty();
        s.bind(Variable::universal("X"), Term::constant("a"));

        let l = Literal::new(
            "p",
            vec![
                Term::universal("X"),
                Term::universal("Y"),
                Term::null("1"),
                Term::existential("X"),
            ],
        );
        assert_eq!(s.apply_to_literal(&l).to_string(), "p(a, ?Y, _:1, !X)");
        assert_eq!(s.to_string(), "{?X -> a}");
    }

    #[test]
    fn bind_and_unbind() {
        let mut s = Substitution::empty();
        assert!(s.is_empty());
        s.bind(Variable::existential("Y"), Term::constant("c"));
        assert_eq!(s.len(), 1);
        assert_eq!(
            s.lookup(&Variable::existential("Y")),
            Some(&Term::constant("c"))
        );
        assert_eq!(s.unbind(&Variable::existential("Y")), Some(Term::constant("c")));
        assert!(s.is_empty());
    }
}
