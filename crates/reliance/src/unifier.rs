//! Most general unifiers over function-free literals.
//!
//! Without function symbols a unifier is a partition of the variables into
//! equivalence classes, each bound to at most one rigid term. Two different
//! rigid terms in one class is a clash.

use evaluator::Substitution;
use itertools::Itertools;
use model::{Literal, Term, Variable};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// One equivalence class of a [`Unifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    members: BTreeSet<Variable>,
    rigid: Option<Term>,
}

impl Class {
    #[must_use]
    pub fn members(&self) -> &BTreeSet<Variable> {
        &self.members
    }

    /// The constant or labeled null the class is bound to, if any.
    #[must_use]
    pub fn rigid(&self) -> Option<&Term> {
        self.rigid.as_ref()
    }
}

/// Incrementally built most general unifier.
#[derive(Debug, Clone, Default)]
pub struct Unifier {
    class_of: HashMap<Variable, usize>,
    // Merged-away classes leave a `None` behind so indices stay valid.
    classes: Vec<Option<Class>>,
}

impl Unifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unify two literals argument-wise. Literals with different signatures
    /// never unify. On `false` the unifier may be partially extended and must
    /// be discarded.
    pub fn unify_literals(&mut self, a: &Literal, b: &Literal) -> bool {
        if a.predicate() != b.predicate() || a.arity() != b.arity() {
            return false;
        }
        a.arguments()
            .iter()
            .zip(b.arguments())
            .all(|(s, t)| self.unify_terms(s, t))
    }

    pub fn unify_terms(&mut self, a: &Term, b: &Term) -> bool {
        match (a, b) {
            (Term::Variable(x), Term::Variable(y)) => {
                let cx = self.class_id(x);
                let cy = self.class_id(y);
                self.merge(cx, cy)
            }
            (Term::Variable(x), rigid) | (rigid, Term::Variable(x)) => {
                let cx = self.class_id(x);
                self.bind_rigid(cx, rigid)
            }
            (s, t) => s == t,
        }
    }

    /// The class of `var`, or `None` if `var` was never unified.
    #[must_use]
    pub fn class(&self, var: &Variable) -> Option<&Class> {
        self.class_of
            .get(var)
            .and_then(|&id| self.classes[id].as_ref())
    }

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.iter().flatten()
    }

    /// Turn the partition into a substitution: each variable maps to the
    /// rigid term of its class, or else to the member with the smallest
    /// `(rank(var), var)`.
    pub fn substitution<F>(&self, rank: F) -> Substitution
    where
        F: Fn(&Variable) -> u8,
    {
        let mut subst = Substitution::empty();
        for class in self.classes() {
            let representative = match &class.rigid {
                Some(term) => term.clone(),
                None => match class.members.iter().min_by_key(|v| (rank(v), *v)) {
                    Some(v) => Term::Variable(v.clone()),
                    None => continue,
                },
            };
            for member in &class.members {
                subst.bind(member.clone(), representative.clone());
            }
        }
        subst
    }

    fn class_id(&mut self, var: &Variable) -> usize {
        if let Some(&id) = self.class_of.get(var) {
            return id;
        }
        let id = self.classes.len();
        self.classes.push(Some(Class {
            members: BTreeSet::from([var.clone()]),
            rigid: None,
        }));
        self.class_of.insert(var.clone(), id);
        id
    }

    fn bind_rigid(&mut self, id: usize, term: &Term) -> bool {
        let Some(class) = self.classes[id].as_mut() else {
            return false;
        };
        match &class.rigid {
            Some(existing) => existing == term,
            None => {
                class.rigid = Some(term.clone());
                true
            }
        }
    }

    fn merge(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return true;
        }
        let (Some(first), Some(second)) = (self.classes[a].as_ref(), self.classes[b].as_ref()) else {
            return false;
        };
        // Keep the larger class and move the smaller one into it.
        let (keep, gone) = if first.members.len() > second.members.len() {
            (a, b)
        } else {
            (b, a)
        };
        let Some(moved) = self.classes[gone].take() else {
            return false;
        };
        for member in &moved.members {
            self.class_of.insert(member.clone(), keep);
        }
        let Some(kept) = self.classes[keep].as_mut() else {
            return false;
        };
        kept.members.extend(moved.members);
        let Some(term) = moved.rigid else {
            return true;
        };
        match &kept.rigid {
            Some(existing) => *existing == term,
            None => {
                kept.rigid = Some(term);
                true
            }
        }
    }
}

impl fmt::Display for Unifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self
            .classes()
            .map(|class| {
                let members = class.members.iter().join(" = ");
                match &class.rigid {
                    Some(term) => format!("{members} = {term}"),
                    None => members,
                }
            })
            .sorted()
            .join("; ");
        write!(f, "{{{shown}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn variables_join_classes() {
        let mut un = Unifier::new();
        assert!(un.unify_literals(
            &lit("q", vec![u("X"), u("X")]),
            &lit("q", vec![u("A"), e("Y")])
        ));
        let class = un.class(&Variable::existential("Y")).unwrap();
        assert_eq!(class.members().len(), 3);
        assert!(class.rigid().is_none());
        assert_eq!(un.classes().count(), 1);
        assert_eq!(un.to_string(), "{?A = ?X = !Y}");
    }

    #[test]
    fn rigid_terms_clash() {
        let mut un = Unifier::new();
        assert!(!un.unify_literals(&lit("p", vec![c("a")]), &lit("p", vec![c("b")])));

        let mut un = Unifier::new();
        assert!(!un.unify_literals(
            &lit("p", vec![u("X"), u("X")]),
            &lit("p", vec![c("a"), c("b")])
        ));

        let mut un = Unifier::new();
        assert!(!un.unify_literals(
            &lit("p", vec![u("X"), u("Y"), u("X")]),
            &lit("p", vec![c("a"), c("b"), u("Y")])
        ));
    }

    #[test]
    fn rigid_binding_propagates_through_merge() {
        let mut un = Unifier::new();
        assert!(un.unify_literals(
            &lit("p", vec![u("X"), u("Y"), u("X")]),
            &lit("p", vec![c("a"), u("Z"), u("Z")])
        ));
        let class = un.class(&Variable::universal("Y")).unwrap();
        assert_eq!(class.rigid(), Some(&c("a")));
        let s = un.substitution(|_| 0);
        assert_eq!(s.apply_to_term(&u("Y")), c("a"));
        assert_eq!(s.apply_to_term(&u("X")), c("a"));
    }

    #[test]
    fn signatures_must_agree() {
        let mut un = Unifier::new();
        assert!(!un.unify_literals(&lit("p", vec![u("X")]), &lit("q", vec![u("X")])));
        let mut un = Unifier::new();
        assert!(!un.unify_literals(&lit("p", vec![u("X")]), &lit("p", vec![u("X"), u("Y")])));
    }

    #[test]
    fn representative_follows_rank() {
        let mut un = Unifier::new();
        assert!(un.unify_terms(&u("B"), &e("A")));
        let universal_first = un.substitution(|v| u8::from(v.is_existential()));
        assert_eq!(universal_first.apply_to_term(&e("A")), u("B"));
        let existential_first = un.substitution(|v| u8::from(v.is_universal()));
        assert_eq!(existential_first.apply_to_term(&u("B")), e("A"));
    }

    #[test]
    fn untouched_variables_are_not_bound() {
        let un = Unifier::new();
        assert!(un.class(&Variable::universal("X")).is_none());
        assert!(un.substitution(|_| 0).is_empty());
    }
}
