//! Literal types.
//!
//! - [`Signature`]: `predicate/arity`
//! - [`Literal`]: `predicate(t1, ..., tN)`
//!
//! # Example
//! ```rust
//! use model::{Literal, Term};
//! let l = Literal::new("edge", vec![Term::constant("a"), Term::universal("X")]);
//! assert_eq!(l.arity(), 2);
//! assert_eq!(l.to_string(), "edge(a, ?X)");
//! assert_eq!(l.signature().to_string(), "edge/2");
//! ```

use super::{Term, Variable};
use crate::{ModelError, Result};
use common::compute_fp;
use std::fmt;

/// Predicate name together with its arity. Only literals with equal
/// signatures can ever be matched or unified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    predicate: String,
    arity: usize,
}

impl Signature {
    #[must_use]
    pub fn new(predicate: impl Into<String>, arity: usize) -> Self {
        Self {
            predicate: predicate.into(),
            arity,
        }
    }

    #[must_use]
    #[inline]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    #[must_use]
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        compute_fp(("signature", &self.predicate, self.arity))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.predicate, self.arity)
    }
}

/// A positive literal. Two literals are equal iff predicate, arity and the
/// argument sequence are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    predicate: String,
    arity: usize,
    arguments: Vec<Term>,
}

impl Literal {
    /// Create a literal whose arity is the number of arguments.
    #[must_use]
    pub fn new(predicate: &str, arguments: Vec<Term>) -> Self {
        Self {
            predicate: predicate.to_string(),
            arity: arguments.len(),
            arguments,
        }
    }

    /// Create a literal with an explicitly declared arity.
    pub fn with_arity(predicate: &str, arity: usize, arguments: Vec<Term>) -> Result<Self> {
        if arguments.len() != arity {
            return Err(ModelError::ArityMismatch {
                predicate: predicate.to_string(),
                arity,
                found: arguments.len(),
            });
        }
        Ok(Self::new(predicate, arguments))
    }

    #[must_use]
    #[inline]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    #[must_use]
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    #[inline]
    pub fn arguments(&self) -> &[Term] {
        &self.arguments
    }

    #[must_use]
    pub fn signature(&self) -> Signature {
        Signature::new(self.predicate.as_str(), self.arity)
    }

    #[must_use]
    #[inline]
    pub fn has_signature(&self, signature: &Signature) -> bool {
        self.arity == signature.arity() && self.predicate == signature.predicate()
    }

    /// Variables in argument order, repeats included.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.arguments.iter().filter_map(Term::as_variable)
    }

    #[must_use]
    pub fn is_ground(&self) -> bool {
        self.arguments.iter().all(Term::is_rigid)
    }

    /// Rebuild the literal with every argument passed through `f`.
    #[must_use]
    pub fn map_terms<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Term) -> Term,
    {
        Self {
            predicate: self.predicate.clone(),
            arity: self.arity,
            arguments: self.arguments.iter().map(&mut f).collect(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
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

    #[test]
    fn structural_equality() {
        let a = Literal::new("p", vec![c("a"), u("X")]);
        let b = Literal::new("p", vec![c("a"), u("X")]);
        assert_eq!(a, b);
        assert_ne!(a, Literal::new("p", vec![c("a"), e("X")]));
        assert_ne!(a, Literal::new("q", vec![c("a"), u("X")]));
        assert_ne!(Literal::new("p", vec![]), Literal::new("p", vec![c("a")]));
    }

    #[test]
    fn declared_arity_must_match() {
        assert!(Literal::with_arity("p", 2, vec![c("a"), c("b")]).is_ok());
        let err = Literal::with_arity("p", 3, vec![c("a")]).unwrap_err();
        assert_eq!(
            err,
            ModelError::ArityMismatch {
                predicate: "p".into(),
                arity: 3,
                found: 1
            }
        );
    }

    #[test]
    fn signature_and_variables() {
        let l = Literal::new("r", vec![u("X"), c("a"), e("Y"), u("X")]);
        assert_eq!(l.signature(), Signature::new("r", 4));
        assert!(l.has_signature(&Signature::new("r", 4)));
        assert!(!l.has_signature(&Signature::new("r", 3)));
        let names: Vec<_> = l.variables().map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["?X", "!Y", "?X"]);
        assert!(!l.is_ground());
        assert!(Literal::new("r", vec![c("a"), Term::null("1")]).is_ground());
    }

    #[test]
    fn map_terms_keeps_signature() {
        let l = Literal::new("r", vec![u("X"), c("a")]);
        let frozen = l.map_terms(|t| match t {
            Term::Variable(v) => Term::constant(v.name()),
            other => other.clone(),
        });
        assert_eq!(frozen.to_string(), "r(X, a)");
        assert_eq!(frozen.signature(), l.signature());
    }

    #[test]
    fn signature_fingerprint_distinguishes_arity() {
        assert_eq!(
            Signature::new("p", 1).fingerprint(),
            Signature::new("p", 1).fingerprint()
        );
        assert_ne!(
            Signature::new("p", 1).fingerprint(),
            Signature::new("p", 2).fingerprint()
        );
    }
}
