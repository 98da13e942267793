//! Existential rules.
//!
//! A rule is `h1, ..., hm :- b1, ..., bn .`
//! - Body: literals over universal variables and rigid terms
//! - Head: literals over frontier variables, existential variables and rigid terms
//!
//! Rules are validated once in [`Rule::new`] and immutable afterwards.

use super::{Literal, Term, Variable};
use crate::{ModelError, Result};
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;

/// A validated existential rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    body: Vec<Literal>,
    head: Vec<Literal>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(&self.body, &self.head))
    }
}

fn render(body: &[Literal], head: &[Literal]) -> String {
    if body.is_empty() {
        format!("{} :- .", head.iter().join(", "))
    } else {
        format!("{} :- {} .", head.iter().join(", "), body.iter().join(", "))
    }
}

impl Rule {
    /// Construct a rule, rejecting it if any of the invariants fails:
    /// 1. the head is non-empty;
    /// 2. no existential variable occurs in the body;
    /// 3. no variable name is quantified both ways;
    /// 4. every universal head variable occurs in the body.
    pub fn new(body: Vec<Literal>, head: Vec<Literal>) -> Result<Self> {
        let text = || render(&body, &head);

        if head.is_empty() {
            return Err(ModelError::EmptyHead(text()));
        }

        if let Some(v) = body
            .iter()
            .flat_map(Literal::variables)
            .find(|v| v.is_existential())
        {
            return Err(ModelError::BodyExistential {
                rule: text(),
                variable: v.to_string(),
            });
        }

        let body_vars: BTreeSet<&Variable> = body.iter().flat_map(Literal::variables).collect();
        let head_vars: BTreeSet<&Variable> = head.iter().flat_map(Literal::variables).collect();

        let universal_names: BTreeSet<&str> = body_vars
            .iter()
            .chain(head_vars.iter())
            .filter(|v| v.is_universal())
            .map(|v| v.name())
            .collect();
        if let Some(v) = head_vars
            .iter()
            .find(|v| v.is_existential() && universal_names.contains(v.name()))
        {
            return Err(ModelError::BothQuantifiers {
                rule: text(),
                variable: v.name().to_string(),
            });
        }

        if let Some(v) = head_vars
            .iter()
            .find(|v| v.is_universal() && !body_vars.contains(*v))
        {
            return Err(ModelError::UnboundHeadVariable {
                rule: text(),
                variable: v.to_string(),
            });
        }

        Ok(Self { body, head })
    }

    #[must_use]
    #[inline]
    pub fn body(&self) -> &[Literal] {
        &self.body
    }

    #[must_use]
    #[inline]
    pub fn head(&self) -> &[Literal] {
        &self.head
    }

    /// Universal variables occurring in both body and head.
    #[must_use]
    pub fn frontier_variables(&self) -> BTreeSet<Variable> {
        let body_vars: BTreeSet<&Variable> =
            self.body.iter().flat_map(Literal::variables).collect();
        self.head
            .iter()
            .flat_map(Literal::variables)
            .filter(|v| v.is_universal() && body_vars.contains(v))
            .cloned()
            .collect()
    }

    /// Existentially quantified head variables.
    #[must_use]
    pub fn existential_variables(&self) -> BTreeSet<Variable> {
        self.head
            .iter()
            .flat_map(Literal::variables)
            .filter(|v| v.is_existential())
            .cloned()
            .collect()
    }

    /// Universal variables; by validation these are exactly the body variables.
    #[must_use]
    pub fn universal_variables(&self) -> BTreeSet<Variable> {
        self.body
            .iter()
            .flat_map(Literal::variables)
            .cloned()
            .collect()
    }

    /// All variables of the rule.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.body
            .iter()
            .chain(self.head.iter())
            .flat_map(Literal::variables)
            .cloned()
            .collect()
    }

    /// Copy of the rule with every variable name extended by `suffix`.
    ///
    /// Renaming is a bijection on variables, so the copy satisfies the same
    /// invariants and is built without re-validation.
    #[must_use]
    pub fn renamed(&self, suffix: &str) -> Self {
        let rename = |t: &Term| match t {
            Term::Variable(v) => Term::Variable(v.with_suffix(suffix)),
            other => other.clone(),
        };
        Self {
            body: self.body.iter().map(|l| l.map_terms(rename)).collect(),
            head: self.head.iter().map(|l| l.map_terms(rename)).collect(),
        }
    }
}
