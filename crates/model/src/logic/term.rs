//! Term types.
//!
//! - [`Quantifier`]: universal (`?X`) or existential (`!X`)
//! - [`Variable`]: a named, quantified variable
//! - [`Term`]: constant / variable / labeled null

use std::fmt;

/// How a variable is bound in a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quantifier {
    Universal,
    Existential,
}

/// A named variable. Equality covers both the name and the quantifier, so
/// `?X` and `!X` are different variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    name: String,
    quantifier: Quantifier,
}

impl Variable {
    #[must_use]
    pub fn new(name: impl Into<String>, quantifier: Quantifier) -> Self {
        Self {
            name: name.into(),
            quantifier,
        }
    }

    #[must_use]
    pub fn universal(name: impl Into<String>) -> Self {
        Self::new(name, Quantifier::Universal)
    }

    #[must_use]
    pub fn existential(name: impl Into<String>) -> Self {
        Self::new(name, Quantifier::Existential)
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    #[must_use]
    #[inline]
    pub fn is_universal(&self) -> bool {
        self.quantifier == Quantifier::Universal
    }

    #[must_use]
    #[inline]
    pub fn is_existential(&self) -> bool {
        self.quantifier == Quantifier::Existential
    }

    /// Same quantifier, name extended with `suffix`.
    ///
    /// Appending one fixed suffix is injective, so renaming every variable of
    /// a rule with it never merges two variables.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            name: format!("{}{}", self.name, suffix),
            quantifier: self.quantifier,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quantifier {
            Quantifier::Universal => write!(f, "?{}", self.name),
            Quantifier::Existential => write!(f, "!{}", self.name),
        }
    }
}

/// A term of the rule language.
///
/// Constants and labeled nulls are rigid: homomorphisms never substitute
/// them. Labeled nulls are never produced by user input; the analyses use
/// them as opaque witnesses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Constant(String),
    Variable(Variable),
    LabeledNull(String),
}

impl Term {
    #[must_use]
    pub fn constant(value: impl Into<String>) -> Self {
        Self::Constant(value.into())
    }

    #[must_use]
    pub fn universal(name: impl Into<String>) -> Self {
        Self::Variable(Variable::universal(name))
    }

    #[must_use]
    pub fn existential(name: impl Into<String>) -> Self {
        Self::Variable(Variable::existential(name))
    }

    #[must_use]
    pub fn null(label: impl Into<String>) -> Self {
        Self::LabeledNull(label.into())
    }

    #[must_use]
    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Constants and labeled nulls.
    #[must_use]
    #[inline]
    pub fn is_rigid(&self) -> bool {
        matches!(self, Self::Constant(_) | Self::LabeledNull(_))
    }

    #[must_use]
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(v) => Some(v),
            Self::Constant(_) | Self::LabeledNull(_) => None,
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Self::Variable(v)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{c}"),
            Self::Variable(v) => write!(f, "{v}"),
            Self::LabeledNull(l) => write!(f, "_:{l}"),
        }
    }
}
