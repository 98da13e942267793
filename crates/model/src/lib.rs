//! Logical vocabulary for existential rule analysis.
//!
//! Immutable value types only: [`Term`], [`Literal`], [`Rule`] and the
//! [`Instance`] used as the target of homomorphism checks. The one piece of
//! logic living here is construction-time validation of rules, reported as
//! [`ModelError`].
//!
//! # Example
//! ```rust
//! use model::{Literal, Rule, Term};
//!
//! // q(?X, !Y) :- p(?X) .
//! let body = vec![Literal::new("p", vec![Term::universal("X")])];
//! let head = vec![Literal::new("q", vec![Term::universal("X"), Term::existential("Y")])];
//! let rule = Rule::new(body, head).unwrap();
//! assert_eq!(rule.frontier_variables().len(), 1);
//! assert_eq!(rule.to_string(), "q(?X, !Y) :- p(?X) .");
//! ```

pub mod error;
pub mod logic;

pub use error::ModelError;
pub use logic::{Instance, Literal, Quantifier, Rule, Signature, Term, Variable};

pub type Result<T> = std::result::Result<T, ModelError>;
