//! Boolean conjunctive query evaluation over finite instances.
//!
//! - [`entails`] / [`entails_with`]: is there a homomorphism from a query
//!   (a sequence of literals) into an [`Instance`](model::Instance)?
//! - [`find_homomorphism`]: the same search, returning the witness.
//! - [`is_applicable`]: can a rule ever add information, or is its head
//!   already entailed by its own frozen body?
//!
//! Conjunctive query evaluation is NP-complete; the search here is plain
//! backtracking with signature-indexed candidates. Inputs are single rule
//! bodies and heads, so the exponential worst case stays small in practice.
//! Callers that need bounded latency must impose their own budget.
//!
//! # Example
//! ```rust
//! use evaluator::entails;
//! use model::{Instance, Literal, Term};
//!
//! let instance: Instance = vec![Literal::new("p", vec![Term::constant("a")])]
//!     .into_iter()
//!     .collect();
//! assert!(entails(&instance, &[Literal::new("p", vec![Term::universal("X")])]));
//! assert!(!entails(&instance, &[Literal::new("q", vec![Term::universal("X")])]));
//! ```

mod applicability;
mod homomorphism;
mod substitution;

pub use applicability::{applicability_verdicts, is_applicable};
pub use homomorphism::{entails, entails_with, find_homomorphism, FreeVariables};
pub use substitution::Substitution;
