//! Terms, literals, rules and instances.
//!
//! - [`term`]: constants, quantified variables and labeled nulls
//! - [`literal`]: `predicate(t1, ..., tn)` and its signature
//! - [`rule`]: validated `head :- body` pairs
//! - [`instance`]: signature-indexed literal sets

pub mod instance;
pub mod literal;
pub mod rule;
pub mod term;

pub use instance::Instance;
pub use literal::{Literal, Signature};
pub use rule::Rule;
pub use term::{Quantifier, Term, Variable};
