//! Pairwise reliance between existential rules.
//!
//! For an ordered pair of rules `(R1, R2)`:
//! - **positive reliance** `R1 -> R2`: some application of `R1` can create a
//!   new match for the body of `R2` that leads to a new application of `R2`;
//! - **negative reliance** `R1 -o R2` (restraint): some application of `R1`
//!   can provide an alternative witness for the existential part of an
//!   earlier `R2` application, making that application redundant.
//!
//! Both are decided by searching piece-unifiers between subsets of literals
//! (enumerated with [`combinatorics::Combinations`]) and, unless disabled in
//! [`AnalysisConfig`](common::AnalysisConfig), by checking with the
//! homomorphism evaluator that the unifier describes steps where both rules
//! actually fire.
//!
//! # Example
//! ```rust
//! use common::AnalysisConfig;
//! use model::{Literal, Rule, Term};
//! use reliance::{compute_reliances, RelianceKind};
//!
//! let x = || Term::universal("X");
//! // q(?X) :- p(?X) .   r(?X) :- q(?X) .
//! let r0 = Rule::new(vec![Literal::new("p", vec![x()])], vec![Literal::new("q", vec![x()])]).unwrap();
//! let r1 = Rule::new(vec![Literal::new("q", vec![x()])], vec![Literal::new("r", vec![x()])]).unwrap();
//!
//! let set = compute_reliances(&[r0, r1], &AnalysisConfig::default());
//! assert!(set.contains(0, 1, RelianceKind::Positive));
//! assert!(!set.contains(1, 0, RelianceKind::Positive));
//! ```

mod negative;
mod pairing;
mod positive;
mod set;
mod unifier;

pub use negative::negatively_relies;
pub use positive::positively_relies;
pub use set::{compute_reliances, RelianceEdge, RelianceKind, RelianceSet};
pub use unifier::{Class, Unifier};

/// Suffix given to the variables of the first rule of a pair.
pub(crate) const SOURCE_SUFFIX: &str = "_1";
/// Suffix given to the variables of the second rule of a pair.
pub(crate) const TARGET_SUFFIX: &str = "_2";
