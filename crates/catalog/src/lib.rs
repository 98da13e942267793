//! Rule Catalog Library
//!
//! Per-rule metadata used by the reliance computer: literal signature
//! fingerprints for the predicate prefilter, frontier and existential
//! variable sets, and the positions at which every variable occurs.
//! Catalogs are built once per rule and only ever read afterwards.

/// Literal and argument positions inside a rule.
pub mod atom;
/// Per-rule catalog with precomputed metadata.
pub mod rule;

/// Re-exported.
pub use atom::{AtomArgumentSignature, AtomSignature};
pub use rule::RuleCatalog;
