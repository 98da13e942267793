use std::fmt::Debug;
use thiserror::Error;

/// Construction-time violations of the literal and rule invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Model error: literal '{predicate}' declares arity {arity} but has {found} arguments")]
    ArityMismatch {
        predicate: String,
        arity: usize,
        found: usize,
    },
    #[error("Model error: rule '{0}' has an empty head")]
    EmptyHead(String),
    #[error("Model error: universal variable '{variable}' occurs in the head of '{rule}' but not in its body")]
    UnboundHeadVariable { rule: String, variable: String },
    #[error("Model error: existential variable '{variable}' occurs in the body of '{rule}'")]
    BodyExistential { rule: String, variable: String },
    #[error("Model error: variable name '{variable}' is quantified both universally and existentially in '{rule}'")]
    BothQuantifiers { rule: String, variable: String },
}
