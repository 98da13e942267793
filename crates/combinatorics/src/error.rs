use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombinationError {
    #[error("Combination error: cannot choose {k} elements out of {n}")]
    TooManyElements { n: usize, k: usize },
}
