//! Subset enumeration for the reliance computer.
//!
//! [`Combinations`] walks every `k`-element subset of `{0, ..., n-1}` exactly
//! once, as an owned bit-vector per step.
//!
//! # Example
//! ```rust
//! use combinatorics::{selected, Combinations};
//!
//! let subsets: Vec<Vec<usize>> = Combinations::new(4, 2)
//!     .unwrap()
//!     .map(|mask| selected(&mask))
//!     .collect();
//! assert_eq!(subsets.len(), 6);
//! assert_eq!(subsets[0], vec![0, 1]);
//! ```

mod combinations;
mod error;

pub use combinations::{binomial, selected, Combinations};
pub use error::CombinationError;
