//! Rule Set Stratifier Library
//!
//! This crate turns pairwise reliance results into whole-rule-set structure:
//!
//! - [`ReachabilityGraph`]: undirected adjacency over any hashable node type,
//!   with reachability and connected components.
//! - [`DependencyGraph`]: which rules each rule positively relies on.
//! - [`Stratifier`]: runs the full analysis pipeline (applicability,
//!   reliances, components) and partitions the rules into strata so every
//!   rule's positive dependencies are in earlier strata; detects recursive
//!   strata (SCCs).
//!
//! # Example
//! ```rust
//! use common::AnalysisConfig;
//! use model::{Literal, Rule, Term};
//! use stratifier::Stratifier;
//!
//! let x = || Term::universal("X");
//! // q(?X) :- p(?X) .   r(?X) :- q(?X) .
//! let rules = vec![
//!     Rule::new(vec![Literal::new("p", vec![x()])], vec![Literal::new("q", vec![x()])]).unwrap(),
//!     Rule::new(vec![Literal::new("q", vec![x()])], vec![Literal::new("r", vec![x()])]).unwrap(),
//! ];
//!
//! let stratifier = Stratifier::from_rules(&rules, &AnalysisConfig::default());
//! assert_eq!(stratifier.strata(), &[vec![0], vec![1]]);
//! assert_eq!(stratifier.components(), &[vec![0, 1]]);
//! println!("{}", stratifier);
//! ```

mod dependency_graph;
mod reachability;
pub mod stratifier;

pub use dependency_graph::DependencyGraph;
pub use reachability::ReachabilityGraph;
pub use stratifier::Stratifier;
