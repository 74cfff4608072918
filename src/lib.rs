//! A lazy, composable sequence-processing pipeline over numeric elements.
//!
//! This crate provides a pull-based pipeline: intermediate operations
//! (filter, map, flatten, sort, dedupe, sample, take/drop-while, limit,
//! skip) wrap the upstream source without touching it, and all work is
//! deferred until a terminal operation (fold, collect, search, aggregate)
//! pulls elements one at a time.
//!
//! # Features
//!
//! - Strictly lazy intermediate operators: no upstream element moves
//!   until a terminal operation demands it
//! - Short-circuiting terminals (`any_match`, `find_first`, `single`)
//!   and operators (`limit`, `take_while`) that stop pulling as soon as
//!   the answer is known
//! - Stateful operators (`sorted`, `distinct`) that buffer exactly when
//!   their semantics require it
//! - A generic pipeline plus a boxing bridge, so the set- and sort-based
//!   algorithms are written once
//! - Infinite sources (`generate`, `iterate`) usable under truncating
//!   operators
//!
//! # Example
//!
//! ```
//! use seqpipe::IntPipeline;
//!
//! let sum = IntPipeline::range(1, 100)
//!     .filter(|value| value % 3 == 0)
//!     .map(|value| value * 2)
//!     .limit(10)
//!     .sum();
//! assert_eq!(sum, 330);
//! ```

pub mod error;
pub mod generic;
pub mod lookahead;
pub mod ops;
pub mod pipeline;
pub mod source;

// Re-exports for convenience
pub use error::{PipelineError, Result};
pub use generic::Pipeline;
pub use lookahead::Lookahead;
pub use pipeline::IntPipeline;
pub use source::{Concat, Generate, Iterate, Range};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
