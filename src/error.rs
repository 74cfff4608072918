use thiserror::Error;

/// Result type for terminal operations that constrain cardinality
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors produced when a pipeline's element count violates what a
/// terminal operation requires
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// The pipeline produced no elements
    #[error("pipeline produced no elements")]
    NoElements,

    /// The pipeline produced more than one element
    #[error("pipeline produced more than one element")]
    MultipleElements,
}
