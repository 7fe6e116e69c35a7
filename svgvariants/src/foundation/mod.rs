//! Crate-wide error type and the source document handle.

/// The source document handle.
pub mod core;
/// Error taxonomy shared by every stage.
pub mod error;
