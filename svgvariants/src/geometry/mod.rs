//! Intrinsic size resolution for SVG documents.

/// Root attribute and bounding box probing.
pub mod probe;
/// The sizing algorithm and target-size decision.
pub mod resolve;
