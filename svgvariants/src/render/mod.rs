//! Rendering engines and the per-variant invocation wrapper.

/// The renderer trait and request type.
pub mod backend;
/// Temp-file lifecycle around one render call.
pub mod invoke;
/// External-process renderer.
pub mod process;
/// In-process `resvg` renderer.
pub mod raster;
