//! Variant descriptors and the ways to produce them.

/// Built-in icon size presets.
pub mod catalog;
/// JSON run manifests.
pub mod manifest;
/// The variant descriptor and output naming.
pub mod spec;
