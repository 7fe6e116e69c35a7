//! `svgvariants` renders one SVG document into many PNG variants.
//!
//! A run takes a source document and a list of [`VariantSpec`]s, each naming a target width
//! and/or height and an output naming rule. Variants render concurrently, bounded by
//! [`ConvertOpts::max_concurrency`], and every finished variant is handed to a [`VariantSink`]
//! as soon as it completes.
//!
//! # Pipeline
//!
//! 1. **Resolve**: root `width`/`height`/`viewBox` (or the content bounding box) give the
//!    document's intrinsic size ([`resolve_geometry`]).
//! 2. **Size**: a requested axis replaces the natural one; a missing axis keeps the rounded
//!    natural size ([`target_size`]).
//! 3. **Render**: a [`Renderer`] rasterizes into a per-job temp file, which is read back and
//!    deleted ([`render_to_bytes`]).
//! 4. **Emit**: outcomes reach the sink in completion order, followed by one completion signal.
//!
//! Renderers either run in-process ([`ResvgRenderer`]) or as an external program
//! ([`ProcessRenderer`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod geometry;
mod render;
mod scheduler;
mod variant;

pub use foundation::core::SourceDocument;
pub use foundation::error::{SvgVariantsError, SvgVariantsResult};
pub use geometry::probe::{
    content_bbox, has_text_content, parse_view_box, root_size_attrs, with_root_size,
};
pub use geometry::resolve::{
    BoundingBox, MAX_TARGET_DIM, ResolvedGeometry, SizeAttrs, ViewBox, resolve_geometry,
    target_size,
};
pub use render::backend::{RenderRequest, Renderer};
pub use render::invoke::{render_to_bytes, temp_raster_path};
pub use render::process::ProcessRenderer;
pub use render::raster::{ResvgRenderer, write_png};
pub use scheduler::run::{ConvertOpts, DEFAULT_MAX_CONCURRENCY, convert};
pub use scheduler::sink::{
    DirSink, InMemorySink, RunStats, VariantOutcome, VariantSink, ensure_parent_dir,
};
pub use scheduler::state::SchedulerState;
pub use variant::catalog::{Preset, preset_variants};
pub use variant::manifest::{ManifestVariant, VariantManifest};
pub use variant::spec::{NameRule, OUTPUT_EXTENSION, VariantSpec};
