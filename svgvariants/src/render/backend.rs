use std::path::Path;

use crate::foundation::error::SvgVariantsResult;

/// Size hints for one render call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderRequest {
    /// Requested width; `None` infers it from the document.
    pub width: Option<u32>,
    /// Requested height; `None` infers it from the document.
    pub height: Option<u32>,
    /// Global scale factor for explicitly sized documents.
    pub scale: Option<f64>,
}

/// An engine that rasterizes one document into a file.
///
/// Implementations resolve the target size from the document and `request`, and write the raster
/// to `dest`. The caller owns `dest` and removes it afterwards. The scheduler calls `render` from
/// several threads at once.
pub trait Renderer: Send + Sync {
    /// Render `source` into `dest`.
    fn render(&self, source: &Path, request: &RenderRequest, dest: &Path)
    -> SvgVariantsResult<()>;
}
