use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};
use crate::geometry::probe::{content_bbox, has_text_content, root_size_attrs, with_root_size};
use crate::geometry::resolve::{ResolvedGeometry, resolve_geometry, target_size};
use crate::render::backend::{RenderRequest, Renderer};

/// In-process renderer built on `usvg` + `resvg`.
///
/// The document is fitted uniformly into the target viewport and centered. Output is PNG.
#[derive(Clone)]
pub struct ResvgRenderer {
    fontdb: Arc<OnceLock<Arc<usvg::fontdb::Database>>>,
}

impl ResvgRenderer {
    /// Renderer that loads the system fonts the first time a document contains text.
    pub fn new() -> Self {
        Self {
            fontdb: Arc::new(OnceLock::new()),
        }
    }

    /// Renderer using a caller-provided font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            fontdb: Arc::new(OnceLock::from(fontdb)),
        }
    }

    fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        self.fontdb
            .get_or_init(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                tracing::debug!(faces = db.len(), "loaded system fonts");
                Arc::new(db)
            })
            .clone()
    }

    /// Load `source`, resolve its target size and rasterize it into a premultiplied pixmap.
    pub fn rasterize(
        &self,
        source: &Path,
        request: &RenderRequest,
    ) -> SvgVariantsResult<resvg::tiny_skia::Pixmap> {
        let bytes = std::fs::read(source).map_err(|e| {
            SvgVariantsError::load(format!("read '{}': {e}", source.display()))
        })?;
        let text = std::str::from_utf8(&bytes).map_err(|e| {
            SvgVariantsError::load(format!("'{}' is not utf-8: {e}", source.display()))
        })?;

        let mut attrs = root_size_attrs(text)?;
        let mut opts = usvg::Options {
            resources_dir: source.parent().map(Path::to_path_buf),
            ..Default::default()
        };
        if has_text_content(text) {
            opts.fontdb = self.fontdb();
        }
        let parse = |data: &[u8]| {
            usvg::Tree::from_data(data, &opts).map_err(|e| {
                SvgVariantsError::load(format!("parse svg '{}': {e}", source.display()))
            })
        };
        let mut tree = parse(&bytes)?;
        attrs.bbox = content_bbox(&tree);

        let geometry = resolve_geometry(&attrs)?;
        let (width, height) =
            target_size(request.width, request.height, request.scale, &geometry)?;
        tracing::debug!(?geometry, width, height, "resolved target size");

        if !(geometry.width > 0.0 && geometry.height > 0.0) {
            return Err(SvgVariantsError::geometry(format!(
                "document has an empty extent: {}x{}",
                geometry.width, geometry.height
            )));
        }
        // usvg sizes the tree by its own rules; re-parse so its frame is the resolved one.
        if !tree_matches(&tree, &geometry) {
            let resized = with_root_size(text, geometry.width, geometry.height)?;
            tree = parse(resized.as_bytes())?;
        }

        let transform = fit_transform(tree.size(), width, height);
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| SvgVariantsError::render("failed to allocate pixmap"))?;
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

impl Default for ResvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ResvgRenderer {
    #[tracing::instrument(skip(self))]
    fn render(
        &self,
        source: &Path,
        request: &RenderRequest,
        dest: &Path,
    ) -> SvgVariantsResult<()> {
        let pixmap = self.rasterize(source, request)?;
        write_png(&pixmap, dest)
    }
}

fn tree_matches(tree: &usvg::Tree, geometry: &ResolvedGeometry) -> bool {
    let size = tree.size();
    (f64::from(size.width()) - geometry.width).abs() < 1e-3
        && (f64::from(size.height()) - geometry.height).abs() < 1e-3
}

fn fit_transform(size: usvg::Size, width: u32, height: u32) -> resvg::tiny_skia::Transform {
    let (dw, dh) = (f64::from(size.width()), f64::from(size.height()));
    let (tw, th) = (f64::from(width), f64::from(height));
    let s = (tw / dw).min(th / dh);
    let ox = (tw - dw * s) / 2.0;
    let oy = (th - dh * s) / 2.0;
    resvg::tiny_skia::Transform::from_row(s as f32, 0.0, 0.0, s as f32, ox as f32, oy as f32)
}

/// Encode a premultiplied pixmap as a straight-alpha PNG file.
pub fn write_png(pixmap: &resvg::tiny_skia::Pixmap, dest: &Path) -> SvgVariantsResult<()> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image::save_buffer_with_format(
        dest,
        &rgba,
        pixmap.width(),
        pixmap.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| SvgVariantsError::render(format!("write png '{}': {e}", dest.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
