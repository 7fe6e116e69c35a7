use std::path::{Path, PathBuf};

use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};
use crate::render::backend::{RenderRequest, Renderer};

/// A fresh, unique temporary raster path inside `dir`.
pub fn temp_raster_path(dir: &Path) -> PathBuf {
    dir.join(format!("{}.png", uuid::Uuid::new_v4()))
}

/// Render one variant through `renderer` and read the raster back into memory.
///
/// `temp_path` is owned by this call: it is removed on every exit path. A failed removal after a
/// successful read is reported as an `Io` error.
pub fn render_to_bytes(
    renderer: &dyn Renderer,
    source: &Path,
    request: &RenderRequest,
    temp_path: &Path,
) -> SvgVariantsResult<Vec<u8>> {
    let guard = TempFileGuard(Some(temp_path.to_path_buf()));

    renderer.render(source, request, temp_path)?;
    let bytes = std::fs::read(temp_path).map_err(|e| {
        SvgVariantsError::io(format!(
            "read rendered raster '{}': {e}",
            temp_path.display()
        ))
    })?;
    guard.remove()?;
    Ok(bytes)
}

struct TempFileGuard(Option<PathBuf>);

impl TempFileGuard {
    fn remove(mut self) -> SvgVariantsResult<()> {
        let Some(path) = self.0.take() else {
            return Ok(());
        };
        std::fs::remove_file(&path).map_err(|e| {
            SvgVariantsError::io(format!("remove temp raster '{}': {e}", path.display()))
        })
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/invoke.rs"]
mod tests;
