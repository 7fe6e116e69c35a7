use std::path::{Path, PathBuf};

use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};

/// The SVG file every variant of a run is rendered from.
///
/// The scheduler only ever reads it; the base name (file stem) feeds output naming.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    base_name: String,
}

impl SourceDocument {
    /// Create a handle for `path`, deriving the base name from its file stem.
    pub fn new(path: impl Into<PathBuf>) -> SvgVariantsResult<Self> {
        let path = path.into();
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SvgVariantsError::validation(format!(
                    "source path '{}' has no file name",
                    path.display()
                ))
            })?;
        Ok(Self { path, base_name })
    }

    /// Filesystem path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
