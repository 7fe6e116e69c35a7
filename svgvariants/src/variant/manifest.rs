use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};
use crate::variant::spec::{NameRule, VariantSpec};

/// JSON description of a conversion run.
///
/// ```json
/// {
///   "max_concurrency": 4,
///   "scale": 2.0,
///   "variants": [
///     { "width": 32, "name": "icons/{name}_32" },
///     { "height": 64 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantManifest {
    /// Overrides the default concurrency ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
    /// Global scale factor for explicitly sized documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Requested renditions.
    pub variants: Vec<ManifestVariant>,
}

/// One variant entry of a [`VariantManifest`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestVariant {
    /// Requested width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Requested height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Name template; `{name}` is the source base name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VariantManifest {
    /// Read and validate a manifest file.
    pub fn from_path(path: &Path) -> SvgVariantsResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate manifest JSON.
    pub fn from_json_str(text: &str) -> SvgVariantsResult<Self> {
        let manifest: Self = serde_json::from_str(text)
            .map_err(|e| SvgVariantsError::validation(format!("invalid manifest json: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check values the scheduler and resolver cannot accept.
    pub fn validate(&self) -> SvgVariantsResult<()> {
        if self.max_concurrency == Some(0) {
            return Err(SvgVariantsError::validation(
                "manifest max_concurrency must be >= 1",
            ));
        }
        if let Some(s) = self.scale
            && !(s.is_finite() && s >= 0.0)
        {
            return Err(SvgVariantsError::validation(format!(
                "manifest scale must be a finite, non-negative number, got {s}"
            )));
        }
        for (i, v) in self.variants.iter().enumerate() {
            if v.name.as_deref() == Some("") {
                return Err(SvgVariantsError::validation(format!(
                    "manifest variant #{i} has an empty name"
                )));
            }
            if let Some(name) = &v.name {
                NameRule::Template(name.clone()).validate().map_err(|e| {
                    SvgVariantsError::validation(format!("manifest variant #{i}: {e}"))
                })?;
            }
        }
        Ok(())
    }

    /// Convert the entries into scheduler-ready variants.
    pub fn variant_specs(&self) -> Vec<VariantSpec> {
        self.variants
            .iter()
            .map(|v| {
                let name = v
                    .name
                    .clone()
                    .map(NameRule::Template)
                    .unwrap_or_default();
                VariantSpec::new(v.width, v.height, name)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/variant/manifest.rs"]
mod tests;
