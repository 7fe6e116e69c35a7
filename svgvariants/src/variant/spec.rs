use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};

/// Extension appended to every output name.
pub const OUTPUT_EXTENSION: &str = "png";

/// Maps a source base name to an output path (without extension).
#[derive(Clone, Default)]
pub enum NameRule {
    /// Use the base name unchanged.
    #[default]
    Keep,
    /// Replace every `{name}` with the base name; `/` separates directories.
    Template(String),
    /// Arbitrary mapping.
    Custom(Arc<dyn Fn(&str) -> PathBuf + Send + Sync>),
}

impl NameRule {
    /// Build a [`NameRule::Custom`] from a closure.
    pub fn custom(f: impl Fn(&str) -> PathBuf + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Reject templates with `..` segments, which would leave the output directory.
    pub fn validate(&self) -> SvgVariantsResult<()> {
        if let Self::Template(t) = self
            && t.split('/').any(|segment| segment == "..")
        {
            return Err(SvgVariantsError::validation(format!(
                "name template '{t}' must not contain '..'"
            )));
        }
        Ok(())
    }

    fn apply(&self, base_name: &str) -> PathBuf {
        match self {
            Self::Keep => PathBuf::from(base_name),
            Self::Template(t) => t
                .replace("{name}", base_name)
                .split('/')
                .filter(|c| !c.is_empty())
                .collect(),
            Self::Custom(f) => f(base_name),
        }
    }
}

impl fmt::Debug for NameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => f.write_str("Keep"),
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One requested rendition of the source document.
///
/// `None` for an axis means "infer from the document".
#[derive(Clone, Debug, Default)]
pub struct VariantSpec {
    /// Requested width in pixels.
    pub width: Option<u32>,
    /// Requested height in pixels.
    pub height: Option<u32>,
    /// Output naming rule.
    pub name: NameRule,
}

impl VariantSpec {
    /// A variant with the given size and naming rule. Zero sizes count as absent.
    pub fn new(width: Option<u32>, height: Option<u32>, name: NameRule) -> Self {
        Self {
            width: width.filter(|w| *w > 0),
            height: height.filter(|h| *h > 0),
            name,
        }
    }

    /// A width-only variant named by `template`.
    pub fn width(width: u32, template: impl Into<String>) -> Self {
        Self::new(Some(width), None, NameRule::Template(template.into()))
    }

    /// Relative output path for a source with `base_name`, `.png` appended.
    pub fn output_path(&self, base_name: &str) -> PathBuf {
        let mut path = self.name.apply(base_name).into_os_string();
        path.push(".");
        path.push(OUTPUT_EXTENSION);
        PathBuf::from(path)
    }
}

/// Parses `<W>x<H>[:<template>]`, e.g. `32x32:icons/{name}_32`, `64x`, `x48` or `x`.
impl FromStr for VariantSpec {
    type Err = SvgVariantsError;

    fn from_str(s: &str) -> SvgVariantsResult<Self> {
        let (size, template) = match s.split_once(':') {
            Some((size, template)) => (size, Some(template)),
            None => (s, None),
        };
        let (w, h) = size.trim().split_once(['x', 'X']).ok_or_else(|| {
            SvgVariantsError::validation(format!(
                "variant '{s}' must look like <width>x<height>[:<name>]"
            ))
        })?;

        let name = match template {
            Some(t) if t.is_empty() => {
                return Err(SvgVariantsError::validation(format!(
                    "variant '{s}' has an empty name template"
                )));
            }
            Some(t) => NameRule::Template(t.to_owned()),
            None => NameRule::Keep,
        };
        name.validate()?;

        Ok(Self::new(parse_axis(s, w)?, parse_axis(s, h)?, name))
    }
}

/// `true` when `path` is relative and never steps above its starting directory.
pub(crate) fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn parse_axis(descriptor: &str, raw: &str) -> SvgVariantsResult<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>().map(|v| Some(v).filter(|v| *v > 0)).map_err(|_| {
        SvgVariantsError::validation(format!("variant '{descriptor}' has invalid size '{raw}'"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/variant/spec.rs"]
mod tests;
