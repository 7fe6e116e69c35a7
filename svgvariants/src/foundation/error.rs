/// Convenience result type used across svgvariants.
pub type SvgVariantsResult<T> = Result<T, SvgVariantsError>;

/// Error taxonomy for conversion runs.
///
/// `Load`, `Geometry`, `Render` and `Io` are per-variant failures: the scheduler reports them as
/// the terminal state of one variant and keeps going. `Validation` is raised before a run starts.
#[derive(thiserror::Error, Debug)]
pub enum SvgVariantsError {
    /// Invalid caller-provided options or variant descriptors.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source document could not be read or parsed by the renderer.
    #[error("load error: {0}")]
    Load(String),

    /// Computing the output dimensions failed.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// The renderer failed or reported diagnostics.
    #[error("render error: {0}")]
    Render(String),

    /// Reading or removing a temporary raster failed.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgVariantsError {
    /// Build a [`SvgVariantsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SvgVariantsError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`SvgVariantsError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`SvgVariantsError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SvgVariantsError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
