use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};
use crate::render::backend::{RenderRequest, Renderer};

/// Renderer that runs one external process per variant.
///
/// The process is invoked as `program [args..] <source> <dest> <width> <height> [scale]`, with
/// `0` for an axis to infer and the scale only present when set. It must write the raster to
/// `dest` and print nothing: any stdout or stderr output is reported as an error even when the
/// exit status is success.
#[derive(Clone, Debug)]
pub struct ProcessRenderer {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ProcessRenderer {
    /// Run `program` with no leading arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the positional render arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The program this renderer spawns.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, source: &Path, request: &RenderRequest, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .args(&self.args)
            .arg(source)
            .arg(dest)
            .arg(request.width.unwrap_or(0).to_string())
            .arg(request.height.unwrap_or(0).to_string());
        if let Some(scale) = request.scale {
            cmd.arg(scale.to_string());
        }
        cmd
    }
}

impl Renderer for ProcessRenderer {
    #[tracing::instrument(skip(self))]
    fn render(
        &self,
        source: &Path,
        request: &RenderRequest,
        dest: &Path,
    ) -> SvgVariantsResult<()> {
        let output = self
            .command(source, request, dest)
            .output()
            .map_err(|e| {
                SvgVariantsError::render(format!(
                    "failed to spawn renderer '{}': {e}",
                    self.program.display()
                ))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(SvgVariantsError::render(format!(
                "renderer exited with status {}: {detail}",
                output.status
            )));
        }
        if !output.stdout.is_empty() {
            return Err(SvgVariantsError::render(stdout.trim().to_owned()));
        }
        if !output.stderr.is_empty() {
            return Err(SvgVariantsError::render(stderr.trim().to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/process.rs"]
mod tests;
