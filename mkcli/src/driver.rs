//! Build driver: renders one template and writes everything it produced.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::assembler::{GeneratedArtifacts, write_artifacts};
use crate::error::MkcliError;
use crate::fs_helpers::{copy_mode, write_text};
use crate::render::RenderEngine;

/// Inputs of a single build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Template name, relative to `template_dir`.
    pub input: String,
    /// Where the rendered template is written.
    pub output: Utf8PathBuf,
    /// Root of the `bin/` and `.zsh/completion/` artifact tree.
    pub build_dir: Utf8PathBuf,
    /// Directory templates and `readfile` targets are resolved against.
    pub template_dir: Utf8PathBuf,
}

impl Default for BuildRequest {
    fn default() -> Self {
        Self {
            input: "base.sh".to_owned(),
            output: Utf8PathBuf::from("getambient.sh"),
            build_dir: Utf8PathBuf::from("build"),
            template_dir: Utf8PathBuf::from("."),
        }
    }
}

/// Paths written by [`build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// The rendered template.
    pub output: Utf8PathBuf,
    /// Artifacts of every assembled command, in render order.
    pub artifacts: Vec<GeneratedArtifacts>,
}

impl BuildReport {
    /// Every written path: command artifacts first, then the output.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.artifacts
            .iter()
            .flat_map(GeneratedArtifacts::files)
            .chain(std::iter::once(self.output.as_path()))
    }
}

/// Renders `request.input` and writes the output and all command artifacts.
///
/// Nothing is written unless rendering succeeds. Artifacts are written
/// before the output; a failure part way leaves earlier files in place.
///
/// # Errors
///
/// Returns [`MkcliError::Render`] if the template fails and
/// [`MkcliError::Io`] if any file cannot be written or its mode copied.
pub fn build(request: &BuildRequest) -> Result<BuildReport, MkcliError> {
    debug!(input = %request.input, template_dir = %request.template_dir, "starting build");
    let rendered = RenderEngine::new(request.template_dir.clone()).render(&request.input)?;

    let artifacts = rendered
        .commands
        .iter()
        .map(|command| write_artifacts(&request.build_dir, command))
        .collect::<Result<Vec<_>, _>>()?;

    let output = write_text(&request.output, &rendered.text)?;
    copy_mode(&request.template_dir.join(&request.input), &output)?;
    info!(output = %output, commands = artifacts.len(), "build finished");

    Ok(BuildReport { output, artifacts })
}
