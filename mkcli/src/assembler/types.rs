//! Result types for command assembly.

use camino::{Utf8Path, Utf8PathBuf};

/// The two artifacts generated for one command, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledCommand {
    /// Command name, used for the artifact file names.
    pub name: String,
    /// Complete bash script defining and invoking the command.
    pub script: String,
    /// zsh completion definition.
    pub completion: String,
}

/// Paths written for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    /// `<build>/bin/<name>`.
    pub command: Utf8PathBuf,
    /// `<build>/.zsh/completion/_<name>`.
    pub completion: Utf8PathBuf,
}

impl GeneratedArtifacts {
    /// Returns the written paths, completion first, in write order.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        [self.completion.as_path(), self.command.as_path()].into_iter()
    }
}
