//! Temporary directories holding templates for driver tests.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory removed on drop.
pub struct TemplateWorkspace {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl TemplateWorkspace {
    /// Creates an empty workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("temp dir is not valid UTF-8: {}", path.display()))?;
        Ok(Self { _temp: temp, root })
    }

    /// Workspace root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the workspace.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Writes `content` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn write_template(&self, relative: &str, content: &str) -> Result<Utf8PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, content).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Like [`Self::write_template`], then sets the Unix mode to `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or its mode changed.
    #[cfg(unix)]
    pub fn write_with_mode(&self, relative: &str, content: &str, mode: u32) -> Result<Utf8PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.write_template(relative, content)?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))
            .with_context(|| format!("chmod {path}"))?;
        Ok(path)
    }

    /// Reads `relative` as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.path(relative);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
