//! Artifact writer placing generated files inside the build tree.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;

use crate::error::MkcliError;
use crate::fs_helpers::{ensure_dir, mark_executable, write_in_dir};

const BIN_DIR: &str = "bin";
const COMPLETION_DIR: &str = ".zsh/completion";

/// Writes the completion to `<build>/.zsh/completion/_<name>`.
pub fn write_completion(
    build_root: &Utf8Path,
    build_dir: &Dir,
    name: &str,
    content: &str,
) -> Result<Utf8PathBuf, MkcliError> {
    let filename = format!("_{name}");
    write_below(build_root, build_dir, COMPLETION_DIR, &filename, content)
}

/// Writes the command script to `<build>/bin/<name>` and marks it executable.
pub fn write_command(
    build_root: &Utf8Path,
    build_dir: &Dir,
    name: &str,
    content: &str,
) -> Result<Utf8PathBuf, MkcliError> {
    let path = write_below(build_root, build_dir, BIN_DIR, name, content)?;
    mark_executable(&path)?;
    Ok(path)
}

fn write_below(
    build_root: &Utf8Path,
    build_dir: &Dir,
    subdir: &str,
    filename: &str,
    content: &str,
) -> Result<Utf8PathBuf, MkcliError> {
    let subdir_path = build_root.join(subdir);
    build_dir
        .create_dir_all(subdir)
        .map_err(|io_err| MkcliError::io(&subdir_path, io_err))?;
    let handle = build_dir
        .open_dir(subdir)
        .map_err(|io_err| MkcliError::io(&subdir_path, io_err))?;
    write_in_dir(&handle, &subdir_path, filename, content)
}

/// Opens (creating if needed) the build root.
pub fn open_build_root(build_root: &Utf8Path) -> Result<Dir, MkcliError> {
    ensure_dir(build_root)
}
