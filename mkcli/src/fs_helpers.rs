//! Filesystem helpers shared across `mkcli` modules.
//!
//! Directory handles are opened with ambient authority from the path the
//! caller supplies; files are then created relative to those handles.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;

use crate::error::MkcliError;

/// Opens a directory, creating it and its parents when missing.
///
/// # Errors
///
/// Returns [`MkcliError::Io`] if the directory cannot be created or opened.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, MkcliError> {
    let path = non_empty(path);
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| MkcliError::io(path, io_err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|io_err| MkcliError::io(path, io_err))
        }
        Err(open_err) => Err(MkcliError::io(path, open_err)),
    }
}

/// Writes `content` to `filename` inside `dir`, truncating any existing file.
///
/// `dir_path` is only used to report the written path and errors.
///
/// # Errors
///
/// Returns [`MkcliError::Io`] if the file cannot be opened or written.
pub fn write_in_dir(
    dir: &Dir,
    dir_path: &Utf8Path,
    filename: &str,
    content: &str,
) -> Result<Utf8PathBuf, MkcliError> {
    let file_path = dir_path.join(filename);
    let mut file = dir
        .open_with(
            filename,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| MkcliError::io(&file_path, io_err))?;
    file.write_all(content.as_bytes())
        .map_err(|io_err| MkcliError::io(&file_path, io_err))?;
    Ok(file_path)
}

/// Writes `content` to `path`, creating its parent directory first.
///
/// # Errors
///
/// Returns [`MkcliError::Io`] if the parent cannot be created or the file
/// cannot be written.
pub fn write_text(path: &Utf8Path, content: &str) -> Result<Utf8PathBuf, MkcliError> {
    let (parent, filename) = split_file(path)?;
    let dir = ensure_dir(parent)?;
    write_in_dir(&dir, parent, filename, content)?;
    Ok(path.to_path_buf())
}

/// Reads `relative` below the directory `root` as UTF-8 text.
///
/// Paths escaping `root` (absolute paths, `..`) are refused by the
/// directory handle.
///
/// # Errors
///
/// Returns the raw [`std::io::Error`] so callers can attach their own context.
pub fn read_below(root: &Utf8Path, relative: &str) -> std::io::Result<String> {
    let dir = Dir::open_ambient_dir(non_empty(root), ambient_authority())?;
    dir.read_to_string(relative)
}

/// Copies the permission bits of `source` onto `target`.
///
/// # Errors
///
/// Returns [`MkcliError::Io`] if either path cannot be inspected or updated.
pub fn copy_mode(source: &Utf8Path, target: &Utf8Path) -> Result<(), MkcliError> {
    let permissions = std::fs::metadata(source)
        .map_err(|io_err| MkcliError::io(source, io_err))?
        .permissions();
    std::fs::set_permissions(target, permissions).map_err(|io_err| MkcliError::io(target, io_err))
}

/// Marks `path` as executable by everyone and writable by its owner.
///
/// # Errors
///
/// Returns [`MkcliError::Io`] if the permissions cannot be changed.
#[cfg(unix)]
pub fn mark_executable(path: &Utf8Path) -> Result<(), MkcliError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|io_err| MkcliError::io(path, io_err))
}

/// Marks `path` as executable; a no-op where permission bits do not exist.
///
/// # Errors
///
/// Never fails on this platform.
#[cfg(not(unix))]
pub fn mark_executable(_path: &Utf8Path) -> Result<(), MkcliError> {
    Ok(())
}

/// Maps `file` below `root` to the same relative position below `build_root`.
///
/// The parent directory of the returned path is created.
///
/// This is a library entry point for build scripts that render a whole
/// template tree into a mirrored build tree. The `mkcli` binary renders a
/// single template and does not call it.
///
/// # Errors
///
/// Returns [`MkcliError::OutsideRoot`] if `file` is not below `root`, or
/// [`MkcliError::Io`] if the parent directory cannot be created.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use mkcli::fs_helpers::mirror_output_path;
///
/// let out = mirror_output_path(
///     Utf8Path::new("src/tools/sync.sh"),
///     Utf8Path::new("src"),
///     Utf8Path::new("build"),
/// )?;
/// assert_eq!(out, "build/tools/sync.sh");
/// # Ok::<(), mkcli::error::MkcliError>(())
/// ```
pub fn mirror_output_path(
    file: &Utf8Path,
    root: &Utf8Path,
    build_root: &Utf8Path,
) -> Result<Utf8PathBuf, MkcliError> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| MkcliError::OutsideRoot {
            path: file.to_path_buf(),
            root: root.to_path_buf(),
        })?;
    let mirrored = build_root.join(relative);
    let (parent, _) = split_file(&mirrored)?;
    ensure_dir(parent)?;
    Ok(mirrored)
}

fn split_file(path: &Utf8Path) -> Result<(&Utf8Path, &str), MkcliError> {
    let filename = path.file_name().ok_or_else(|| {
        MkcliError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let parent = path.parent().map_or(Utf8Path::new("."), non_empty);
    Ok((parent, filename))
}

fn non_empty(path: &Utf8Path) -> &Utf8Path {
    if path.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        path
    }
}
