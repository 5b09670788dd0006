//! Running generated scripts under `bash`.

use std::process::{Command, Output};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use camino::Utf8Path;

static BASH_AVAILABLE: LazyLock<bool> = LazyLock::new(|| {
    Command::new("bash")
        .arg("-c")
        .arg("true")
        .output()
        .is_ok_and(|output| output.status.success())
});

/// Whether a working `bash` is on `PATH`.
#[must_use]
pub fn bash_available() -> bool {
    *BASH_AVAILABLE
}

/// Exit status and captured streams of one script run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ScriptRun {
    /// Whether the script exited with status zero.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<Output> for ScriptRun {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs `script` as `bash <script> <args...>`.
///
/// # Errors
///
/// Returns an error if `bash` cannot be spawned.
pub fn run_script(script: &Utf8Path, args: &[&str]) -> Result<ScriptRun> {
    run_script_with_env(script, args, &[])
}

/// Runs `script` like [`run_script`] with `env` added to the inherited
/// environment.
///
/// # Errors
///
/// Returns an error if `bash` cannot be spawned.
pub fn run_script_with_env(
    script: &Utf8Path,
    args: &[&str],
    env: &[(&str, &str)],
) -> Result<ScriptRun> {
    let output = Command::new("bash")
        .arg(script.as_std_path())
        .args(args)
        .envs(env.iter().copied())
        .output()
        .with_context(|| format!("run bash {script}"))?;
    Ok(ScriptRun::from(output))
}
