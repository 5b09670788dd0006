//! Command-line interface definitions for `mkcli`.

use camino::Utf8PathBuf;
use clap::Parser;

use mkcli::driver::BuildRequest;

/// Parsed CLI arguments for `mkcli`.
#[derive(Debug, Parser)]
#[command(name = "mkcli")]
#[command(about = "Render a template into bash commands with zsh completions")]
#[command(version)]
pub struct Args {
    /// Template to render, relative to the template directory.
    #[arg(long, env = "MKCLI_INPUT", value_name = "path", default_value = "base.sh")]
    pub input: String,
    /// File the rendered template is written to.
    #[arg(long, env = "MKCLI_OUTPUT", value_name = "path", default_value = "getambient.sh")]
    pub output: Utf8PathBuf,
    /// Root of the generated `bin/` and `.zsh/completion/` tree.
    #[arg(long, env = "MKCLI_BUILD_DIR", value_name = "dir", default_value = "build")]
    pub build_dir: Utf8PathBuf,
    /// Directory templates are loaded from.
    #[arg(long, env = "MKCLI_TEMPLATE_DIR", value_name = "dir", default_value = ".")]
    pub template_dir: Utf8PathBuf,
}

impl Args {
    /// Converts the arguments into a build request.
    pub fn into_request(self) -> BuildRequest {
        BuildRequest {
            input: self.input,
            output: self.output,
            build_dir: self.build_dir,
            template_dir: self.template_dir,
        }
    }
}
