//! Command assembler.
//!
//! Composes the parser, help and completion compilers with a caller-supplied
//! body into a self-contained bash command, and writes the command and its
//! completion into a build tree:
//!
//! ```text
//! <build>/bin/<name>
//! <build>/.zsh/completion/_<name>
//! ```

mod types;
mod writer;

pub use types::{AssembledCommand, GeneratedArtifacts};

use camino::Utf8Path;
use tracing::{debug, info};

use crate::command::Command;
use crate::compile::parser::{PARSE_FUNCTION, POSITIONALS};
use crate::compile::{HELP_STATUS, compile_completion, compile_help, compile_parser};
use crate::error::MkcliError;
use crate::shell::ScriptBuffer;

const SHEBANG: &str = "#!/usr/bin/env bash";

/// Local holding the parser status; flag variables never start with `_`.
const STATUS: &str = "_ret";

/// Validates `command` and compiles its script and completion.
///
/// # Errors
///
/// Returns [`MkcliError::Command`] when the declaration is rejected by
/// [`Command::validate`].
///
/// # Examples
///
/// ```
/// use mkcli::assembler::assemble;
/// use mkcli::command::Command;
/// use mkcli::flag::Flag;
///
/// let command = Command::new("greet")
///     .with_flag(Flag::new().with_long("name").with_default("world"))
///     .with_body("echo \"hello $name\"");
/// let assembled = assemble(&command)?;
/// assert!(assembled.script.starts_with("#!/usr/bin/env bash\nfunction greet() {\n"));
/// assert!(assembled.script.ends_with("}\ngreet \"$@\"\n"));
/// # Ok::<(), mkcli::error::MkcliError>(())
/// ```
pub fn assemble(command: &Command) -> Result<AssembledCommand, MkcliError> {
    command.validate()?;
    debug!(
        command = %command.name,
        flags = command.flags.len(),
        "assembling command"
    );
    Ok(AssembledCommand {
        name: command.name.clone(),
        script: render_script(command),
        completion: compile_completion(&command.name, &command.flags),
    })
}

/// Writes both artifacts of `assembled` below `build_root`.
///
/// Parent directories are created as needed. The completion is written
/// first; a failure leaves earlier files in place.
///
/// # Errors
///
/// Returns [`MkcliError::Io`] if a directory or file cannot be written.
pub fn write_artifacts(
    build_root: &Utf8Path,
    assembled: &AssembledCommand,
) -> Result<GeneratedArtifacts, MkcliError> {
    let build_dir = writer::open_build_root(build_root)?;
    let completion = writer::write_completion(
        build_root,
        &build_dir,
        &assembled.name,
        &assembled.completion,
    )?;
    let command = writer::write_command(build_root, &build_dir, &assembled.name, &assembled.script)?;
    info!(command = %command, completion = %completion, "wrote command artifacts");
    Ok(GeneratedArtifacts {
        command,
        completion,
    })
}

/// Assembles `command` and writes its artifacts below `build_root`.
///
/// Returns the assembled command together with the written paths.
///
/// # Errors
///
/// Returns the errors of [`assemble`] and [`write_artifacts`].
pub fn generate(
    build_root: &Utf8Path,
    command: &Command,
) -> Result<(AssembledCommand, GeneratedArtifacts), MkcliError> {
    let assembled = assemble(command)?;
    let artifacts = write_artifacts(build_root, &assembled)?;
    Ok((assembled, artifacts))
}

fn render_script(command: &Command) -> String {
    let mut buf = ScriptBuffer::new();
    buf.line(SHEBANG);
    buf.line(&format!("function {}() {{", command.name));
    buf.nested(|func| {
        for flag in &command.flags {
            func.line(&format!("local {}", flag.var()));
        }
        func.line(&format!("local -a {POSITIONALS}=()"));
        func.blank();
        func.block(&compile_help(&command.name, &command.help, &command.flags));
        emit_die(func);
        func.block(&compile_parser(&command.flags));
        func.blank();
        emit_dispatch(func);
    });
    buf.verbatim(&command.body);
    buf.line("}");
    buf.line(&format!("{} \"$@\"", command.name));
    buf.into_string()
}

fn emit_die(buf: &mut ScriptBuffer) {
    buf.line("die() {");
    buf.nested(|func| {
        func.line("test \"${_PRINT_HELP:-no}\" = yes && print_help >&2");
        func.line("echo \"$1\" >&2");
        func.line("return 1");
    });
    buf.line("}");
}

fn emit_dispatch(buf: &mut ScriptBuffer) {
    buf.line(&format!("{PARSE_FUNCTION} \"$@\""));
    buf.line(&format!("local {STATUS}=$?"));
    buf.line(&format!("if [[ ${STATUS} == {HELP_STATUS} ]]; then"));
    buf.nested(|then| then.line("return 0"));
    buf.line("fi");
    buf.line(&format!("if [[ ${STATUS} != 0 ]]; then"));
    buf.nested(|then| then.line(&format!("return ${STATUS}")));
    buf.line("fi");
    buf.line(&format!("set -- \"${{{POSITIONALS}[@]}}\""));
}
