//! Command declarations and their generation-time validation.

use std::collections::HashSet;

use crate::error::CommandError;
use crate::flag::Flag;

/// Forms claimed by the generated help handling.
const RESERVED_SHORT: &str = "h";
const RESERVED_LONG: &str = "help";

/// Variables with special meaning to bash or to the programs it runs.
const SHELL_VARIABLES: &[&str] = &[
    "BASH", "BASHOPTS", "BASHPID", "CDPATH", "COLUMNS", "DIRSTACK", "ENV", "EPOCHREALTIME",
    "EPOCHSECONDS", "EUID", "FUNCNAME", "GLOBIGNORE", "GROUPS", "HISTFILE", "HOME", "HOSTNAME",
    "HOSTTYPE", "IFS", "LANG", "LINENO", "LINES", "MACHTYPE", "OLDPWD", "OPTARG", "OPTERR",
    "OPTIND", "OSTYPE", "PATH", "PIPESTATUS", "PPID", "PS1", "PS2", "PS3", "PS4", "PWD",
    "RANDOM", "REPLY", "SECONDS", "SHELL", "SHELLOPTS", "SHLVL", "SRANDOM", "TMPDIR", "UID",
];

/// Prefixes of bash-managed variable families.
const SHELL_VARIABLE_PREFIXES: &[&str] = &["BASH_", "COMP_", "LC_", "HIST"];

/// A generated command: a name, its flags, a help preamble and a body.
///
/// # Examples
///
/// ```
/// use mkcli::command::Command;
/// use mkcli::flag::Flag;
///
/// let command = Command::new("greet")
///     .with_help(" - print a greeting")
///     .with_flag(Flag::new().with_long("name").with_short("n"))
///     .with_body("echo \"hello $name\"");
/// assert!(command.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Shell function and file name of the command.
    pub name: String,
    /// Text appended to the name in the usage banner.
    pub help: String,
    /// Ordered flag declarations.
    pub flags: Vec<Flag>,
    /// Shell statements run after parsing.
    pub body: String,
}

impl Command {
    /// Creates a command with no flags, help or body.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the help preamble.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Appends a flag declaration.
    #[must_use]
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Appends several flag declarations in order.
    #[must_use]
    pub fn with_flags(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.flags.extend(flags);
        self
    }

    /// Sets the body run after parsing.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Checks the declaration for mistakes the generated parser cannot handle.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] for an unusable command name, a flag with no
    /// names, a flag name or derived variable unsafe in shell code, a derived
    /// variable bash manages itself (`PATH`, `IFS`, `BASH_*`, ...), a flag
    /// claiming `-h`/`--help`, or two flags sharing a form or variable.
    pub fn validate(&self) -> Result<(), CommandError> {
        if !is_command_name(&self.name) {
            return Err(CommandError::InvalidName(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for (index, flag) in self.flags.iter().enumerate() {
            if !flag.has_short() && !flag.has_long() {
                return Err(CommandError::NamelessFlag {
                    command: self.name.clone(),
                    index,
                });
            }
            self.check_names(flag)?;
            self.check_variable(flag)?;

            let claims = [
                flag.short_form(),
                flag.long_form(),
                Some(format!("${}", flag.var())),
            ];
            for claim in claims.into_iter().flatten() {
                if !seen.insert(claim.clone()) {
                    return Err(CommandError::DuplicateFlag {
                        command: self.name.clone(),
                        form: claim,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_names(&self, flag: &Flag) -> Result<(), CommandError> {
        let forms = [
            (flag.short.as_str(), flag.short_form(), RESERVED_SHORT),
            (flag.long.as_str(), flag.long_form(), RESERVED_LONG),
        ];
        for (name, form, reserved) in forms {
            let Some(form) = form else { continue };
            if !is_flag_name(name) {
                return Err(CommandError::InvalidFlagName {
                    command: self.name.clone(),
                    name: form,
                });
            }
            if name == reserved {
                return Err(CommandError::ReservedFlag {
                    command: self.name.clone(),
                    form,
                });
            }
        }
        Ok(())
    }

    fn check_variable(&self, flag: &Flag) -> Result<(), CommandError> {
        let var = flag.var();
        if !is_identifier(&var) {
            return Err(CommandError::InvalidVariable {
                command: self.name.clone(),
                flag: flag.display_name(),
                var,
            });
        }
        if is_shell_variable(&var) {
            return Err(CommandError::ReservedVariable {
                command: self.name.clone(),
                flag: flag.display_name(),
                var,
            });
        }
        Ok(())
    }
}

/// Returns `true` for variables bash sets or interprets; a `local` of one
/// would change the behaviour of the command body.
fn is_shell_variable(name: &str) -> bool {
    SHELL_VARIABLES.contains(&name)
        || SHELL_VARIABLE_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

/// Returns `true` for names usable as a bash function and completion file.
fn is_command_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// Returns `true` for names safe inside an unquoted `case` pattern.
fn is_flag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphanumeric())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// Returns `true` for valid shell variable names.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
