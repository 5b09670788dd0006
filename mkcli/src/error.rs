//! Error types for `mkcli`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `mkcli` generation pipeline.
#[derive(Debug, Error)]
pub enum MkcliError {
    /// A command declaration was rejected before any code was emitted.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// A template failed to load, parse, or render.
    #[error("failed to render {name}")]
    Render {
        /// Template name as requested by the caller.
        name: String,
        /// Underlying failure.
        #[source]
        source: RenderCause,
    },

    /// The template engine could not be constructed.
    #[error("failed to build the template parser: {0}")]
    Engine(#[source] liquid::Error),

    /// A path passed to the path utilities lies outside its expected root.
    #[error("{path} is not below {root}")]
    OutsideRoot {
        /// Offending path.
        path: Utf8PathBuf,
        /// Root the path was expected to live under.
        root: Utf8PathBuf,
    },

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path the operation targeted.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Underlying cause of a template render failure.
#[derive(Debug, Error)]
pub enum RenderCause {
    /// The template file could not be read.
    #[error("could not read template: {0}")]
    Read(#[from] std::io::Error),

    /// The template engine rejected or failed to render the template.
    #[error(transparent)]
    Liquid(#[from] liquid::Error),
}

/// Declaration errors detected while validating a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command name cannot be used as a shell function name.
    #[error("invalid command name '{0}'")]
    InvalidName(String),

    /// A flag declares neither a short nor a long form.
    #[error("flag #{index} of '{command}' has neither a short nor a long name")]
    NamelessFlag {
        /// Command owning the flag.
        command: String,
        /// Zero-based position of the flag in the declaration.
        index: usize,
    },

    /// A short or long flag name contains characters unsafe in a `case` pattern.
    #[error("invalid flag name '{name}' in '{command}'")]
    InvalidFlagName {
        /// Command owning the flag.
        command: String,
        /// Offending name as written on the command line.
        name: String,
    },

    /// The derived storage variable is not a valid shell identifier.
    #[error("flag '{flag}' in '{command}' derives the invalid variable name '{var}'")]
    InvalidVariable {
        /// Command owning the flag.
        command: String,
        /// Flag as written on the command line.
        flag: String,
        /// Derived variable name.
        var: String,
    },

    /// The derived storage variable is one bash itself sets or reads.
    #[error("flag '{flag}' in '{command}' would shadow the shell variable '{var}'")]
    ReservedVariable {
        /// Command owning the flag.
        command: String,
        /// Flag as written on the command line.
        flag: String,
        /// Derived variable name.
        var: String,
    },

    /// A flag claims one of the reserved help forms.
    #[error("flag '{form}' in '{command}' is reserved for help output")]
    ReservedFlag {
        /// Command owning the flag.
        command: String,
        /// Reserved form as written on the command line.
        form: String,
    },

    /// Two flags share a surface form or a storage variable.
    #[error("'{form}' is declared more than once in '{command}'")]
    DuplicateFlag {
        /// Command owning the flags.
        command: String,
        /// Duplicated form or variable name.
        form: String,
    },
}

impl MkcliError {
    /// Wraps an I/O error with the path it occurred at.
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps a render failure with the template name.
    pub(crate) fn render(name: &str, source: impl Into<RenderCause>) -> Self {
        Self::Render {
            name: name.to_owned(),
            source: source.into(),
        }
    }
}
