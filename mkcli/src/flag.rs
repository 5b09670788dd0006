//! Declarative flag model.
//!
//! A [`Flag`] describes one option of a generated command. It has no runtime
//! existence: every compiler reads it and emits text.

/// Value stored in a presence-only flag's variable when it is supplied.
pub const PRESENCE_SENTINEL: &str = "on";

/// One command-line option of a generated command.
///
/// Empty strings mean "absent" for every textual attribute, so a flag built
/// with [`Flag::default`] declares nothing.
///
/// # Examples
///
/// ```
/// use mkcli::flag::Flag;
///
/// let flag = Flag::new()
///     .with_long("dry-run")
///     .with_short("n")
///     .with_help("Print actions without running them")
///     .presence_only();
/// assert_eq!(flag.var(), "dry_run");
/// assert!(!flag.takes_value());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flag {
    /// Long name without dashes (`output` renders as `--output`).
    pub long: String,
    /// Short name without the dash (`o` renders as `-o`).
    pub short: String,
    /// Shell value expression assigned verbatim when the flag is unset.
    pub default: String,
    /// Human-readable description.
    pub help: String,
    /// Whether the flag records presence instead of taking a value.
    pub flag_only: bool,
}

impl Flag {
    /// Creates a flag with no names, no default and no help.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the long name.
    #[must_use]
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    /// Sets the short name.
    #[must_use]
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    /// Sets the default shell expression.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Marks the flag as presence-only.
    #[must_use]
    pub fn presence_only(mut self) -> Self {
        self.flag_only = true;
        self
    }

    /// Returns `true` when the flag declares a short form.
    #[must_use]
    pub const fn has_short(&self) -> bool {
        !self.short.is_empty()
    }

    /// Returns `true` when the flag declares a long form.
    #[must_use]
    pub const fn has_long(&self) -> bool {
        !self.long.is_empty()
    }

    /// Returns `true` when the flag consumes a value.
    #[must_use]
    pub const fn takes_value(&self) -> bool {
        !self.flag_only
    }

    /// Returns `true` when the flag declares a default expression.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        !self.default.is_empty()
    }

    /// Returns the short form as written on the command line, e.g. `-o`.
    #[must_use]
    pub fn short_form(&self) -> Option<String> {
        self.has_short().then(|| format!("-{}", self.short))
    }

    /// Returns the long form as written on the command line, e.g. `--output`.
    #[must_use]
    pub fn long_form(&self) -> Option<String> {
        self.has_long().then(|| format!("--{}", self.long))
    }

    /// Returns the first declared form, preferring the long one.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.long_form()
            .or_else(|| self.short_form())
            .unwrap_or_default()
    }

    /// Returns the shell variable the flag's value is stored under.
    ///
    /// Derived from the long name with `-` replaced by `_`, falling back to
    /// the short name when no long name is declared. Empty only when the flag
    /// has no names at all.
    #[must_use]
    pub fn var(&self) -> String {
        let source = if self.has_long() {
            &self.long
        } else {
            &self.short
        };
        source.replace('-', "_")
    }
}
