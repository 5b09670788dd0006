//! Help-text compiler.

use crate::flag::Flag;
use crate::shell::ScriptBuffer;
use crate::shell::quote::single;

/// Name of the generated help function.
pub const HELP_FUNCTION: &str = "print_help";

/// One entry of the options listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    /// Space-joined forms, e.g. `-o --output`; empty for a nameless flag.
    pub names: String,
    /// Flag description.
    pub help: String,
    /// Default expression shown in brackets.
    pub default: String,
}

impl HelpLine {
    /// Builds the entry describing `flag`.
    #[must_use]
    pub fn for_flag(flag: &Flag) -> Self {
        let names = [flag.short_form(), flag.long_form()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            names,
            help: flag.help.clone(),
            default: flag.default.clone(),
        }
    }

    /// Returns the entry as printed, without the leading tab.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}: {} [{}]", self.names, self.help, self.default)
    }
}

/// Compiles the `print_help` function for a command.
///
/// The banner is `name` immediately followed by `preamble`, then a blank line,
/// `Options:` and one tab-indented [`HelpLine`] per flag. Every piece of text
/// is passed to `printf` as a single-quoted argument, never as the format.
///
/// # Examples
///
/// ```
/// use mkcli::compile::compile_help;
/// use mkcli::flag::Flag;
///
/// let flags = [Flag::new().with_short("o").with_long("out").with_help("Target")];
/// let code = compile_help("tool", " - does things", &flags);
/// assert!(code.contains("printf '\\t%s\\n' '-o --out: Target []'"));
/// ```
#[must_use]
pub fn compile_help(name: &str, preamble: &str, flags: &[Flag]) -> String {
    let mut buf = ScriptBuffer::new();
    buf.line(&format!("{HELP_FUNCTION}() {{"));
    buf.nested(|func| {
        func.line(&format!(
            "printf '%s\\n\\nOptions:\\n' {}",
            single(&format!("{name}{preamble}"))
        ));
        for line in flags.iter().map(HelpLine::for_flag) {
            func.line(&format!("printf '\\t%s\\n' {}", single(&line.text())));
        }
    });
    buf.line("}");
    buf.into_string()
}
