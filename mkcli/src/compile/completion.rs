//! Completion compiler producing zsh `_arguments` definitions.

use crate::flag::Flag;
use crate::shell::ScriptBuffer;
use crate::shell::quote::zsh_description;

/// One `_arguments` specification describing a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
    /// Forms excluded once this flag is present (its own forms).
    pub exclusions: Vec<String>,
    /// Forms offered for completion, each with its argument separator.
    pub forms: Vec<String>,
    /// Flag description.
    pub description: String,
}

impl CompletionEntry {
    /// Builds the entry for `flag`, or `None` when it declares no forms.
    ///
    /// Value-taking short forms use the `+` separator (value attached or in
    /// the next word); value-taking long forms use `=`.
    #[must_use]
    pub fn for_flag(flag: &Flag) -> Option<Self> {
        let (short_sep, long_sep) = if flag.takes_value() {
            ("+", "=")
        } else {
            ("", "")
        };
        let mut exclusions = Vec::with_capacity(2);
        let mut forms = Vec::with_capacity(2);
        if let Some(short) = flag.short_form() {
            forms.push(format!("{short}{short_sep}"));
            exclusions.push(short);
        }
        if let Some(long) = flag.long_form() {
            forms.push(format!("{long}{long_sep}"));
            exclusions.push(long);
        }
        (!forms.is_empty()).then(|| Self {
            exclusions,
            forms,
            description: flag.help.clone(),
        })
    }

    /// Renders the specification as one `args` array element.
    #[must_use]
    pub fn to_spec(&self) -> String {
        let group = format!("\"($I {})\"", self.exclusions.join(" "));
        let forms = match self.forms.as_slice() {
            [single] => single.clone(),
            many => format!("{{{}}}", many.join(",")),
        };
        format!("{group}{forms}{}", zsh_description(&self.description))
    }
}

/// Compiles the zsh completion definition for command `name`.
///
/// # Examples
///
/// ```
/// use mkcli::compile::compile_completion;
/// use mkcli::flag::Flag;
///
/// let flags = [Flag::new().with_short("o").with_long("out").with_help("Target")];
/// let script = compile_completion("tool", &flags);
/// assert!(script.starts_with("#compdef tool\n"));
/// assert!(script.contains("\"($I -o --out)\"{-o+,--out=}'[Target]'"));
/// ```
#[must_use]
pub fn compile_completion(name: &str, flags: &[Flag]) -> String {
    let function = format!("_{name}");
    let mut buf = ScriptBuffer::new();
    buf.line(&format!("#compdef {name}"));
    buf.blank();
    buf.line(&format!("{function}() {{"));
    buf.nested(|func| {
        func.line("local I=\"-h --help --version\"");
        func.line("local ret=1");
        func.line("local -a args");
        func.blank();
        func.line("args+=(");
        func.nested(|args| {
            for entry in flags.iter().filter_map(CompletionEntry::for_flag) {
                args.line(&entry.to_spec());
            }
            args.line("'(- *)'{-h,--help}'[Display help and exit]'");
            args.line("'1:name'");
        });
        func.line(")");
        func.blank();
        func.line("_arguments -w -s -S $args[@] && ret=0");
        func.blank();
        func.line("return ret");
    });
    buf.line("}");
    buf.blank();
    buf.line(&function);
    buf.into_string()
}
