//! Parser-code compiler.
//!
//! Emits a `parse_commandline` bash function: a `while`/`case` loop that
//! classifies every argument as a declared flag form, an unknown flag, or a
//! positional, followed by default filling.

use crate::flag::{Flag, PRESENCE_SENTINEL};
use crate::shell::ScriptBuffer;
use crate::shell::quote::double_inner;

use super::HELP_STATUS;

/// Name of the array collecting positional arguments.
pub const POSITIONALS: &str = "_positionals";

/// Name of the generated parsing function.
pub const PARSE_FUNCTION: &str = "parse_commandline";

/// What a matched `case` arm does with the argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArmAction {
    /// Store the presence sentinel; consume nothing else.
    Presence,
    /// Store the following argument, failing when none is left.
    NextValue {
        /// Form named in the missing-value message.
        form: String,
    },
    /// Store the remainder of the argument after `prefix`.
    InlineValue {
        /// `-o=` or `--output=` prefix stripped from the argument.
        prefix: String,
    },
}

/// One `case` arm recognising a single surface form of a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagArm {
    /// `case` pattern, e.g. `--output` or `--output=*`.
    pub pattern: String,
    /// Variable the value is stored in.
    pub var: String,
    /// Assignment performed when the pattern matches.
    pub action: ArmAction,
}

impl FlagArm {
    /// Builds the arms for every surface form a flag declares.
    ///
    /// Short forms precede long forms; each contributes a separated-value arm
    /// and, unless the flag is presence-only, an inline `=value` arm.
    #[must_use]
    pub fn for_flag(flag: &Flag) -> Vec<Self> {
        let var = flag.var();
        let mut arms = Vec::with_capacity(4);
        for form in [flag.short_form(), flag.long_form()].into_iter().flatten() {
            let action = if flag.takes_value() {
                ArmAction::NextValue { form: form.clone() }
            } else {
                ArmAction::Presence
            };
            arms.push(Self {
                pattern: form.clone(),
                var: var.clone(),
                action,
            });
            if flag.takes_value() {
                arms.push(Self {
                    pattern: format!("{form}=*"),
                    var: var.clone(),
                    action: ArmAction::InlineValue {
                        prefix: format!("{form}="),
                    },
                });
            }
        }
        arms
    }

    /// Writes the arm into `buf`.
    pub fn emit(&self, buf: &mut ScriptBuffer) {
        let var = &self.var;
        buf.line(&format!("{})", self.pattern));
        buf.nested(|arm| {
            arm.line(&format!(
                "[[ ${var} == \"\" ]] || {{ die \"Flag already set '{var}'.\" || return 1; }}"
            ));
            match &self.action {
                ArmAction::Presence => {
                    arm.line(&format!("{var}=\"{PRESENCE_SENTINEL}\""));
                }
                ArmAction::NextValue { form } => {
                    arm.line(&format!(
                        "test $# -lt 2 && {{ die \"Missing value for argument {}.\" || return 1; }}",
                        double_inner(form)
                    ));
                    arm.line(&format!("{var}=\"$2\"; shift"));
                }
                ArmAction::InlineValue { prefix } => {
                    arm.line(&format!("{var}=\"${{_key##{prefix}}}\""));
                }
            }
            arm.line(";;");
        });
    }
}

/// Statement assigning a flag's default when parsing left it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultAssignment {
    /// Variable to fill.
    pub var: String,
    /// Shell expression inserted verbatim.
    pub value: String,
}

impl DefaultAssignment {
    /// Returns the assignment for a flag with a default, if any.
    #[must_use]
    pub fn for_flag(flag: &Flag) -> Option<Self> {
        flag.has_default().then(|| Self {
            var: flag.var(),
            value: flag.default.clone(),
        })
    }

    /// Renders the assignment as one shell line.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "[[ ${{{var}:-}} == \"\" ]] && {{ {var}={value}; }}",
            var = self.var,
            value = self.value
        )
    }
}

/// Compiles the argument-parsing function for `flags`.
///
/// The function stores values in the flags' variables, appends positionals to
/// [`POSITIONALS`], returns `1` on any parse error and [`HELP_STATUS`] when
/// help was requested. Variables and the positional array are expected to be
/// declared by the caller.
///
/// # Examples
///
/// ```
/// use mkcli::compile::compile_parser;
/// use mkcli::flag::Flag;
///
/// let code = compile_parser(&[Flag::new().with_long("output").with_short("o")]);
/// assert!(code.contains("\t\t\t--output=*)\n"));
/// assert!(code.contains("output=\"${_key##--output=}\""));
/// ```
#[must_use]
pub fn compile_parser(flags: &[Flag]) -> String {
    let mut buf = ScriptBuffer::new();
    buf.line(&format!("{PARSE_FUNCTION}() {{"));
    buf.nested(|func| {
        func.line("local _key");
        func.line("while test $# -gt 0");
        func.line("do");
        func.nested(|body| {
            body.line("_key=\"$1\"");
            body.line("case \"$_key\" in");
            body.nested(|arms| {
                for arm in flags.iter().flat_map(FlagArm::for_flag) {
                    arm.emit(arms);
                }
                emit_fallback_arms(arms);
            });
            body.line("esac");
            body.line("shift");
        });
        func.line("done");
        for assignment in flags.iter().filter_map(DefaultAssignment::for_flag) {
            func.line(&assignment.to_line());
        }
        func.line("return 0");
    });
    buf.line("}");
    buf.into_string()
}

fn emit_fallback_arms(arms: &mut ScriptBuffer) {
    arms.line("-h|--help|-h*)");
    arms.nested(|arm| {
        arm.line("print_help");
        arm.line(&format!("return {HELP_STATUS}"));
        arm.line(";;");
    });
    arms.line("-*)");
    arms.nested(|arm| {
        arm.line("die \"Unknown flag ${_key}\" || return 1");
        arm.line(";;");
    });
    arms.line("*)");
    arms.nested(|arm| {
        arm.line(&format!("{POSITIONALS}+=(\"$1\")"));
        arm.line(";;");
    });
}
