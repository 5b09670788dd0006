//! Build-time generator for self-contained bash commands.
//!
//! A template declares commands with the `mkcli` block and its `flag` tags.
//! Each declaration is compiled into a bash function with a hand-written
//! option parser, a help printer, and a matching zsh completion. The
//! [`driver`] renders one template and writes the results:
//!
//! ```text
//! <output>                          rendered template
//! <build>/bin/<name>                executable command script
//! <build>/.zsh/completion/_<name>   zsh completion
//! ```
//!
//! The lower layers are usable on their own: [`assembler::assemble`] turns a
//! [`command::Command`] into an [`assembler::AssembledCommand`] without
//! touching the filesystem.

pub mod assembler;
pub mod command;
pub mod compile;
pub mod driver;
pub mod error;
pub mod flag;
pub mod fs_helpers;
pub mod render;
pub mod shell;
