//! Compilers from flag declarations to shell text.
//!
//! Each compiler is a pure function over an ordered flag slice. The output is
//! unindented; the assembler nests it inside the generated command function.

pub mod completion;
pub mod help;
pub mod parser;

pub use completion::compile_completion;
pub use help::compile_help;
pub use parser::compile_parser;

/// Status returned by the generated parser when help was printed.
pub const HELP_STATUS: u8 = 2;
