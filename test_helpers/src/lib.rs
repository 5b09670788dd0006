//! Test helpers shared across `mkcli` test suites.
//!
//! - [`workspace`]: temporary template directories.
//! - [`bash`]: running generated scripts under `bash`.

pub mod bash;
pub mod workspace;
