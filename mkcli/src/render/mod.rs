//! Template rendering with the `mkcli` primitives installed.
//!
//! Templates are liquid documents. Besides the standard library the engine
//! knows three extra tags:
//!
//! ```text
//! {% mkcli name: "getambient" help: " - fetch ambient data" %}
//!   {% flag long: "output" short: "o" default: "out.json" help: "target file" %}
//!   {% flag long: "dry-run" help: "print only" flag_only: true %}
//!   fetch "$output"
//! {% endmkcli %}
//! {% readfile "lib/common.sh" %}
//! ```
//!
//! Undefined variables are errors. Each [`RenderEngine::render`] call builds
//! a fresh parser so the commands it reports belong to that render alone.

mod args;
mod tags;

use camino::{Utf8Path, Utf8PathBuf};
use liquid::model::{KString, Value};
use tracing::debug;

pub use tags::{AssembledLog, FlagTag, MkcliBlock, ReadFileTag};

use crate::assembler::AssembledCommand;
use crate::error::{MkcliError, RenderCause};
use crate::fs_helpers::read_below;

/// Rendered text plus the commands assembled while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered document.
    pub text: String,
    /// Commands in the order their `mkcli` blocks were rendered.
    pub commands: Vec<AssembledCommand>,
}

/// Renders templates found below a root directory.
#[derive(Debug, Clone)]
pub struct RenderEngine {
    root: Utf8PathBuf,
    globals: liquid::Object,
}

impl RenderEngine {
    /// Creates an engine loading templates and `readfile` targets from `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            globals: liquid::Object::new(),
        }
    }

    /// Adds a string variable visible to every template.
    #[must_use]
    pub fn with_global(mut self, key: &str, value: impl Into<String>) -> Self {
        self.globals
            .insert(KString::from(key.to_owned()), Value::scalar(value.into()));
        self
    }

    /// Template root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Loads `name` below the root and renders it.
    ///
    /// # Errors
    ///
    /// Returns [`MkcliError::Render`] naming the template when it cannot be
    /// read, parsed, or rendered, and [`MkcliError::Engine`] if the parser
    /// cannot be built.
    pub fn render(&self, name: &str) -> Result<RenderOutput, MkcliError> {
        let source = read_below(&self.root, name)
            .map_err(|err| MkcliError::render(name, RenderCause::Read(err)))?;
        self.render_str(name, &source)
    }

    /// Renders `source` as a template called `name`.
    ///
    /// # Errors
    ///
    /// As for [`RenderEngine::render`], minus the read failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use mkcli::render::RenderEngine;
    ///
    /// let engine = RenderEngine::new(".").with_global("who", "world");
    /// let output = engine.render_str("inline", "hello {{ who }}")?;
    /// assert_eq!(output.text, "hello world");
    /// assert!(output.commands.is_empty());
    /// # Ok::<(), mkcli::error::MkcliError>(())
    /// ```
    pub fn render_str(&self, name: &str, source: &str) -> Result<RenderOutput, MkcliError> {
        let log = AssembledLog::default();
        let parser = liquid::ParserBuilder::with_stdlib()
            .block(MkcliBlock::new(log.clone()))
            .tag(FlagTag)
            .tag(ReadFileTag::new(self.root.clone()))
            .build()
            .map_err(MkcliError::Engine)?;
        let template = parser
            .parse(source)
            .map_err(|err| MkcliError::render(name, err))?;
        let text = template
            .render(&self.globals)
            .map_err(|err| MkcliError::render(name, err))?;
        let commands = log.take();
        debug!(template = name, commands = commands.len(), "rendered template");
        Ok(RenderOutput { text, commands })
    }
}
