//! Template primitives: the `mkcli` block, the `flag` tag and `readfile`.

use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use liquid_core::error::ResultLiquidReplaceExt;
use liquid_core::parser::BlockElement;
use liquid_core::{
    BlockReflection, Error, Expression, Language, ParseBlock, ParseTag, Renderable, Result,
    Runtime, TagBlock, TagReflection, TagTokenIter, Template, ValueView,
};
use parking_lot::Mutex;

use super::args::KeywordArgs;
use crate::assembler::{AssembledCommand, assemble};
use crate::command::Command;
use crate::flag::Flag;
use crate::fs_helpers::read_below;

const COMMAND_ARGS: &[&str] = &["name", "help"];
const FLAG_ARGS: &[&str] = &["long", "short", "default", "help", "flag_only"];

/// Commands assembled during one render, in template order.
#[derive(Debug, Clone, Default)]
pub struct AssembledLog(Arc<Mutex<Vec<AssembledCommand>>>);

impl AssembledLog {
    fn record(&self, command: AssembledCommand) {
        self.0.lock().push(command);
    }

    /// Removes and returns every recorded command.
    #[must_use]
    pub fn take(&self) -> Vec<AssembledCommand> {
        std::mem::take(&mut *self.0.lock())
    }
}

/// `{% mkcli name: "..." help: "..." %} ... {% endmkcli %}`.
///
/// `flag` tags directly inside the block declare the command's flags; all
/// other content is rendered and becomes the command body. The block renders
/// to the assembled command script.
#[derive(Debug, Clone, Default)]
pub struct MkcliBlock {
    log: AssembledLog,
}

impl MkcliBlock {
    /// Creates the block, recording assembled commands into `log`.
    #[must_use]
    pub const fn new(log: AssembledLog) -> Self {
        Self { log }
    }
}

impl BlockReflection for MkcliBlock {
    fn start_tag(&self) -> &str {
        "mkcli"
    }

    fn end_tag(&self) -> &str {
        "endmkcli"
    }

    fn description(&self) -> &str {
        "Compiles the enclosed flags and body into a bash command with completion"
    }
}

impl ParseBlock for MkcliBlock {
    fn parse(
        &self,
        mut arguments: TagTokenIter<'_>,
        mut tokens: TagBlock<'_, '_>,
        options: &Language,
    ) -> Result<Box<dyn Renderable>> {
        let args = KeywordArgs::parse("mkcli", &mut arguments, COMMAND_ARGS)?;
        let mut flags = Vec::new();
        let mut body: Vec<Box<dyn Renderable>> = Vec::new();

        while let Some(element) = tokens.next()? {
            match element {
                BlockElement::Tag(mut tag) if tag.name() == "flag" => {
                    flags.push(KeywordArgs::parse("flag", tag.tokens(), FLAG_ARGS)?);
                }
                BlockElement::Tag(tag) => body.push(tag.parse(&mut tokens, options)?),
                element => body.push(element.parse(&mut tokens, options)?),
            }
        }
        tokens.assert_empty();

        Ok(Box::new(MkcliRenderable {
            args,
            flags,
            body: Template::new(body),
            log: self.log.clone(),
        }))
    }

    fn reflection(&self) -> &dyn BlockReflection {
        self
    }
}

#[derive(Debug)]
struct MkcliRenderable {
    args: KeywordArgs,
    flags: Vec<KeywordArgs>,
    body: Template,
    log: AssembledLog,
}

impl MkcliRenderable {
    fn command(&self, runtime: &dyn Runtime) -> Result<Command> {
        let name = self
            .args
            .text("name", runtime)?
            .ok_or_else(|| Error::with_msg("`mkcli` requires a `name` argument"))?;
        let flags = self
            .flags
            .iter()
            .map(|args| flag_from_args(args, runtime))
            .collect::<Result<Vec<_>>>()?;

        let mut body = Vec::new();
        self.body.render_to(&mut body, runtime)?;
        let body = String::from_utf8(body)
            .map_err(|_| Error::with_msg("`mkcli` body rendered to invalid UTF-8"))?;

        Ok(Command::new(name)
            .with_help(self.args.text_or_empty("help", runtime)?)
            .with_flags(flags)
            .with_body(body))
    }
}

impl Renderable for MkcliRenderable {
    fn render_to(&self, writer: &mut dyn Write, runtime: &dyn Runtime) -> Result<()> {
        let command = self.command(runtime)?;
        let assembled = assemble(&command).map_err(|err| {
            Error::with_msg("failed to assemble command")
                .context("command", command.name.clone())
                .context("cause", err.to_string())
        })?;
        writer
            .write_all(assembled.script.as_bytes())
            .replace("Failed to render")?;
        self.log.record(assembled);
        Ok(())
    }
}

fn flag_from_args(args: &KeywordArgs, runtime: &dyn Runtime) -> Result<Flag> {
    let mut flag = Flag::new()
        .with_long(args.text_or_empty("long", runtime)?)
        .with_short(args.text_or_empty("short", runtime)?)
        .with_default(args.text_or_empty("default", runtime)?)
        .with_help(args.text_or_empty("help", runtime)?);
    if args.truthy("flag_only", runtime)? {
        flag = flag.presence_only();
    }
    Ok(flag)
}

/// `{% flag ... %}` outside a `mkcli` block, which is always an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagTag;

impl TagReflection for FlagTag {
    fn tag(&self) -> &str {
        "flag"
    }

    fn description(&self) -> &str {
        "Declares a flag of the enclosing `mkcli` block"
    }
}

impl ParseTag for FlagTag {
    fn parse(
        &self,
        _arguments: TagTokenIter<'_>,
        _options: &Language,
    ) -> Result<Box<dyn Renderable>> {
        Err(Error::with_msg(
            "`flag` is only valid directly inside a `mkcli` block",
        ))
    }

    fn reflection(&self) -> &dyn TagReflection {
        self
    }
}

/// `{% readfile "path" %}`: inserts a file below the template root verbatim.
#[derive(Debug, Clone)]
pub struct ReadFileTag {
    root: Utf8PathBuf,
}

impl ReadFileTag {
    /// Creates the tag resolving paths against `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TagReflection for ReadFileTag {
    fn tag(&self) -> &str {
        "readfile"
    }

    fn description(&self) -> &str {
        "Inserts the raw contents of a file"
    }
}

impl ParseTag for ReadFileTag {
    fn parse(
        &self,
        mut arguments: TagTokenIter<'_>,
        _options: &Language,
    ) -> Result<Box<dyn Renderable>> {
        let path = arguments
            .expect_next("Path expected.")?
            .expect_value()
            .into_result()?;
        arguments.expect_nothing()?;
        Ok(Box::new(ReadFileRenderable {
            root: self.root.clone(),
            path,
        }))
    }

    fn reflection(&self) -> &dyn TagReflection {
        self
    }
}

#[derive(Debug)]
struct ReadFileRenderable {
    root: Utf8PathBuf,
    path: Expression,
}

impl Renderable for ReadFileRenderable {
    fn render_to(&self, writer: &mut dyn Write, runtime: &dyn Runtime) -> Result<()> {
        let path = self.path.evaluate(runtime)?.to_kstr().as_str().to_owned();
        let content = read_below(&self.root, &path).map_err(|err| {
            Error::with_msg("failed to read file")
                .context("path", path.clone())
                .context("cause", err.to_string())
        })?;
        writer
            .write_all(content.as_bytes())
            .replace("Failed to render")?;
        Ok(())
    }
}
