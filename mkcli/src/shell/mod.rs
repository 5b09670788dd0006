//! Line-oriented emitter shared by the shell code compilers.
//!
//! Compilers build their output through [`ScriptBuffer`] so indentation and
//! line endings are handled in one place, and quote user-supplied text with
//! the helpers in [`quote`].

pub mod quote;

const INDENT: char = '\t';

/// Growable buffer of indented shell lines.
///
/// # Examples
///
/// ```
/// use mkcli::shell::ScriptBuffer;
///
/// let mut buf = ScriptBuffer::new();
/// buf.line("f() {");
/// buf.nested(|body| body.line("echo hi"));
/// buf.line("}");
/// assert_eq!(buf.into_string(), "f() {\n\techo hi\n}\n");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptBuffer {
    text: String,
    depth: usize,
}

impl ScriptBuffer {
    /// Creates an empty buffer at depth zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line at the current depth.
    pub fn line(&mut self, line: &str) {
        if !line.is_empty() {
            self.push_indent();
            self.text.push_str(line);
        }
        self.text.push('\n');
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    /// Runs `emit` one level deeper than the current depth.
    pub fn nested(&mut self, emit: impl FnOnce(&mut Self)) {
        self.depth += 1;
        emit(self);
        self.depth -= 1;
    }

    /// Appends every line of `block`, re-indented to the current depth.
    pub fn block(&mut self, block: &str) {
        for line in block.lines() {
            self.line(line);
        }
    }

    /// Appends `text` exactly as given, terminating it with a newline.
    ///
    /// Used for caller-supplied shell code, which must not be re-indented
    /// because heredocs and multi-line strings are whitespace-sensitive.
    pub fn verbatim(&mut self, text: &str) {
        self.text.push_str(text);
        if !text.is_empty() && !text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    /// Returns the accumulated text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    fn push_indent(&mut self) {
        self.text.extend(std::iter::repeat_n(INDENT, self.depth));
    }
}
