//! Keyword-argument parsing for the template tags.
//!
//! Tags take `key: value` pairs separated by whitespace (commas are also
//! accepted), in the style of liquid's own `for ... limit: 2` attributes.
//! Values are expressions, so literals and variables are both allowed; they
//! are evaluated at render time with strict-undefined semantics.

use liquid_core::model::State;
use liquid_core::{Error, Expression, Result, Runtime, TagTokenIter, ValueView};

/// Parsed `key: value` pairs in declaration order.
#[derive(Debug, Clone, Default)]
pub struct KeywordArgs {
    pairs: Vec<(String, Expression)>,
}

impl KeywordArgs {
    /// Consumes every remaining token of `arguments`.
    ///
    /// Fails on keys outside `allowed`, on repeated keys, and on a key without
    /// a `:` and value.
    pub fn parse(tag: &str, arguments: &mut TagTokenIter<'_>, allowed: &[&str]) -> Result<Self> {
        let mut pairs: Vec<(String, Expression)> = Vec::new();
        while let Some(token) = arguments.next() {
            if token.as_str() == "," {
                continue;
            }
            let key = token.expect_identifier().into_result()?.to_owned();
            if !allowed.contains(&key.as_str()) {
                return Err(Error::with_msg(format!("unknown `{tag}` argument `{key}`"))
                    .context("allowed", allowed.join(", ")));
            }
            if pairs.iter().any(|(seen, _)| *seen == key) {
                return Err(Error::with_msg(format!(
                    "`{tag}` argument `{key}` given more than once"
                )));
            }
            arguments
                .expect_next("\":\" expected.")?
                .expect_str(":")
                .into_result_custom_msg("\":\" expected.")?;
            let value = arguments
                .expect_next("Value expected.")?
                .expect_value()
                .into_result()?;
            pairs.push((key, value));
        }
        Ok(Self { pairs })
    }

    fn get(&self, key: &str) -> Option<&Expression> {
        self.pairs
            .iter()
            .find_map(|(name, expr)| (name == key).then_some(expr))
    }

    /// Evaluates `key` as text, or returns `None` when it was not given.
    pub fn text(&self, key: &str, runtime: &dyn Runtime) -> Result<Option<String>> {
        self.get(key)
            .map(|expr| {
                let value = expr.evaluate(runtime)?;
                Ok(value.to_kstr().as_str().to_owned())
            })
            .transpose()
    }

    /// Evaluates `key` as text, defaulting to the empty string.
    pub fn text_or_empty(&self, key: &str, runtime: &dyn Runtime) -> Result<String> {
        Ok(self.text(key, runtime)?.unwrap_or_default())
    }

    /// Evaluates `key` for truthiness; absent keys are `false`.
    pub fn truthy(&self, key: &str, runtime: &dyn Runtime) -> Result<bool> {
        self.get(key).map_or(Ok(false), |expr| {
            Ok(expr.evaluate(runtime)?.query_state(State::Truthy))
        })
    }
}
