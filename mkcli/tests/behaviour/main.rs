//! Behaviour tests running generated commands under `bash`.
//!
//! The sample command prints `name=value` for each flag variable and one
//! `arg=` line per positional, so the tests observe the parser's results
//! directly. Tests pass vacuously when `bash` is not installed.

#[path = "../common/mod.rs"]
mod common;

use std::collections::HashMap;

use mkcli::assembler::assemble;
use mkcli::command::Command;
use mkcli::flag::Flag;
use mkcli::render::RenderEngine;
use rstest::rstest;
use test_helpers::bash::{ScriptRun, bash_available, run_script, run_script_with_env};
use test_helpers::workspace::TemplateWorkspace;

use crate::common::{getambient, getambient_template};

/// Variables and positionals reported by the sample body.
struct Report {
    vars: HashMap<String, String>,
    args: Vec<String>,
}

impl Report {
    fn parse(stdout: &str) -> Self {
        let mut vars = HashMap::new();
        let mut args = Vec::new();
        for line in stdout.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key == "arg" {
                args.push(value.to_owned());
            } else {
                vars.insert(key.to_owned(), value.to_owned());
            }
        }
        Self { vars, args }
    }

    fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Assembles `command` and runs it with `args` and extra `env`, or returns
/// `None` without `bash`.
fn run_command(
    command: &Command,
    args: &[&str],
    env: &[(&str, &str)],
) -> anyhow::Result<Option<ScriptRun>> {
    if !bash_available() {
        return Ok(None);
    }
    let workspace = TemplateWorkspace::new()?;
    let path = format!("bin/{}", command.name);
    let script = workspace.write_template(&path, &assemble(command)?.script)?;
    Ok(Some(run_script_with_env(&script, args, env)?))
}

/// Runs the assembled sample command, or returns `None` without `bash`.
fn run_getambient(args: &[&str]) -> anyhow::Result<Option<ScriptRun>> {
    run_command(&getambient(), args, &[])
}

#[rstest]
#[case::long_separated(&["--output", "x.json"])]
#[case::long_inline(&["--output=x.json"])]
#[case::short_separated(&["-o", "x.json"])]
#[case::short_inline(&["-o=x.json"])]
fn every_value_form_stores_the_same_value(#[case] args: &[&str]) -> anyhow::Result<()> {
    let Some(run) = run_getambient(args)? else {
        return Ok(());
    };
    assert!(run.succeeded(), "stderr: {}", run.stderr);
    assert_eq!(Report::parse(&run.stdout).var("output"), Some("x.json"));
    Ok(())
}

#[rstest]
#[case::inline_value_with_equals(&["--output=a=b"], "a=b")]
#[case::separated_value_with_dash(&["--output", "-x"], "-x")]
#[case::separated_value_with_spaces(&["-o", "two words"], "two words")]
fn values_are_stored_unmodified(#[case] args: &[&str], #[case] expected: &str) -> anyhow::Result<()> {
    let Some(run) = run_getambient(args)? else {
        return Ok(());
    };
    assert!(run.succeeded(), "stderr: {}", run.stderr);
    assert_eq!(Report::parse(&run.stdout).var("output"), Some(expected));
    Ok(())
}

#[rstest]
#[case::same_form(&["--output", "a", "--output", "b"], "output")]
#[case::mixed_forms(&["-o=a", "--output=b"], "output")]
#[case::second_without_value(&["-o", "a", "--output"], "output")]
#[case::presence_flag(&["-n", "--dry-run"], "dry_run")]
fn repeated_flags_fail(#[case] args: &[&str], #[case] var: &str) -> anyhow::Result<()> {
    let Some(run) = run_getambient(args)? else {
        return Ok(());
    };
    assert_eq!(run.code, Some(1));
    assert!(
        run.stderr.contains(&format!("Flag already set '{var}'.")),
        "stderr: {}",
        run.stderr
    );
    assert!(!run.stdout.contains("output="));
    Ok(())
}

#[rstest]
fn presence_flag_consumes_no_value() -> anyhow::Result<()> {
    let Some(run) = run_getambient(&["--dry-run", "pos"])? else {
        return Ok(());
    };
    assert!(run.succeeded(), "stderr: {}", run.stderr);
    let report = Report::parse(&run.stdout);
    assert_eq!(report.var("dry_run"), Some("on"));
    assert_eq!(report.args, ["pos"]);
    Ok(())
}

#[rstest]
#[case::inline_value_on_presence_flag(&["--dry-run=yes"], "--dry-run=yes")]
#[case::undeclared_long(&["--bogus"], "--bogus")]
#[case::undeclared_short(&["-z"], "-z")]
#[case::attached_short_value(&["-ox"], "-ox")]
fn unknown_flags_fail(#[case] args: &[&str], #[case] shown: &str) -> anyhow::Result<()> {
    let Some(run) = run_getambient(args)? else {
        return Ok(());
    };
    assert_eq!(run.code, Some(1));
    assert!(
        run.stderr.contains(&format!("Unknown flag {shown}")),
        "stderr: {}",
        run.stderr
    );
    Ok(())
}

#[rstest]
#[case::long(&["--station"], "--station")]
#[case::short(&["a", "-s"], "-s")]
fn missing_values_fail(#[case] args: &[&str], #[case] form: &str) -> anyhow::Result<()> {
    let Some(run) = run_getambient(args)? else {
        return Ok(());
    };
    assert_eq!(run.code, Some(1));
    assert!(
        run.stderr
            .contains(&format!("Missing value for argument {form}.")),
        "stderr: {}",
        run.stderr
    );
    Ok(())
}

#[rstest]
fn defaults_fill_unset_flags_verbatim() -> anyhow::Result<()> {
    let Some(run) = run_getambient(&[])? else {
        return Ok(());
    };
    assert!(run.succeeded(), "stderr: {}", run.stderr);
    let report = Report::parse(&run.stdout);
    assert_eq!(report.var("output"), Some("ambient.json"));
    assert_eq!(report.var("station"), Some(""));
    assert_eq!(report.var("dry_run"), Some(""));
    assert!(report.args.is_empty());
    Ok(())
}

#[rstest]
#[case::long(&["--help"])]
#[case::short(&["-h"])]
#[case::after_other_flags(&["-s", "north", "--help"])]
#[case::short_help_prefix(&["-hv"])]
fn help_prints_options_and_succeeds(#[case] args: &[&str]) -> anyhow::Result<()> {
    let Some(run) = run_getambient(args)? else {
        return Ok(());
    };
    assert_eq!(run.code, Some(0));
    assert_eq!(
        run.stdout,
        concat!(
            "getambient - fetch ambient readings\n",
            "\n",
            "Options:\n",
            "\t-o --output: File to write [ambient.json]\n",
            "\t-s --station: Station identifier []\n",
            "\t-n --dry-run: Print the request only []\n",
        )
    );
    Ok(())
}

#[rstest]
fn defaults_are_expanded_by_the_shell() -> anyhow::Result<()> {
    let command = Command::new("cache")
        .with_flag(Flag::new().with_long("dir").with_default("\"$HOME/x\""))
        .with_body("\tprintf 'dir=%s\\n' \"$dir\"\n");
    let Some(run) = run_command(&command, &[], &[("HOME", "/tmp/home")])? else {
        return Ok(());
    };
    assert!(run.succeeded(), "stderr: {}", run.stderr);
    assert_eq!(run.stdout, "dir=/tmp/home/x\n");
    Ok(())
}

#[rstest]
#[case::status_name("ret")]
#[case::parser_key("key")]
#[case::lowercase_path("path")]
fn flag_variables_are_not_overwritten_by_the_parser(#[case] long: &str) -> anyhow::Result<()> {
    let command = Command::new("t")
        .with_flag(Flag::new().with_long(long))
        .with_body(format!("\tprintf '{long}=%s\\n' \"${long}\"\n"));
    let flag = format!("--{long}");
    let Some(run) = run_command(&command, &[&flag, "abc"], &[])? else {
        return Ok(());
    };
    assert!(run.succeeded(), "stderr: {}", run.stderr);
    assert_eq!(run.stdout, format!("{long}=abc\n"));
    Ok(())
}

#[rstest]
fn positionals_keep_their_order() -> anyhow::Result<()> {
    let Some(run) = run_getambient(&["a", "--output", "x", "b"])? else {
        return Ok(());
    };
    assert!(run.succeeded(), "stderr: {}", run.stderr);
    let report = Report::parse(&run.stdout);
    assert_eq!(report.var("output"), Some("x"));
    assert_eq!(report.args, ["a", "b"]);
    Ok(())
}

#[rstest]
fn rendered_template_runs_like_the_library_command() -> anyhow::Result<()> {
    if !bash_available() {
        return Ok(());
    }
    let workspace = TemplateWorkspace::new()?;
    let text = RenderEngine::new(workspace.root())
        .render_str("base.sh", &getambient_template())?
        .text;
    let script = workspace.write_template("getambient.sh", &text)?;

    let run = run_script(&script, &["-s", "north", "-n", "first", "second"])?;
    assert!(run.succeeded(), "stderr: {}", run.stderr);
    let report = Report::parse(&run.stdout);
    assert_eq!(report.var("station"), Some("north"));
    assert_eq!(report.var("dry_run"), Some("on"));
    assert_eq!(report.args, ["first", "second"]);
    Ok(())
}
