//! Shared fixtures for `mkcli` integration tests.

use mkcli::command::Command;
use mkcli::flag::Flag;

/// Body of the sample command: reports every variable and positional.
pub(crate) const GETAMBIENT_BODY: &str = concat!(
    "\tprintf 'output=%s\\n' \"$output\"\n",
    "\tprintf 'station=%s\\n' \"$station\"\n",
    "\tprintf 'dry_run=%s\\n' \"$dry_run\"\n",
    "\tfor arg in \"$@\"; do printf 'arg=%s\\n' \"$arg\"; done\n",
);

/// The sample command built through the library API.
pub(crate) fn getambient() -> Command {
    Command::new("getambient")
        .with_help(" - fetch ambient readings")
        .with_flag(
            Flag::new()
                .with_long("output")
                .with_short("o")
                .with_default("ambient.json")
                .with_help("File to write"),
        )
        .with_flag(
            Flag::new()
                .with_long("station")
                .with_short("s")
                .with_help("Station identifier"),
        )
        .with_flag(
            Flag::new()
                .with_long("dry-run")
                .with_short("n")
                .with_help("Print the request only")
                .presence_only(),
        )
        .with_body(GETAMBIENT_BODY)
}

/// The same command declared as a template.
pub(crate) fn getambient_template() -> String {
    format!(
        concat!(
            "{{% mkcli name: \"getambient\" help: \" - fetch ambient readings\" %}}",
            "{{% flag long: \"output\" short: \"o\" default: \"ambient.json\" help: \"File to write\" %}}",
            "{{% flag long: \"station\" short: \"s\" help: \"Station identifier\" %}}",
            "{{% flag long: \"dry-run\" short: \"n\" help: \"Print the request only\" flag_only: true %}}",
            "{body}",
            "{{% endmkcli %}}",
        ),
        body = GETAMBIENT_BODY,
    )
}
