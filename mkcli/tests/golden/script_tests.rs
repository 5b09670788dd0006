//! Golden tests for complete command scripts.

use mkcli::assembler::assemble;
use mkcli::command::Command;
use mkcli::render::RenderEngine;
use rstest::rstest;

use crate::common::{getambient, getambient_template};

#[rstest]
fn flagless_command_matches_golden() -> anyhow::Result<()> {
    let command = Command::new("noop").with_body("\ttrue\n");
    assert_eq!(
        assemble(&command)?.script,
        concat!(
            "#!/usr/bin/env bash\n",
            "function noop() {\n",
            "\tlocal -a _positionals=()\n",
            "\n",
            "\tprint_help() {\n",
            "\t\tprintf '%s\\n\\nOptions:\\n' 'noop'\n",
            "\t}\n",
            "\tdie() {\n",
            "\t\ttest \"${_PRINT_HELP:-no}\" = yes && print_help >&2\n",
            "\t\techo \"$1\" >&2\n",
            "\t\treturn 1\n",
            "\t}\n",
            "\tparse_commandline() {\n",
            "\t\tlocal _key\n",
            "\t\twhile test $# -gt 0\n",
            "\t\tdo\n",
            "\t\t\t_key=\"$1\"\n",
            "\t\t\tcase \"$_key\" in\n",
            "\t\t\t\t-h|--help|-h*)\n",
            "\t\t\t\t\tprint_help\n",
            "\t\t\t\t\treturn 2\n",
            "\t\t\t\t\t;;\n",
            "\t\t\t\t-*)\n",
            "\t\t\t\t\tdie \"Unknown flag ${_key}\" || return 1\n",
            "\t\t\t\t\t;;\n",
            "\t\t\t\t*)\n",
            "\t\t\t\t\t_positionals+=(\"$1\")\n",
            "\t\t\t\t\t;;\n",
            "\t\t\tesac\n",
            "\t\t\tshift\n",
            "\t\tdone\n",
            "\t\treturn 0\n",
            "\t}\n",
            "\n",
            "\tparse_commandline \"$@\"\n",
            "\tlocal _ret=$?\n",
            "\tif [[ $_ret == 2 ]]; then\n",
            "\t\treturn 0\n",
            "\tfi\n",
            "\tif [[ $_ret != 0 ]]; then\n",
            "\t\treturn $_ret\n",
            "\tfi\n",
            "\tset -- \"${_positionals[@]}\"\n",
            "\ttrue\n",
            "}\n",
            "noop \"$@\"\n",
        )
    );
    Ok(())
}

#[rstest]
fn template_and_library_declarations_agree() -> anyhow::Result<()> {
    let expected = assemble(&getambient())?;
    let output = RenderEngine::new(".").render_str("base.sh", &getambient_template())?;
    assert_eq!(output.text, expected.script);
    assert_eq!(output.commands, vec![expected]);
    Ok(())
}
