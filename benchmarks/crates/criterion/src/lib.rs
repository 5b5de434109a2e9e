//! Synthetic template corpora shared by the criterion benches.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// A markdown document with `sections` second-level sections and a mix of
/// findings for every content scorer.
pub fn sample_document(sections: usize) -> String {
    let mut document = String::from("# Sample Template\n\n");
    for index in 0..sections {
        _ = write!(
            document,
            "## Section {index}\n\n\
             This section explains step {index} of the workflow in plain words.\n\
             The configuration was updated by the maintainer on 03/04/2025.\n\n\
             - First item\n- Second item\n\n\
             ```\nlet value = {index};\n```\n\n\
             ![](diagram-{index}.png) See [click here](https://example.com/{index}).\n\n\
             | Name | Value |\n|------|-------|\n| width | 12 inches |\n\n"
        );
    }
    document
}

/// Prompt, chat mode and service README triples under `root`, `groups` of each.
///
/// # Errors
/// Returns an error if a fixture cannot be written.
pub fn write_corpus(root: &Path, groups: usize) -> io::Result<()> {
    let prompts = root.join("prompts");
    let chat_modes = root.join(".github/chatmodes");
    fs::create_dir_all(&prompts)?;
    fs::create_dir_all(&chat_modes)?;

    for index in 0..groups {
        fs::write(
            prompts.join(format!("task-{index}.prompt.md")),
            format!(
                "# Task {index}\n\n## Description\n\nRuns task {index}.\n\n\
                 ## Parameters\n\n- `input`: the text to process\n"
            ),
        )?;
        fs::write(
            chat_modes.join(format!("mode-{index}.chatmode.md")),
            format!(
                "# Mode {index}\n\n## Role\n\nYou assist with task {index}.\n\n\
                 ## Response Style\n\nKeep your replies short.\n"
            ),
        )?;

        let service = root.join(format!("mcp-servers/service-{index}"));
        fs::create_dir_all(&service)?;
        fs::write(
            service.join("README.md"),
            format!(
                "# Service {index}\n\nAn MCP server.\n\n## Installation\n\nRun the installer.\n\n\
                 ## API\n\nExposes one tool.\n"
            ),
        )?;
    }

    Ok(())
}
