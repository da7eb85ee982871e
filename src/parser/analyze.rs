//! Per-file analysis of one command implementation.

use crate::model::CommandFileAnalysis;
use crate::parser::patterns;
use tracing::debug;

/// Run the usage, option and subcommand matchers over one file.
///
/// `command` is the name derived from the file name. Pure function of its
/// input, safe to call concurrently.
pub fn analyze(text: &str, command: &str) -> CommandFileAnalysis {
    let analysis = CommandFileAnalysis {
        usage: patterns::match_usage(text, command),
        visible_options: patterns::match_options(text),
        hidden_options: Vec::new(),
        subcommands: patterns::match_subcommands(text, command),
    };

    debug!(
        command,
        usage = analysis.usage.is_some(),
        options = analysis.visible_options.len(),
        subcommands = analysis.subcommands.len(),
        "analyzed command file"
    );
    analysis
}
