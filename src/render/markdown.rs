//! GitHub-flavored markdown renderer.
//!
//! Pages are assembled section by section in a fixed order: title, quick
//! reference, usage, options, subcommands, see also. Sections without data
//! are left out entirely.

use crate::error::Result;
use crate::model::*;
use crate::render::{index, Renderer};
use crate::taxonomy::Taxonomy;

pub struct MarkdownRenderer {
    tool: String,
}

impl MarkdownRenderer {
    pub fn new(tool: &str) -> Self {
        MarkdownRenderer {
            tool: tool.to_string(),
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render_page(&self, doc: &ResolvedDocument) -> Result<String> {
        let command = &doc.command;
        let analysis = &doc.analysis;
        let mut md = format!("# {}\n\n", command.name);

        md.push_str("## Quick Reference\n\n");
        md.push_str(&format!("**Description:** {}\n\n", command.description));
        if !command.aliases.is_empty() {
            md.push_str(&format!("**Aliases:** {}\n\n", command.aliases.join(", ")));
        }

        if let Some(ref usage) = analysis.usage {
            md.push_str(&format!("## Usage\n\n```\n{}\n```\n\n", usage));
        }

        if analysis.has_options() {
            md.push_str("## Options\n\n");

            if !analysis.visible_options.is_empty() {
                md.push_str("### Common Options\n\n");
                for opt in &analysis.visible_options {
                    md.push_str(&render_option(opt, true));
                }
                md.push('\n');
            }

            if !analysis.hidden_options.is_empty() {
                md.push_str("### Advanced Options\n\n");
                md.push_str("_These options are available but not shown in help text._\n\n");
                for opt in &analysis.hidden_options {
                    md.push_str(&render_option(opt, false));
                }
                md.push('\n');
            }
        }

        if !analysis.subcommands.is_empty() {
            md.push_str("## Subcommands\n\n");
            for sub in &analysis.subcommands {
                md.push_str(&format!("### {}\n\n", sub.name));
                if sub.description.is_empty() {
                    md.push_str("_No description available._\n\n");
                } else {
                    md.push_str(&format!("{}\n\n", sub.description));
                }
            }
        }

        md.push_str("## See Also\n\n");
        md.push_str(&format!(
            "- [`{} help`](index.md) - Main documentation index\n",
            self.tool
        ));

        Ok(md)
    }

    fn render_index(&self, docs: &[ResolvedDocument], taxonomy: &Taxonomy) -> Result<String> {
        let mut md = format!("# {} Command Reference\n\n", self.tool);
        md.push_str(&format!(
            "Complete reference documentation for all {} commands.\n\n",
            self.tool
        ));

        for section in index::build(docs, taxonomy) {
            md.push_str(&format!("## {}\n\n", section.name));
            for command in section.commands {
                md.push_str(&render_index_entry(command));
            }
            md.push('\n');
        }

        Ok(md)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// ``- **`-o`, `--output` `<arg>`**: description``
fn render_option(opt: &OptionSpec, mark_arg: bool) -> String {
    let flags: Vec<String> = opt
        .short
        .iter()
        .chain(opt.long.iter())
        .map(|flag| format!("`{}`", flag))
        .collect();

    let mut term = flags.join(", ");
    if mark_arg && opt.takes_arg {
        term.push_str(" `<arg>`");
    }

    if opt.description.is_empty() {
        format!("- **{}**\n", term)
    } else {
        format!("- **{}**: {}\n", term, opt.description)
    }
}

/// ``- [`init`](init.md) - description (aliases: i)``
fn render_index_entry(command: &Command) -> String {
    let mut line = format!(
        "- [`{name}`]({name}.md) - {}",
        command.description,
        name = command.name
    );
    if !command.aliases.is_empty() {
        line.push_str(&format!(" (aliases: {})", command.aliases.join(", ")));
    }
    line.push('\n');
    line
}
