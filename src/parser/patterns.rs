//! Pattern matchers over raw shell source.
//!
//! Each matcher recognizes one structural shape and returns whatever it
//! found, possibly nothing. Matchers never fail and never depend on each
//! other; callers combine their results.
//!
//! Where a shape has several spellings, the alternatives are tried in a
//! fixed, documented order and the first one that matches wins:
//!
//! - usage heredoc: [`HEREDOC_PLAIN`] then [`HEREDOC_FLEX`]
//! - subcommand dispatch: the `<cmd>::main` block, then generic `case "$1" in`

use crate::model::{Command, OptionSpec, Subcommand};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

// 'a'|'b') cmd='target'  or  'a'| cmd='target'
static RE_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:'[^'\n]+'\|)*'[^'\n]+')[|)]\s+cmd='([^'\n]+)'").unwrap()
});

static RE_COMMANDS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?ms)'commands'\)\s*cat[ \t]+<<-?['"]?EOF['"]?[^\n]*\n(.*?)^[ \t]*EOF\b"#).unwrap()
});

static RE_HELP_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(help:\s*(yes|no)\)").unwrap());

static RE_HELP_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(help:\s*(?:yes|no)\)").unwrap());

static RE_HEREDOC_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cat[ \t]+<<").unwrap());

/// First usage shape: `cat <<EOF`, terminator in column 0.
static HEREDOC_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\Acat[ \t]+<<EOF[^\n]*\n(.*?)^EOF[ \t]*$").unwrap()
});

/// Second usage shape: `<<-`, quoted delimiter, indented terminator.
static HEREDOC_FLEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?ms)\Acat[ \t]+<<-?['"]?EOF['"]?[^\n]*\n(.*?)^[ \t]*EOF[ \t]*$"#).unwrap()
});

// while [ $# -ne 0 ]
// do
//    case "$1" in
static RE_OPTION_LOOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"while\s+[^\n]*?[\s;]\s*do\s+case\s+"?\$\{?1\}?"?\s+in\b"#).unwrap()
});

static RE_CASE_ARG1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"case\s+"?\$\{?1\}?"?\s+in\b"#).unwrap());

static RE_CASE_CMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"case\s+"?\$\{?cmd\}?"?\s+in\b"#).unwrap());

// Nesting inside a case body
static RE_CASE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcase\s+\S+\s+in\b|\besac\b").unwrap());

// '-f'|'--force') handler
static RE_OPTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*('?--?[A-Za-z0-9][\w-]*'?(?:\|'?--?[A-Za-z0-9][\w-]*'?)*)\)(.*)$").unwrap()
});

// add|'remove'|*) handler
static RE_SUBCOMMAND_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^\s*((?:'(?:[a-z][a-z0-9-]*|\*)?'|"(?:[a-z][a-z0-9-]*|\*)?"|[a-z][a-z0-9-]*|\*)"#,
        r#"(?:\|(?:'(?:[a-z][a-z0-9-]*|\*)?'|"(?:[a-z][a-z0-9-]*|\*)?"|[a-z][a-z0-9-]*|\*))*)\)(.*)$"#
    ))
    .unwrap()
});

static RE_SECOND_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(?:\{2\}|2\b)").unwrap());

static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#+\s*(.*)$").unwrap());

/// Labels that never name a documented subcommand.
const RESERVED_SUBCOMMANDS: &[&str] = &["*", "help", ""];

// -- Aliases and the command catalog -------------------------------------------

/// Find `'alias') cmd='target'` assignments, top to bottom.
///
/// A pipe-separated label list maps every alternative to the same target.
pub fn match_aliases(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for caps in RE_ALIAS.captures_iter(text) {
        let target = &caps[2];
        for alias in caps[1].split('|') {
            let alias = alias.trim_matches('\'');
            if !alias.is_empty() {
                pairs.push((alias.to_string(), target.to_string()));
            }
        }
    }
    pairs
}

/// Parse the `'commands') cat <<EOF ... EOF` listing.
///
/// Lines without a ` - ` separator are skipped.
pub fn match_command_catalog(text: &str) -> Vec<Command> {
    let Some(caps) = RE_COMMANDS_BLOCK.captures(text) else {
        return Vec::new();
    };
    caps[1].lines().filter_map(parse_catalog_line).collect()
}

/// `name - description (help: yes)` → Command
fn parse_catalog_line(line: &str) -> Option<Command> {
    let (name, rest) = line.trim().split_once(" - ")?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let has_help = RE_HELP_FLAG
        .captures(rest)
        .is_some_and(|caps| &caps[1] == "yes");
    let description = RE_HELP_SUFFIX.replace_all(rest, "").trim().to_string();

    Some(Command {
        name: name.to_string(),
        description,
        has_help,
        aliases: Vec::new(),
    })
}

// -- Usage ----------------------------------------------------------------------

/// Return the heredoc body of `<command>::usage()`, trimmed.
///
/// Only the first `cat <<` inside the function is considered. The plain
/// shape is tried before the flexible one.
pub fn match_usage(text: &str, command: &str) -> Option<String> {
    let header = function_header(command, r"::usage\(\)\s*\{")?;
    let rest = after_header(text, &header)?;
    let start = RE_HEREDOC_START.find(rest)?.start();
    // The heredoc must open inside the function; its body may contain `}` lines.
    if rest[..start].contains("\n}") {
        return None;
    }
    let heredoc = &rest[start..];

    [&*HEREDOC_PLAIN, &*HEREDOC_FLEX]
        .into_iter()
        .find_map(|shape| shape.captures(heredoc))
        .map(|caps| caps[1].trim().to_string())
}

/// `<command><suffix>` where the name starts a line or follows `::` or
/// whitespace, so `craft` never matches `sde::recraft::usage`.
fn function_header(command: &str, suffix: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?m)(?:^|::|\s){}{}", regex::escape(command), suffix)).ok()
}

/// Everything after the first match of `header`.
fn after_header<'a>(text: &'a str, header: &Regex) -> Option<&'a str> {
    let start = header.find(text)?.end();
    Some(&text[start..])
}

/// Text from just after `header` up to the first closing brace in column 0.
fn function_body<'a>(text: &'a str, header: &Regex) -> Option<&'a str> {
    let rest = after_header(text, header)?;
    let end = rest.find("\n}").map_or(rest.len(), |pos| pos + 1);
    Some(&rest[..end])
}

// -- Options --------------------------------------------------------------------

/// Collect options from every `while ...; do case "$1" in ... esac` loop.
///
/// Blocks are concatenated in discovery order without deduplication.
pub fn match_options(text: &str) -> Vec<OptionSpec> {
    let mut options = Vec::new();
    let mut pos = 0;

    while let Some(head) = RE_OPTION_LOOP.find_at(text, pos) {
        let Some(body) = case_body(&text[head.end()..]) else {
            break;
        };
        for branch in split_branches(body, &RE_OPTION_LABEL) {
            options.push(option_from_branch(&branch));
        }
        pos = head.end() + body.len();
    }

    options
}

fn option_from_branch(branch: &Branch) -> OptionSpec {
    let flags: Vec<&str> = branch.label.split('|').map(|f| f.trim_matches('\'')).collect();
    let short = flags.iter().find(|f| !f.starts_with("--"));
    let long = flags.iter().find(|f| f.starts_with("--"));

    OptionSpec {
        short: short.map(|f| f.to_string()),
        long: long.map(|f| f.to_string()),
        takes_arg: RE_SECOND_PARAM.is_match(&branch.handler),
        description: first_comment(&branch.handler),
    }
}

// -- Subcommands ----------------------------------------------------------------

/// Collect subcommands from the command's dispatch `case`.
///
/// The `<command>::main` dispatch on `$cmd` is tried first. Only when that
/// shape is absent are generic `case "$1" in` blocks scanned, so one file
/// never contributes through both shapes. Duplicate (name, description)
/// pairs are dropped.
pub fn match_subcommands(text: &str, command: &str) -> Vec<Subcommand> {
    let bodies = main_dispatch(text, command)
        .map(|body| vec![body])
        .unwrap_or_else(|| generic_dispatch(text));

    let mut subcommands: Vec<Subcommand> = Vec::new();
    for body in bodies {
        for branch in split_branches(body, &RE_SUBCOMMAND_LABEL) {
            let description = first_comment(&branch.handler);
            for label in branch.label.split('|') {
                let name = label.trim_matches(|c| c == '\'' || c == '"');
                if RESERVED_SUBCOMMANDS.contains(&name) {
                    continue;
                }
                let entry = Subcommand {
                    name: name.to_string(),
                    description: description.clone(),
                };
                if !subcommands.contains(&entry) {
                    subcommands.push(entry);
                }
            }
        }
    }
    subcommands
}

/// Body of `case "$cmd" in` inside `<command>::main`.
fn main_dispatch<'a>(text: &'a str, command: &str) -> Option<&'a str> {
    let header = function_header(command, r"::main\b")?;
    let body = function_body(text, &header)?;
    let head = RE_CASE_CMD.find(body)?;
    case_body(&body[head.end()..])
}

/// Bodies of every top-level `case "$1" in` block.
fn generic_dispatch(text: &str) -> Vec<&str> {
    let mut bodies = Vec::new();
    let mut pos = 0;
    while let Some(head) = RE_CASE_ARG1.find_at(text, pos) {
        let Some(body) = case_body(&text[head.end()..]) else {
            break;
        };
        bodies.push(body);
        pos = head.end() + body.len();
    }
    bodies
}

// -- Case bodies and branches -----------------------------------------------------

/// Text up to the `esac` that closes the case whose `in` precedes `text`.
///
/// Nested `case ... in` blocks are skipped. An unclosed case yields `None`.
fn case_body(text: &str) -> Option<&str> {
    let mut depth = 1usize;
    for token in RE_CASE_TOKEN.find_iter(text) {
        if token.as_str() == "esac" {
            depth -= 1;
            if depth == 0 {
                return Some(&text[..token.start()]);
            }
        } else {
            depth += 1;
        }
    }
    None
}

/// One `label) handler ;;` arm of a case body.
#[derive(Debug)]
struct Branch<'a> {
    label: &'a str,
    handler: String,
}

/// Split a case body into branches whose label matches `label_re`.
///
/// Group 1 of `label_re` is the label list, group 2 the rest of the line.
/// A branch ends at its `;;`, at the next top-level label, or at the end of
/// the body. Lines of unrecognized branches are ignored.
fn split_branches<'a>(body: &'a str, label_re: &Regex) -> Vec<Branch<'a>> {
    let mut branches = Vec::new();
    let mut current: Option<Branch<'a>> = None;
    let mut depth = 0usize;

    for line in body.lines() {
        let code = if depth == 0 && !is_terminator(line) {
            label_re.captures(line).map(|caps| {
                if let Some(done) = current.take() {
                    branches.push(done);
                }
                let (label, rest) = match (caps.get(1), caps.get(2)) {
                    (Some(label), Some(rest)) => (label.as_str(), rest.as_str()),
                    _ => ("", ""),
                };
                current = Some(Branch {
                    label,
                    handler: rest.to_string(),
                });
                rest
            })
        } else {
            None
        };

        let code = match code {
            Some(rest) => rest,
            None => {
                if let Some(branch) = current.as_mut() {
                    branch.handler.push('\n');
                    branch.handler.push_str(line);
                }
                line
            }
        };

        for token in RE_CASE_TOKEN.find_iter(code) {
            if token.as_str() == "esac" {
                depth = depth.saturating_sub(1);
            } else {
                depth += 1;
            }
        }

        if depth == 0 && code.contains(";;") {
            if let Some(done) = current.take() {
                branches.push(done);
            }
        }
    }

    if let Some(done) = current {
        branches.push(done);
    }
    branches
}

fn is_terminator(line: &str) -> bool {
    line.trim_start().starts_with(";;")
}

/// First non-empty shell comment in a handler, or an empty string.
fn first_comment(handler: &str) -> String {
    handler
        .lines()
        .filter_map(|line| RE_COMMENT.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}
