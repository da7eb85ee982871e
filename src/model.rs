//! Command catalog and per-file analysis, shared by every renderer.

use serde::Serialize;
use std::collections::HashMap;

/// One top-level command announced by the main script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Command {
    pub name: String,
    pub description: String,
    /// Parsed from the `(help: yes|no)` suffix; absent means no.
    pub has_help: bool,
    /// Filled in by the assembler, in alias discovery order.
    pub aliases: Vec<String>,
}

/// Ordered command registry keyed by name.
///
/// Re-registering a name replaces the entry in place, so the first
/// occurrence keeps its position.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn insert(&mut self, command: Command) {
        match self.index.get(&command.name) {
            Some(&slot) => self.commands[slot] = command,
            None => {
                self.index.insert(command.name.clone(), self.commands.len());
                self.commands.push(command);
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&slot| &self.commands[slot])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.index.get(name).map(|&slot| &mut self.commands[slot])
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

/// Raw alias → target map. Keys are unique; a later assignment for the
/// same alias overwrites the target but keeps the original position.
#[derive(Debug, Default)]
pub struct AliasMap {
    entries: Vec<(String, String)>,
}

impl AliasMap {
    pub fn insert(&mut self, alias: String, target: String) {
        match self.entries.iter_mut().find(|(a, _)| *a == alias) {
            Some(entry) => entry.1 = target,
            None => self.entries.push((alias, target)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, t)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the main script yields.
#[derive(Debug, Default)]
pub struct Catalog {
    pub registry: Registry,
    pub aliases: AliasMap,
}

/// A flag recognized by a command's option-parsing loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    /// e.g. `-f`
    pub short: Option<String>,
    /// e.g. `--force`
    pub long: Option<String>,
    pub takes_arg: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Subcommand {
    pub name: String,
    pub description: String,
}

/// What one command-implementation file contributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandFileAnalysis {
    /// Heredoc body of the usage function, trimmed.
    pub usage: Option<String>,
    pub visible_options: Vec<OptionSpec>,
    /// No recognizer populates this yet; rendered when non-empty.
    pub hidden_options: Vec<OptionSpec>,
    pub subcommands: Vec<Subcommand>,
}

impl CommandFileAnalysis {
    pub fn has_options(&self) -> bool {
        !self.visible_options.is_empty() || !self.hidden_options.is_empty()
    }
}

/// Render-ready join of a registry command and its file analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDocument {
    pub command: Command,
    pub analysis: CommandFileAnalysis,
}

impl ResolvedDocument {
    pub fn name(&self) -> &str {
        &self.command.name
    }
}
