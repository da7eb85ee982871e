//! Index layout shared by all renderers.
//!
//! Every command lands in exactly one section: the first configured category
//! that lists it, or the catch-all.

use crate::model::{Command, ResolvedDocument};
use crate::taxonomy::{Taxonomy, CATCH_ALL};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Serialize)]
pub struct IndexSection<'a> {
    pub name: &'a str,
    pub commands: Vec<&'a Command>,
}

/// Lay out the index sections.
///
/// Every category gets a section, in table order, listing its commands in
/// authored order. The catch-all comes last, sorted by name, and only when
/// something is left over.
pub fn build<'a>(docs: &'a [ResolvedDocument], taxonomy: &'a Taxonomy) -> Vec<IndexSection<'a>> {
    let by_name: HashMap<&str, &Command> = docs.iter().map(|d| (d.name(), &d.command)).collect();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut sections = Vec::new();

    for category in &taxonomy.categories {
        let mut commands = Vec::new();
        for name in &category.commands {
            if let Some(&command) = by_name.get(name.as_str()) {
                if placed.insert(command.name.as_str()) {
                    commands.push(command);
                }
            }
        }
        sections.push(IndexSection {
            name: &category.name,
            commands,
        });
    }

    let mut rest: Vec<&Command> = docs
        .iter()
        .map(|d| &d.command)
        .filter(|c| !placed.contains(c.name.as_str()))
        .collect();
    if !rest.is_empty() {
        rest.sort_by(|a, b| a.name.cmp(&b.name));
        sections.push(IndexSection {
            name: CATCH_ALL,
            commands: rest,
        });
    }

    sections
}
