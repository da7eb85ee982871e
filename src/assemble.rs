//! Join the catalog and the per-file analyses into render-ready documents.
//!
//! Aliases are attached to their target commands, then every registry
//! command is paired with the analysis of the file that carries its name.

use crate::model::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Produce one [`ResolvedDocument`] per registry command, in registry order.
///
/// Commands without a file get an empty analysis. Files whose name has no
/// registry entry are left out.
pub fn assemble(
    catalog: Catalog,
    mut analyses: BTreeMap<String, CommandFileAnalysis>,
) -> Vec<ResolvedDocument> {
    let Catalog {
        mut registry,
        aliases,
    } = catalog;

    attach_aliases(&mut registry, &aliases);

    let documents: Vec<ResolvedDocument> = registry
        .into_commands()
        .into_iter()
        .map(|command| {
            let analysis = analyses.remove(&command.name).unwrap_or_default();
            ResolvedDocument { command, analysis }
        })
        .collect();

    for orphan in analyses.keys() {
        debug!(command = %orphan, "command file has no registry entry");
    }

    documents
}

/// Append each live alias to its target, skipping exact duplicates.
fn attach_aliases(registry: &mut Registry, aliases: &AliasMap) {
    for (alias, target) in aliases.iter() {
        match registry.get_mut(target) {
            Some(command) => {
                if !command.aliases.iter().any(|a| a == alias) {
                    command.aliases.push(alias.to_string());
                }
            }
            None => warn!(alias, target, "alias points at an unknown command"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> Command {
        Command {
            name: name.to_string(),
            description: format!("{name} things"),
            ..Default::default()
        }
    }

    fn catalog(names: &[&str], aliases: &[(&str, &str)]) -> Catalog {
        let mut catalog = Catalog::default();
        for name in names {
            catalog.registry.insert(command(name));
        }
        for (alias, target) in aliases {
            catalog.aliases.insert(alias.to_string(), target.to_string());
        }
        catalog
    }

    #[test]
    fn aliases_attach_once_in_discovery_order() {
        let catalog = catalog(
            &["init", "craft"],
            &[("i", "init"), ("b", "craft"), ("i", "init"), ("new", "init")],
        );
        let docs = assemble(catalog, BTreeMap::new());
        assert_eq!(docs[0].command.aliases, ["i", "new"]);
        assert_eq!(docs[1].command.aliases, ["b"]);
    }

    #[test]
    fn alias_already_present_is_not_duplicated() {
        let mut catalog = catalog(&["init"], &[("i", "init")]);
        catalog
            .registry
            .get_mut("init")
            .unwrap()
            .aliases
            .push("i".to_string());
        let docs = assemble(catalog, BTreeMap::new());
        assert_eq!(docs[0].command.aliases, ["i"]);
    }

    #[test]
    fn dangling_alias_is_ignored() {
        let catalog = catalog(&["init"], &[("x", "missing")]);
        let docs = assemble(catalog, BTreeMap::new());
        assert_eq!(docs.len(), 1);
        assert!(docs[0].command.aliases.is_empty());
    }

    #[test]
    fn left_join_on_command_name() {
        let mut analyses = BTreeMap::new();
        analyses.insert(
            "craft".to_string(),
            CommandFileAnalysis {
                usage: Some("Usage: craft".to_string()),
                ..Default::default()
            },
        );
        analyses.insert("orphan".to_string(), CommandFileAnalysis::default());

        let docs = assemble(catalog(&["init", "craft"], &[]), analyses);
        let names: Vec<_> = docs.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["init", "craft"]);
        assert_eq!(docs[0].analysis, CommandFileAnalysis::default());
        assert_eq!(docs[1].analysis.usage.as_deref(), Some("Usage: craft"));
    }

    #[test]
    fn empty_catalog_produces_nothing() {
        let mut analyses = BTreeMap::new();
        analyses.insert("craft".to_string(), CommandFileAnalysis::default());
        assert!(assemble(Catalog::default(), analyses).is_empty());
    }
}
