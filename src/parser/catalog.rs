//! Main-catalog extraction: command registry and alias map from the
//! top-level script.

use crate::model::Catalog;
use crate::parser::patterns;
use tracing::debug;

/// Build the registry and raw alias map from the main script's text.
///
/// Nothing recognizable yields an empty catalog, not an error.
pub fn extract(text: &str) -> Catalog {
    let mut catalog = Catalog::default();

    for (alias, target) in patterns::match_aliases(text) {
        catalog.aliases.insert(alias, target);
    }

    for command in patterns::match_command_catalog(text) {
        catalog.registry.insert(command);
    }

    debug!(
        commands = catalog.registry.len(),
        aliases = catalog.aliases.len(),
        "extracted main catalog"
    );
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_SCRIPT: &str = r#"#! /usr/bin/env bash

sde::main()
{
   local cmd="$1"

   case "${cmd}" in
      'i')
         cmd='init'
      ;;

      'b'|'build') cmd='craft'
      ;;

      'gone') cmd='vanished'
      ;;
   esac

   case "${cmd}" in
      'commands')
         cat <<EOF
init - start a project
craft - build the project (help: yes)
EOF
      ;;
   esac
}
"#;

    #[test]
    fn extracts_registry_in_listing_order() {
        let catalog = extract(MAIN_SCRIPT);
        let names: Vec<_> = catalog.registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["init", "craft"]);
        assert!(catalog.registry.get("craft").unwrap().has_help);
    }

    #[test]
    fn keeps_dangling_aliases_in_raw_map() {
        let catalog = extract(MAIN_SCRIPT);
        assert_eq!(catalog.aliases.get("i"), Some("init"));
        assert_eq!(catalog.aliases.get("build"), Some("craft"));
        assert_eq!(catalog.aliases.get("gone"), Some("vanished"));
        assert!(!catalog.registry.contains("vanished"));
    }

    #[test]
    fn empty_script_gives_empty_catalog() {
        let catalog = extract("");
        assert!(catalog.registry.is_empty());
        assert!(catalog.aliases.is_empty());
    }
}
