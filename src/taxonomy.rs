//! Category table used to group commands on the index page.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Heading for commands no category claims.
pub const CATCH_ALL: &str = "Other Commands";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Command names in the order they should be listed.
    pub commands: Vec<String>,
}

/// Ordered list of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    pub categories: Vec<Category>,
}

const BUILTIN: &[(&str, &[&str])] = &[
    ("Project Setup", &["init", "init-and-enter", "upgrade", "migrate", "reinit"]),
    ("File Management", &["add", "remove", "move", "list", "find", "steal", "symlink"]),
    ("Dependencies", &["dependency", "library", "fetch", "update"]),
    ("Building", &["craft", "recraft", "crun", "clean", "definition", "craftinfo"]),
    ("Reflection", &["reflect", "callback", "task", "monitor"]),
    ("Testing", &["test", "retest"]),
    ("Execution", &["run", "exec", "debug"]),
    ("Project Configuration", &["environment", "extension", "config", "project", "style"]),
    (
        "Pattern Files",
        &["patternfile", "match", "patterncheck", "patternenv", "filename", "ignore"],
    ),
    (
        "Information",
        &[
            "status", "view", "show", "log", "product", "craftorder", "linkorder",
            "headerorder", "symbol", "json", "treestatus", "craftstatus",
        ],
    ),
    (
        "Advanced",
        &[
            "export", "subproject", "unveil", "protect", "unprotect", "vibecoding",
            "sweatcoding", "edit", "api", "howto", "install",
        ],
    ),
    (
        "Utilities",
        &[
            "tool", "searchpath", "get", "set", "env-identifier", "donefile",
            "addiction-dir", "dependency-dir", "kitchen-dir", "stash-dir",
            "libexec-dir", "project-dir", "source-dir", "library-path", "uname",
        ],
    ),
];

impl Taxonomy {
    /// The default table.
    pub fn builtin() -> Self {
        Taxonomy {
            categories: BUILTIN
                .iter()
                .map(|(name, commands)| Category {
                    name: name.to_string(),
                    commands: commands.iter().map(|c| c.to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Load a table from a JSON array of `{"name", "commands"}` objects.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let taxonomy: Taxonomy = serde_json::from_str(&text).map_err(|source| Error::Categories {
            path: path.to_path_buf(),
            source,
        })?;
        if taxonomy.categories.iter().any(|c| c.name.trim().is_empty()) {
            return Err(Error::EmptyCategory);
        }
        Ok(taxonomy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_table_order() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.categories.len(), 12);
        assert_eq!(taxonomy.categories[0].name, "Project Setup");
        assert_eq!(taxonomy.categories[0].commands[0], "init");
        assert_eq!(taxonomy.categories[3].name, "Building");
        assert!(taxonomy.categories[3].commands.contains(&"craft".to_string()));
    }

    #[test]
    fn loads_json_table() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"name": "Core", "commands": ["b", "a"]}]"#)
            .unwrap();
        let taxonomy = Taxonomy::from_file(file.path()).unwrap();
        assert_eq!(taxonomy.categories.len(), 1);
        assert_eq!(taxonomy.categories[0].commands, ["b", "a"]);
    }

    #[test]
    fn rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(
            Taxonomy::from_file(file.path()),
            Err(Error::Categories { .. })
        ));
    }

    #[test]
    fn rejects_unnamed_category() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"name": " ", "commands": []}]"#).unwrap();
        assert!(matches!(
            Taxonomy::from_file(file.path()),
            Err(Error::EmptyCategory)
        ));
    }
}
