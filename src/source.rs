//! Source-tree discovery, file reading and the output directory sink.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where a tool's sources live and where its documentation goes.
#[derive(Debug, Clone)]
pub struct Layout {
    /// e.g. `mulle-sde`
    pub tool: String,
    /// Directory holding `<tool>-<command>.sh` files.
    pub source_dir: PathBuf,
    /// The top-level script with the command listing.
    pub main_script: PathBuf,
    pub output_dir: PathBuf,
}

impl Layout {
    /// Default main script is `<source_dir>/../<tool>`.
    pub fn new(
        tool: &str,
        source_dir: PathBuf,
        main_script: Option<PathBuf>,
        output_dir: PathBuf,
    ) -> Self {
        let main_script = main_script.unwrap_or_else(|| source_dir.join("..").join(tool));
        Layout {
            tool: tool.to_string(),
            source_dir,
            main_script,
            output_dir,
        }
    }

    /// File name of the shared helpers, which is never a command.
    pub fn common_file(&self) -> String {
        format!("{}-common.sh", self.tool)
    }

    /// Fail unless the source directory exists.
    pub fn check(&self) -> Result<()> {
        if self.source_dir.is_dir() {
            Ok(())
        } else {
            Err(Error::SourceDirNotFound(self.source_dir.clone()))
        }
    }

    /// `<tool>-*.sh` files in the source directory, sorted, common file excluded.
    pub fn command_files(&self) -> Result<Vec<PathBuf>> {
        let dir = glob::Pattern::escape(&self.source_dir.to_string_lossy());
        let pattern = format!("{}/{}-*.sh", dir, glob::Pattern::escape(&self.tool));
        let common = self.common_file();

        let mut files: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .filter(|p| p.file_name().and_then(|n| n.to_str()) != Some(common.as_str()))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Derive the command name from a file path.
    /// "src/mulle-sde-craft.sh" → "craft"
    pub fn command_name(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        let name = stem.strip_prefix(self.tool.as_str())?.strip_prefix('-')?;
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

/// Read the main script. Absence or a read failure is logged and yields `None`.
pub fn read_main_script(path: &Path) -> Option<String> {
    if !path.is_file() {
        warn!(path = %path.display(), "main script not found, continuing without a command catalog");
        return None;
    }
    info!(path = %path.display(), "analyzing main script");
    read_lossy(path)
}

/// Read one command file. A failure is logged and yields `None`.
pub fn read_command_file(path: &Path) -> Option<String> {
    read_lossy(path)
}

fn read_lossy(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

/// Output sink: persists named text blobs under one directory.
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Create the directory (and parents) if needed.
    pub fn create(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| Error::io(root, e))?;
        Ok(OutputDir {
            root: root.to_path_buf(),
        })
    }

    /// Write `contents` to `<root>/<name>` and return the path.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }
}
