use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Take a snapshot of the file names directly inside a directory.
    ///
    /// Only regular files (or links to them) are returned. Hidden entries are
    /// ignored, subdirectories are skipped with a warning, and names are sorted
    /// so that two runs over the same directory see the same order.
    pub fn list_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(anyhow!("Not a directory: {:?}", dir));
        }

        let mut names = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            let Some(name) = entry.file_name().to_str() else {
                warn!("Skipping file with a non UTF-8 name: {:?}", entry.path());
                continue;
            };

            if name.starts_with('.') {
                debug!("Skipping hidden entry: {}", name);
                continue;
            }

            if entry.file_type().is_dir() {
                warn!("Skipping subdirectory: {}", name);
                continue;
            }

            if !entry.file_type().is_file() {
                debug!("Skipping non-regular entry: {}", name);
                continue;
            }

            names.push(name.to_string());
        }

        Ok(names)
    }

    /// Replace a file's content in one step.
    ///
    /// Content goes to a temporary file next to the target which is then
    /// renamed over it, so readers never see a half-written file.
    pub fn write_atomically<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        temp.persist(path)
            .with_context(|| format!("Failed to replace file: {:?}", path))?;

        Ok(())
    }
}
