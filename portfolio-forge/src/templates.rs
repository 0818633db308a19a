//! On-disk template loading.
//!
//! The template root holds two file sets: `base/` (project scaffolding shared
//! by every portfolio) and `developer/` (the variant's components). Both are
//! read recursively into [`FileSet`]s keyed by forward-slash relative paths,
//! visited in sorted order so the publish order is deterministic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use portfolio_forge_core::fileset::FileSet;

/// The two template directories a pipeline run materializes from.
#[derive(Debug, Clone)]
pub struct TemplateDirs {
    pub base: PathBuf,
    pub variant: PathBuf,
}

impl TemplateDirs {
    pub fn new(root: &Path) -> Self {
        Self {
            base: root.join("base"),
            variant: root.join("developer"),
        }
    }

    /// Read both template sets from disk.
    pub fn load(&self) -> io::Result<(FileSet, FileSet)> {
        let base = read_template_files(&self.base)?;
        let variant = read_template_files(&self.variant)?;
        Ok((base, variant))
    }
}

/// Read every file under `dir` into a FileSet keyed by relative path.
pub fn read_template_files(dir: &Path) -> io::Result<FileSet> {
    let mut files = FileSet::new();
    read_dir_into(dir, dir, &mut files)?;
    Ok(files)
}

fn read_dir_into(current: &Path, base: &Path, files: &mut FileSet) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(current)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            read_dir_into(&path, base, files)?;
        } else {
            let content = fs::read_to_string(&path)?;
            let relative = path
                .strip_prefix(base)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(key, content);
        }
    }
    Ok(())
}
