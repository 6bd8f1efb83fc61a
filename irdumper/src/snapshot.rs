// SPDX-License-Identifier: BSD-3-Clause
//! Where module snapshots go
//!
//! A module named `src/a.c` is written to `<root>/src/a.bc`. Absolute names
//! are re-rooted under `<root>`; `..` components are kept as they are.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::info;

pub const ROOT: &str = "bcfile";
pub const EXTENSION: &str = "bc";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Module name {} has no file name", hint.display())]
    NoFileName { hint: PathBuf },
    #[error("Couldn't create directory {}: {source}", dir.display())]
    CreateDir { dir: PathBuf, source: io::Error },
    #[error("Couldn't write bitcode to {}", path.display())]
    Write { path: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    root: PathBuf,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::new(ROOT)
    }
}

impl Snapshot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Snapshot { root: root.into() }
    }

    pub fn output_path(&self, hint: &Path) -> Result<PathBuf, Error> {
        let file_name = hint.file_name().ok_or_else(|| Error::NoFileName {
            hint: hint.to_path_buf(),
        })?;
        let mut path = self.root.clone();
        if let Some(parent) = hint.parent() {
            for component in parent.components() {
                match component {
                    Component::Normal(c) => path.push(c),
                    Component::ParentDir => path.push(".."),
                    Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
                }
            }
        }
        path.push(file_name);
        path.set_extension(EXTENSION);
        Ok(path)
    }

    /// Compute the output path for `hint` and make sure its directory exists.
    pub fn prepare(&self, hint: &Path) -> Result<PathBuf, Error> {
        let path = self.output_path(hint)?;
        if let Some(dir) = path.parent() {
            let existed = dir.is_dir();
            // Also fails when something other than a directory is in the way.
            fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
                dir: dir.to_path_buf(),
                source,
            })?;
            if !existed {
                info!("Created directory: {}", dir.display());
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(hint: &str) -> PathBuf {
        Snapshot::default().output_path(Path::new(hint)).unwrap()
    }

    #[test]
    fn mirrors_source_layout() {
        assert_eq!(output("src/a.c"), PathBuf::from("bcfile/src/a.bc"));
        assert_eq!(output("lib/x/y/z.cpp"), PathBuf::from("bcfile/lib/x/y/z.bc"));
    }

    #[test]
    fn bare_names() {
        assert_eq!(output("a.c"), PathBuf::from("bcfile/a.bc"));
        assert_eq!(output("./a.c"), PathBuf::from("bcfile/a.bc"));
        assert_eq!(output("noext"), PathBuf::from("bcfile/noext.bc"));
        assert_eq!(output("a.tar.gz"), PathBuf::from("bcfile/a.tar.bc"));
    }

    #[test]
    fn absolute_and_parent() {
        assert_eq!(output("/usr/src/a.c"), PathBuf::from("bcfile/usr/src/a.bc"));
        assert_eq!(output("../up/a.c"), PathBuf::from("bcfile/../up/a.bc"));
    }

    #[test]
    fn no_file_name() {
        let err = Snapshot::default()
            .output_path(Path::new("src/.."))
            .unwrap_err();
        assert!(matches!(err, Error::NoFileName { .. }));
        assert!(Snapshot::default().output_path(Path::new("")).is_err());
    }

    #[test]
    fn prepare_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::new(dir.path().join(ROOT));
        let path = snapshot.prepare(Path::new("src/a.c")).unwrap();
        assert_eq!(path, dir.path().join("bcfile/src/a.bc"));
        assert!(dir.path().join("bcfile/src").is_dir());
        assert!(!path.exists());

        // Existing directories are fine.
        let again = snapshot.prepare(Path::new("src/b.c")).unwrap();
        assert_eq!(again, dir.path().join("bcfile/src/b.bc"));
    }

    #[test]
    fn prepare_reports_blocked_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(ROOT);
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("src"), "not a directory").unwrap();
        let err = Snapshot::new(&root)
            .prepare(Path::new("src/a.c"))
            .unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }));
    }

    #[test]
    fn prepare_reports_blocked_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(ROOT);
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("src"), "not a directory").unwrap();
        let err = Snapshot::new(&root)
            .prepare(Path::new("src/deeper/a.c"))
            .unwrap_err();
        let Error::CreateDir { dir: blocked, .. } = &err else {
            panic!("expected a directory error, got {err}");
        };
        assert_eq!(*blocked, root.join("src/deeper"));
        assert_eq!(
            std::fs::read_to_string(root.join("src")).unwrap(),
            "not a directory"
        );
    }
}
