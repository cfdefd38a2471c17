use crate::areas::repository::MINIGIT_DIR;
use crate::artifacts::core::RepoError;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [MINIGIT_DIR, ".", ".."];

/// The user-owned working directory rooted at the repository root.
///
/// Everything outside the reserved `.minigit/` subtree belongs to the user,
/// but `clean` may wipe it wholesale when a snapshot is materialized.
#[derive(Debug, new)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, file_path: &Path) -> bool {
        self.path.join(file_path).exists()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("unable to read file {}", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    pub fn write_file(&self, file_path: &str, data: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("unable to create parent directories for {}", file_path.display())
            })?;
        }

        std::fs::write(&file_path, data)
            .with_context(|| format!("unable to write file {}", file_path.display()))
    }

    /// List every file under the given workspace path, relative to the root.
    ///
    /// The reserved `.minigit/` subtree is never listed.
    pub fn list_files(&self, root_file_path: Option<PathBuf>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => self.path.join(p),
            None => self.path.clone().into(),
        };

        if !root_file_path.exists() {
            return Err(RepoError::PathNotFound(root_file_path).into());
        }

        if root_file_path.is_dir() {
            Ok(WalkDir::new(&root_file_path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
                .collect::<Vec<_>>())
        } else {
            Ok(vec![
                root_file_path
                    .strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .unwrap_or_default(),
            ])
        }
    }

    /// Remove every entry at the workspace root except `.minigit/`.
    ///
    /// Destructive by contract: uncommitted local edits are discarded. This
    /// is the first half of materializing a snapshot.
    pub fn clean(&self) -> anyhow::Result<()> {
        for entry in std::fs::read_dir(self.path.as_ref())
            .with_context(|| format!("unable to list workspace {}", self.path.display()))?
        {
            let entry = entry?;
            let name = entry.file_name();

            if name.to_string_lossy() == MINIGIT_DIR {
                continue;
            }

            let entry_path = entry.path();
            if entry_path.is_dir() {
                std::fs::remove_dir_all(&entry_path)
                    .with_context(|| format!("unable to remove {}", entry_path.display()))?;
            } else {
                std::fs::remove_file(&entry_path)
                    .with_context(|| format!("unable to remove {}", entry_path.display()))?;
            }
        }

        Ok(())
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() && !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }
}
