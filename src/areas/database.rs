//! Object database
//!
//! The database stores all objects (blobs and commits) using
//! content-addressable storage: one file per object under
//! `.minigit/objects/`, named by the fingerprint of its bytes and holding
//! those bytes verbatim.
//!
//! Writes are idempotent on the id. New objects go through a temp file and
//! a rename, so a crash mid-write leaves at worst an unreferenced temp file
//! behind; a half-written object can never be reached under a matching id.

use crate::artifacts::core::{RepoError, write_atomically};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::digest::fingerprint;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Content-addressed object database
#[derive(Debug, new)]
pub struct Database {
    /// Path to the objects directory (typically `.minigit/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store raw bytes, returning their content-addressed id
    ///
    /// If an object with this id already exists the write is skipped; equal
    /// content always collapses onto one file.
    pub fn put(&self, data: Bytes) -> anyhow::Result<ObjectId> {
        let object_id = fingerprint(&data);
        let object_path = self.object_path(&object_id);

        if !object_path.exists() {
            write_atomically(&object_path, &data).with_context(|| {
                format!("unable to store object {}", object_path.display())
            })?;
        }

        Ok(object_id)
    }

    /// Load an object's raw bytes
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);

        if !object_path.exists() {
            return Err(RepoError::ObjectMissing(object_id.clone()).into());
        }

        let data = std::fs::read(&object_path)
            .with_context(|| format!("unable to read object {}", object_path.display()))?;

        Ok(Bytes::from(data))
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).exists()
    }

    /// Load an object and parse it as a commit record
    pub fn parse_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let data = self.get(object_id)?;

        Commit::deserialize(&data)
            .with_context(|| format!("object {object_id} is not a commit record"))
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    fn database() -> (TempDir, Database) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let objects_path = dir.path().join("objects");
        std::fs::create_dir_all(&objects_path).expect("failed to create objects dir");

        let database = Database::new(objects_path.into_boxed_path());
        (dir, database)
    }

    #[test]
    fn get_returns_what_put_stored() {
        let (_dir, database) = database();

        let id = database.put(Bytes::from_static(b"hello\n")).unwrap();
        assert_eq!(id, fingerprint(b"hello\n"));
        assert_eq!(database.get(&id).unwrap(), Bytes::from_static(b"hello\n"));
    }

    #[test]
    fn put_is_idempotent_on_the_id() {
        let (_dir, database) = database();

        let first = database.put(Bytes::from_static(b"same bytes")).unwrap();
        let second = database.put(Bytes::from_static(b"same bytes")).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            std::fs::read_dir(database.objects_path()).unwrap().count(),
            1
        );
    }

    #[test]
    fn stores_binary_content_verbatim() {
        let (_dir, database) = database();
        let payload = Bytes::from(vec![0u8, 159, 146, 150, 255]);

        let id = database.put(payload.clone()).unwrap();
        assert_eq!(database.get(&id).unwrap(), payload);
    }

    #[test]
    fn missing_objects_surface_object_missing() {
        let (_dir, database) = database();
        let absent = fingerprint(b"never stored");

        assert!(!database.exists(&absent));
        let err = database.get(&absent).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepoError>(),
            Some(RepoError::ObjectMissing(_))
        ));
    }
}
