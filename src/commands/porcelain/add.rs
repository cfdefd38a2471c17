use crate::areas::repository::Repository;
use crate::artifacts::core::{RepoError, validate_work_path};
use crate::artifacts::objects::blob::Blob;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Stage a file, or every file under a directory.
    ///
    /// Blobs are persisted before the index references them, so an
    /// interrupted `add` leaves at worst unreferenced objects behind.
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        self.require_initialized()?;

        if !self.workspace().contains(Path::new(path)) {
            return Err(RepoError::PathNotFound(Path::new(path).to_path_buf()).into());
        }

        let file_paths = self.workspace().list_files(Some(path.into()))?;

        let mut index = self.index();
        index.rehydrate()?;

        for file_path in file_paths {
            let work_path = file_path.to_string_lossy().replace('\\', "/");
            validate_work_path(&work_path)?;

            let data = self.workspace().read_file(&file_path)?;
            let blob = Blob::new(data);
            let blob_id = blob.object_id();
            self.database().put(blob.into_data())?;

            index.put(work_path.clone(), blob_id);
            writeln!(self.writer(), "Added {work_path} to staging area.")?;
        }

        index.write_updates()?;

        Ok(())
    }
}
