//! Receipt document storage.
//!
//! Each receipt lives at `<media_root>/receipts/<token>.pdf`. Files are
//! written to a temporary file in the same directory and renamed into place,
//! so readers never observe a partially written document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tempfile::NamedTempFile;
use uuid::Uuid;

use super::ReceiptError;

const RECEIPTS_DIR: &str = "receipts";

pub struct ReceiptStore {
    dir: PathBuf,
    latest: RwLock<Option<Uuid>>,
}

impl ReceiptStore {
    pub fn new(media_root: &Path) -> Self {
        Self {
            dir: media_root.join(RECEIPTS_DIR),
            latest: RwLock::new(None),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, token: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.pdf", token))
    }

    /// Store `pdf` under `token` and make it the latest receipt.
    pub fn save(&self, token: Uuid, pdf: &[u8]) -> Result<PathBuf, ReceiptError> {
        fs::create_dir_all(&self.dir).map_err(ReceiptError::MediaDir)?;

        let mut file = NamedTempFile::new_in(&self.dir).map_err(ReceiptError::WriteDocument)?;
        file.write_all(pdf).map_err(ReceiptError::WriteDocument)?;
        file.as_file().sync_all().map_err(ReceiptError::WriteDocument)?;

        let path = self.path_for(&token);
        file.persist(&path)
            .map_err(|e| ReceiptError::WriteDocument(e.error))?;

        *self.latest.write() = Some(token);
        Ok(path)
    }

    /// Token of the most recently saved receipt in this process.
    pub fn latest(&self) -> Option<Uuid> {
        *self.latest.read()
    }

    /// Contents of the receipt stored under `token`, if any.
    pub fn read(&self, token: &Uuid) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(token)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
