use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::model::InvoiceNumber;

/// Rendered invoices on disk, one `<invoice_number>.pdf` per invoice in
/// a single directory.
#[derive(Debug, Clone)]
pub struct InvoiceStore {
    dir: PathBuf,
}

impl InvoiceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        InvoiceStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, number: &InvoiceNumber) -> PathBuf {
        self.dir.join(number.file_name())
    }

    /// Publish `pdf` as the invoice's file, replacing any previous one.
    ///
    /// The bytes go to a temporary file in the same directory which is
    /// then renamed over the target, so readers never see a partial file.
    pub fn write(&self, number: &InvoiceNumber, pdf: &[u8]) -> Result<PathBuf> {
        let target = self.path_for(number);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(pdf)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|err| err.error)?;
        tracing::debug!(path = %target.display(), bytes = pdf.len(), "invoice stored");
        Ok(target)
    }

    /// Read a stored invoice. `Ok(None)` when it has not been generated.
    pub fn read(&self, number: &InvoiceNumber) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(number)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Read by file name. Anything other than `<invoice number>.pdf`
    /// cannot have been generated, so it reads as `Ok(None)` without
    /// touching the filesystem.
    pub fn read_file(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        match InvoiceNumber::from_file_name(file_name) {
            Ok(number) => self.read(&number),
            Err(_) => Ok(None),
        }
    }
}
