use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use super::surface::PdfInvoice;
use crate::core::{BillingResult, DocumentSink};

/// Writes each document to `"{name}.pdf"` inside a directory.
///
/// The directory is created on first use. Existing files with the same name
/// are overwritten.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DocumentSink<PdfInvoice> for DirectorySink {
    fn accept(&mut self, name: &str, mut document: PdfInvoice) -> BillingResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{name}.pdf"));
        let mut writer = BufWriter::new(File::create(&path)?);
        document.save_to(&mut writer)?;
        info!(path = %path.display(), pages = document.page_count(), "invoice saved");
        self.written.push(path);
        Ok(())
    }
}
