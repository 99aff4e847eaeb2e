//! OPC container access for `.docx` files.
//!
//! A `.docx` file is a zip archive. The engine rewrites exactly one entry,
//! `word/document.xml`; every other entry must come out with identical
//! content bytes. The whole archive is held in memory so a failed run never
//! leaves partial output behind.

use std::fs;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// Internal path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// One stored archive entry.
#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    data: Vec<u8>,
}

/// A `.docx` container held fully in memory, preserving entry order.
#[derive(Debug, Clone)]
pub struct Package {
    entries: Vec<PackageEntry>,
}

impl Package {
    /// Open a container from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_bytes(&fs::read(path)?)
    }

    /// Open a container from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Open a container from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push(PackageEntry {
                name: file.name().to_string(),
                data,
            });
        }
        Ok(Self { entries })
    }

    /// Content of the main document part.
    pub fn document_part(&self) -> Result<&[u8]> {
        self.entry(DOCUMENT_PART)
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))
    }

    /// Replace the main document part.
    pub fn set_document_part(&mut self, data: Vec<u8>) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == DOCUMENT_PART)
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
        entry.data = data;
        Ok(())
    }

    /// Content of an arbitrary entry.
    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.data.as_slice())
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Serialize the container back to zip bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for entry in &self.entries {
            writer.start_file(entry.name.as_str(), options)?;
            writer.write_all(&entry.data)?;
        }
        Ok(writer.finish()?.into_inner())
    }

    /// Write the container to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}
