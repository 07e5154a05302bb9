/*!
 * Zip package handling for `.docx` files.
 *
 * The whole archive is read into memory so the output may safely replace the
 * input file. Entries keep their order and compression method on save.
 */

use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::errors::DocumentError;

/// Part name of the main document body
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// A single archive entry held in memory
#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// In-memory `.docx` package
#[derive(Debug, Clone)]
pub struct DocxPackage {
    entries: Vec<PackageEntry>,
}

impl DocxPackage {
    /// Open a package from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let package = Self::from_reader(file)?;
        debug!("Loaded package {:?} with {} entries", path, package.entries.len());
        Ok(package)
    }

    /// Read a package from any seekable reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, DocumentError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push(PackageEntry {
                name: file.name().to_string(),
                data,
                compression: file.compression(),
                is_dir: file.is_dir(),
            });
        }

        let package = Self { entries };
        if !package.has_part(MAIN_DOCUMENT_PART) {
            return Err(DocumentError::MissingPart(MAIN_DOCUMENT_PART.to_string()));
        }
        Ok(package)
    }

    /// Read a package from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Names of all entries in archive order
    pub fn part_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Raw bytes of a part
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.data.as_slice())
    }

    /// Main document XML decoded as UTF-8
    pub fn main_document_xml(&self) -> Result<String, DocumentError> {
        let bytes = self
            .part(MAIN_DOCUMENT_PART)
            .ok_or_else(|| DocumentError::MissingPart(MAIN_DOCUMENT_PART.to_string()))?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| DocumentError::Malformed(format!("{} is not UTF-8: {}", MAIN_DOCUMENT_PART, e)))
    }

    /// Replace the content of an existing part
    pub fn replace_part(&mut self, name: &str, data: Vec<u8>) -> Result<(), DocumentError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == name)
            .ok_or_else(|| DocumentError::MissingPart(name.to_string()))?;
        entry.data = data;
        Ok(())
    }

    /// Write the package to disk, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();
        // Fully serialized before the file is created: `path` may be the input.
        let bytes = self.to_bytes()?;
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        file.flush()?;
        debug!("Wrote package {:?} ({} bytes)", path, bytes.len());
        Ok(())
    }

    /// Serialize the package to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let options = SimpleFileOptions::default().compression_method(entry.compression);
            if entry.is_dir {
                writer.add_directory(entry.name.as_str(), options)?;
            } else {
                writer.start_file(entry.name.as_str(), options)?;
                writer.write_all(&entry.data)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}
