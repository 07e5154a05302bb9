use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Suffix appended to the stem of translated documents
pub const TRANSLATED_SUFFIX: &str = "_translated";

/// Prefix of the lock files Word keeps next to open documents
const LOCK_FILE_PREFIX: &str = "~$";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: `<stem>_translated<.ext>` next to the input
    pub fn default_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();

        let mut output_filename = format!("{}{}", stem, TRANSLATED_SUFFIX);
        if let Some(ext) = input_file.extension() {
            output_filename.push('.');
            output_filename.push_str(&ext.to_string_lossy());
        }

        input_file.with_file_name(output_filename)
    }

    /// Whether `path` looks like a document this tool should translate
    pub fn is_translatable_docx<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        let has_docx_ext = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("docx"));
        if !has_docx_ext {
            return false;
        }

        let name = path.file_name().unwrap_or_default().to_string_lossy();
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        !name.starts_with(LOCK_FILE_PREFIX) && !stem.ends_with(TRANSLATED_SUFFIX)
    }

    /// Find the documents to translate under `dir`, sorted by path
    pub fn find_docx_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::is_translatable_docx(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }
}
