//! Input loading: page texts from files and directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Input path not found: {0}")]
    NotFound(PathBuf),
    #[error("No .txt files in directory: {0}")]
    EmptyDirectory(PathBuf),
}

/// Form feed: the conventional page separator emitted by OCR tools
const PAGE_SEPARATOR: char = '\u{000C}';

/// Load page texts from a file or directory.
///
/// A single file yields one page per form-feed-separated section (one page
/// if no separator occurs). A directory yields one page per `.txt` file,
/// in lexicographic filename order so numbered scans keep their sequence.
pub fn load_pages(path: &Path, split_pages: bool) -> Result<Vec<String>, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }

    if path.is_dir() {
        return load_directory(path);
    }

    let text = fs::read_to_string(path)?;
    if split_pages && text.contains(PAGE_SEPARATOR) {
        Ok(text.split(PAGE_SEPARATOR).map(str::to_string).collect())
    } else {
        Ok(vec![text])
    }
}

fn load_directory(dir: &Path) -> Result<Vec<String>, InputError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();

    if files.is_empty() {
        return Err(InputError::EmptyDirectory(dir.to_path_buf()));
    }
    files.sort();

    let mut pages = Vec::with_capacity(files.len());
    for file in files {
        pages.push(fs::read_to_string(&file)?);
    }
    Ok(pages)
}
