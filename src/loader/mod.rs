
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::LoadError;
use crate::model::{Document, Page};

static PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_page_(\d+)").expect("valid page number regex"));

/// Extract the reading-order number from a page file name (`book_page_12.txt` -> 12)
pub fn page_number(file_name: &str) -> Option<usize> {
    PAGE_NUMBER
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Numbered pages first in numeric order, then unnumbered ones by name
fn page_order(a: (Option<usize>, &str), b: (Option<usize>, &str)) -> Ordering {
    match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.1.cmp(b.1)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.1.cmp(b.1),
    }
}

/// Check whether a file has one of the accepted extensions (case-insensitive)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Compute SHA256 hash of page bytes
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load every document under `root`
///
/// Each immediate sub-directory is one document; each immediate file in it
/// with an accepted extension is one page. Symbolic links are followed.
/// Documents come back sorted by name, pages by their `_page_N` number.
pub fn load_documents(root: &Path, extensions: &[String]) -> Result<Vec<Document>, LoadError> {
    info!(path = %root.display(), "Scanning documents directory");

    let mut documents = Vec::new();
    let mut total_pages = 0usize;

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| LoadError::DataDir {
            path: root.to_path_buf(),
            source,
        })?;

        // Symlinked document directories count; dangling links do not
        if !entry.path().is_dir() {
            debug!(path = %entry.path().display(), "Skipping non-directory");
            continue;
        }

        let document = load_document(entry.path(), extensions)?;
        total_pages += document.pages.len();
        documents.push(document);
    }

    info!(
        documents = documents.len(),
        pages = total_pages,
        "Loaded documents"
    );
    Ok(documents)
}

/// Load one document directory
pub fn load_document(dir: &Path, extensions: &[String]) -> Result<Document, LoadError> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut page_files: Vec<(Option<usize>, String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| LoadError::DataDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if !has_extension(path, extensions) {
            debug!(path = %path.display(), "Ignoring unsupported file type");
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        page_files.push((page_number(&file_name), file_name, path.to_path_buf()));
    }

    page_files.sort_by(|a, b| page_order((a.0, &a.1), (b.0, &b.1)));

    // Unnumbered pages are indexed after the highest numbered one
    let mut next_unnumbered = page_files.iter().filter_map(|p| p.0).max().unwrap_or(0);

    let mut document = Document::new(name, dir.to_string_lossy());
    for (number, file_name, path) in page_files {
        let bytes = fs::read(&path).map_err(|source| LoadError::PageRead {
            path: path.clone(),
            source,
        })?;
        let hash = hash_bytes(&bytes);
        let content = String::from_utf8(bytes).map_err(|e| LoadError::PageRead {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let index = number.unwrap_or_else(|| {
            next_unnumbered += 1;
            next_unnumbered
        });

        debug!(document = %document.name, page = %file_name, index, "Loaded page");
        document.push_page(Page {
            index,
            name: file_name,
            content: Some(content),
            hash: Some(hash),
        });
    }

    Ok(document)
}
