use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::model::{Document, SectionId};

/// Sub-directory of the artifacts path that receives every export
pub const EXPORT_DIR: &str = "content_extraction";

/// Version of the JSON export layout
pub const FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub created_at: String,
    pub generator: String,
    pub stats: ManifestStats,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestStats {
    pub page_count: usize,
    pub chapter_count: usize,
    pub section_count: usize,
    pub content_count: usize,
    pub orphan_content_count: usize,
    pub orphan_section_count: usize,
}

impl ManifestStats {
    pub fn from_document(document: &Document) -> Self {
        Self {
            page_count: document.pages.len(),
            chapter_count: document.chapters.len(),
            section_count: document.sections.len(),
            content_count: document.contents.len(),
            orphan_content_count: document.orphan_contents.len(),
            orphan_section_count: document.orphan_sections.len(),
        }
    }
}

/// JSON export envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentExport {
    pub manifest: Manifest,
    pub document: Document,
}

impl Manifest {
    pub fn for_document(document: &Document) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("pagetree v{}", env!("CARGO_PKG_VERSION")),
            stats: ManifestStats::from_document(document),
        }
    }
}

/// Write a section and all of its descendants, depth-first, using an explicit stack
fn render_section_tree(
    out: &mut String,
    document: &Document,
    root: SectionId,
    indent: usize,
    label: &str,
) {
    let mut pending = vec![(root, indent)];

    while let Some((id, indent)) = pending.pop() {
        let Some(section) = document.section(id) else {
            continue;
        };
        let pad = "  ".repeat(indent);
        let title = if id == root { label } else { "Section" };

        let _ = writeln!(out, "{}{}: {}", pad, title, section.name);
        for content in document.resolve_contents(&section.contents) {
            let _ = writeln!(out, "{}  Content:\n{}\n", pad, content.text);
        }

        // Reverse so the first child is rendered first
        for &child in section.children.iter().rev() {
            pending.push((child, indent + 1));
        }
    }
}

/// Human-readable contents report of one document
pub fn render_report(document: &Document) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Document: {}", document.name);
    let _ = writeln!(out, "{}\n", "=".repeat(50));

    for chapter in &document.chapters {
        let _ = writeln!(out, "Chapter: {}", chapter.name);
        let _ = writeln!(out, "{}", "-".repeat(40));
        for section in document.resolve_sections(&chapter.sections) {
            render_section_tree(&mut out, document, section.id, 1, "Section");
        }
        out.push('\n');
    }

    for section in document.resolve_sections(&document.orphan_sections) {
        render_section_tree(&mut out, document, section.id, 0, "Orphan Section");
    }

    let _ = writeln!(out, "Orphan Contents:");
    for content in document.resolve_contents(&document.orphan_contents) {
        let _ = writeln!(out, "  Content:\n{}\n", content.text);
    }

    out
}

fn export_dir(artifacts_path: &Path) -> Result<PathBuf> {
    let dir = artifacts_path.join(EXPORT_DIR);
    fs::create_dir_all(&dir)
        .context(format!("Failed to create export directory: {}", dir.display()))?;
    Ok(dir)
}

/// Write `<artifacts>/content_extraction/<name>_contents.txt`
pub fn write_report(document: &Document, artifacts_path: &Path) -> Result<PathBuf> {
    let path = export_dir(artifacts_path)?.join(format!("{}_contents.txt", document.name));
    fs::write(&path, render_report(document))
        .context(format!("Failed to write report: {}", path.display()))?;

    info!(document = %document.name, path = %path.display(), "Saved document contents");
    Ok(path)
}

/// Write `<artifacts>/content_extraction/<name>.json`
pub fn write_json(document: &Document, artifacts_path: &Path) -> Result<PathBuf> {
    let path = export_dir(artifacts_path)?.join(format!("{}.json", document.name));
    let export = DocumentExport {
        manifest: Manifest::for_document(document),
        document: document.clone(),
    };
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize document")?;
    fs::write(&path, json).context(format!("Failed to write JSON export: {}", path.display()))?;

    info!(document = %document.name, path = %path.display(), "Saved document tree");
    Ok(path)
}

/// Read back a JSON export
pub fn read_json(path: &Path) -> Result<DocumentExport> {
    let json = fs::read_to_string(path)
        .context(format!("Failed to read JSON export: {}", path.display()))?;
    serde_json::from_str(&json).context(format!("Failed to parse JSON export: {}", path.display()))
}
