use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{preview, Chapter, Content, ContentId, PageId, Section, SectionId};

/// Stable identity of a document across exports
pub type DocumentId = Uuid;

/// One physical page of input text
///
/// `content` is `None` only when the caller never supplied a body; the
/// segmenter rejects such pages instead of treating them as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Reading-order number (e.g. the `N` in `book_page_N.txt`)
    pub index: usize,
    /// Source file name or any caller label
    pub name: String,
    /// Raw page text
    pub content: Option<String>,
    /// SHA-256 of the raw bytes, when loaded from disk
    pub hash: Option<String>,
}

impl Page {
    pub fn new(index: usize, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            content: Some(content.into()),
            hash: None,
        }
    }

    /// First 100 characters of the page, for logs and previews
    pub fn summarize(&self) -> String {
        preview(self.content.as_deref().unwrap_or(""))
    }
}

/// A document and, after segmentation, its full chapter/section tree
///
/// Every node lives in one of the arenas below and is referenced elsewhere by
/// id, so `sections` is both the owner of all sections and the flat lookup
/// index. Missing collections deserialize as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub path: String,
    /// Input pages in reading order
    pub pages: Vec<Page>,
    pub chapters: Vec<Chapter>,
    /// All sections, authored and fallback, in creation order
    pub sections: Vec<Section>,
    /// All paragraphs in creation order
    pub contents: Vec<Content>,
    /// Paragraphs found before any heading
    pub orphan_contents: Vec<ContentId>,
    /// Root sections with no enclosing chapter
    pub orphan_sections: Vec<SectionId>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            path: String::new(),
            pages: Vec::new(),
            chapters: Vec::new(),
            sections: Vec::new(),
            contents: Vec::new(),
            orphan_contents: Vec::new(),
            orphan_sections: Vec::new(),
        }
    }
}

impl Document {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Append a page and return its id
    pub fn push_page(&mut self, page: Page) -> PageId {
        self.pages.push(page);
        PageId(self.pages.len() - 1)
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id.0)
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    pub fn content(&self, id: ContentId) -> Option<&Content> {
        self.contents.get(id.0)
    }

    /// Resolve a list of section ids, skipping any that do not exist
    pub fn resolve_sections<'a>(
        &'a self,
        ids: &'a [SectionId],
    ) -> impl Iterator<Item = &'a Section> + 'a {
        ids.iter().filter_map(move |&id| self.section(id))
    }

    /// Resolve a list of content ids, skipping any that do not exist
    pub fn resolve_contents<'a>(
        &'a self,
        ids: &'a [ContentId],
    ) -> impl Iterator<Item = &'a Content> + 'a {
        ids.iter().filter_map(move |&id| self.content(id))
    }

    /// Text of every orphan paragraph, in document order
    pub fn orphan_texts(&self) -> Vec<&str> {
        self.resolve_contents(&self.orphan_contents)
            .map(|c| c.text.as_str())
            .collect()
    }

    /// Find the first section with the given name
    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Drop any structure from a previous pass, keeping identity and pages
    pub(crate) fn clear_structure(&mut self) {
        self.chapters.clear();
        self.sections.clear();
        self.contents.clear();
        self.orphan_contents.clear();
        self.orphan_sections.clear();
    }
}
