use serde::{Deserialize, Serialize};

use super::{
    ChapterId, ContentId, DocumentId, PageId, SectionId, DEFAULT_CONTENT_TYPE,
    PARAGRAPH_SEPARATOR,
};

/// Top-level unit introduced by a depth-2 heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub name: String,
    pub document: DocumentId,
    /// Direct children only; deeper nesting lives in `Section::children`
    #[serde(default)]
    pub sections: Vec<SectionId>,
    /// Pages that contributed a heading or paragraph while this chapter was open
    #[serde(default)]
    pub pages: Vec<PageId>,
}

/// Unit introduced by a heading of any depth other than 2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    /// Number of heading markers that opened this section
    pub depth: usize,
    pub document: DocumentId,
    /// `None` for orphan sections and their descendants
    #[serde(default)]
    pub chapter: Option<ChapterId>,
    /// `None` for sections attached directly to a chapter or the orphan list
    #[serde(default)]
    pub parent: Option<SectionId>,
    /// Accumulated paragraphs joined by a blank line
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub contents: Vec<ContentId>,
    #[serde(default)]
    pub children: Vec<SectionId>,
    #[serde(default)]
    pub pages: Vec<PageId>,
}

impl Section {
    pub(crate) fn append_paragraph(&mut self, id: ContentId, text: &str) {
        if !self.content.is_empty() {
            self.content.push_str(PARAGRAPH_SEPARATOR);
        }
        self.content.push_str(text);
        self.contents.push(id);
    }

    /// Individual paragraphs of the accumulated text
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content
            .split(PARAGRAPH_SEPARATOR)
            .filter(|p| !p.is_empty())
    }
}

/// One paragraph with back-references to where it was attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub document: DocumentId,
    #[serde(default)]
    pub chapter: Option<ChapterId>,
    #[serde(default)]
    pub section: Option<SectionId>,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    pub text: String,
    #[serde(default)]
    pub pages: Vec<PageId>,
}

impl Content {
    pub(crate) fn paragraph(
        id: ContentId,
        document: DocumentId,
        chapter: Option<ChapterId>,
        section: Option<SectionId>,
        text: String,
        pages: Vec<PageId>,
    ) -> Self {
        Self {
            id,
            document,
            chapter,
            section,
            content_type: default_content_type(),
            text,
            pages,
        }
    }

    /// True when the paragraph has no chapter or section
    pub fn is_orphan(&self) -> bool {
        self.chapter.is_none() && self.section.is_none()
    }
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}
