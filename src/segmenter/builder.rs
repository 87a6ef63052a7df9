use tracing::debug;

use super::heading::{classify_line, LineKind, CHAPTER_DEPTH};
use super::paragraph::{Paragraph, ParagraphBuffer};
use super::stack::SectionStack;
use crate::model::{
    record_page, Chapter, ChapterId, Content, ContentId, Document, PageId, Section, SectionId,
};

/// Depth given to synthesized fallback sections (the first level below a chapter)
pub const FALLBACK_DEPTH: usize = CHAPTER_DEPTH + 1;

/// Where the builder currently is in the document structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterState {
    /// No chapter heading seen yet (orphan sections may still be open)
    NoChapter,
    InChapterNoSection,
    InChapterInSection,
}

/// Per-document state machine that grows the chapter/section tree line by line
///
/// A builder is created for one document, fed its lines in reading order and
/// consumed by [`DocumentBuilder::finish`]. It never outlives that document.
pub struct DocumentBuilder<'a> {
    document: Document,
    fallback_name: &'a str,
    chapter: Option<ChapterId>,
    /// Fallback section of the current chapter, once created
    fallback: Option<SectionId>,
    stack: SectionStack,
    buffer: ParagraphBuffer,
}

impl<'a> DocumentBuilder<'a> {
    /// Start building into `document`, discarding any structure it already had
    pub fn new(mut document: Document, fallback_name: &'a str) -> Self {
        document.clear_structure();
        Self {
            document,
            fallback_name,
            chapter: None,
            fallback: None,
            stack: SectionStack::new(),
            buffer: ParagraphBuffer::new(),
        }
    }

    pub fn state(&self) -> SegmenterState {
        match (self.chapter, self.stack.is_empty()) {
            (None, _) => SegmenterState::NoChapter,
            (Some(_), true) => SegmenterState::InChapterNoSection,
            (Some(_), false) => SegmenterState::InChapterInSection,
        }
    }

    /// Depths of the currently open sections, shallowest first
    pub fn open_depths(&self) -> Vec<usize> {
        self.stack.depths()
    }

    pub fn current_chapter(&self) -> Option<ChapterId> {
        self.chapter
    }

    pub fn current_section(&self) -> Option<SectionId> {
        self.stack.top()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Feed one physical line from `page`
    pub fn feed_line(&mut self, line: &str, page: PageId) {
        match classify_line(line) {
            LineKind::Chapter { title } => self.open_chapter(title, page),
            LineKind::Section { depth, title } => self.open_section(depth, title, page),
            LineKind::Blank => self.flush(),
            LineKind::Content(text) => self.buffer.push(text, page),
        }
    }

    /// Close the current chapter and every open section, then start a new chapter
    pub fn open_chapter(&mut self, title: &str, page: PageId) {
        self.flush();
        self.stack.clear();
        self.fallback = None;

        let id = ChapterId(self.document.chapters.len());
        self.document.chapters.push(Chapter {
            id,
            name: title.to_string(),
            document: self.document.id,
            sections: Vec::new(),
            pages: vec![page],
        });
        self.chapter = Some(id);

        debug!(document = %self.document.name, chapter = title, "Opened chapter");
    }

    /// Open a section at `depth`, nesting it under the nearest shallower open
    /// section, else the current chapter, else the orphan list
    pub fn open_section(&mut self, depth: usize, title: &str, page: PageId) {
        self.flush();

        let parent = self.stack.resolve_parent(depth);
        let id = self.new_section(title, depth, parent, page);

        match (parent, self.chapter) {
            (Some(parent), _) => self.document.sections[parent.0].children.push(id),
            (None, Some(chapter)) => self.document.chapters[chapter.0].sections.push(id),
            (None, None) => self.document.orphan_sections.push(id),
        }
        self.stack.push(depth, id);

        debug!(
            document = %self.document.name,
            section = title,
            depth,
            parent = ?parent,
            "Opened section"
        );
    }

    /// Attach whatever paragraph is buffered
    pub fn flush(&mut self) {
        if let Some(paragraph) = self.buffer.flush() {
            self.attach(paragraph);
        }
    }

    /// Final flush; returns the finished document
    pub fn finish(mut self) -> Document {
        self.flush();
        self.document
    }

    /// Place a paragraph in the innermost open section, the chapter's fallback
    /// section, or the orphan list, in that order
    fn attach(&mut self, paragraph: Paragraph) {
        let target = match (self.stack.top(), self.chapter) {
            (Some(section), _) => Some(section),
            (None, Some(chapter)) => Some(self.fallback_section(chapter)),
            (None, None) => None,
        };

        let content_id = ContentId(self.document.contents.len());
        let Paragraph { text, pages } = paragraph;

        let Some(section_id) = target else {
            self.document.contents.push(Content::paragraph(
                content_id,
                self.document.id,
                None,
                None,
                text,
                pages,
            ));
            self.document.orphan_contents.push(content_id);
            return;
        };

        let section = &mut self.document.sections[section_id.0];
        section.append_paragraph(content_id, &text);
        for &page in &pages {
            record_page(&mut section.pages, page);
        }

        let chapter = section.chapter;
        if let Some(chapter) = chapter {
            let chapter = &mut self.document.chapters[chapter.0];
            for &page in &pages {
                record_page(&mut chapter.pages, page);
            }
        }

        self.document.contents.push(Content::paragraph(
            content_id,
            self.document.id,
            chapter,
            Some(section_id),
            text,
            pages,
        ));
    }

    /// The single synthetic section holding a chapter's section-less paragraphs
    fn fallback_section(&mut self, chapter: ChapterId) -> SectionId {
        if let Some(id) = self.fallback {
            return id;
        }

        let name = self.fallback_name.to_string();
        let id = self.push_section(name, FALLBACK_DEPTH, Some(chapter), None);
        self.document.chapters[chapter.0].sections.push(id);
        self.fallback = Some(id);

        debug!(document = %self.document.name, chapter = chapter.0, "Created fallback section");
        id
    }

    fn new_section(
        &mut self,
        title: &str,
        depth: usize,
        parent: Option<SectionId>,
        page: PageId,
    ) -> SectionId {
        let chapter = self.chapter;
        let id = self.push_section(title.to_string(), depth, chapter, parent);
        self.document.sections[id.0].pages.push(page);
        if let Some(chapter) = chapter {
            record_page(&mut self.document.chapters[chapter.0].pages, page);
        }
        id
    }

    fn push_section(
        &mut self,
        name: String,
        depth: usize,
        chapter: Option<ChapterId>,
        parent: Option<SectionId>,
    ) -> SectionId {
        let id = SectionId(self.document.sections.len());
        self.document.sections.push(Section {
            id,
            name,
            depth,
            document: self.document.id,
            chapter,
            parent,
            content: String::new(),
            contents: Vec::new(),
            children: Vec::new(),
            pages: Vec::new(),
        });
        id
    }
}
