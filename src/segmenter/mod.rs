mod builder;
mod heading;
mod paragraph;
mod stack;


pub use builder::{DocumentBuilder, SegmenterState, FALLBACK_DEPTH};
pub use heading::{classify_line, parse_heading, Heading, LineKind, CHAPTER_DEPTH};
pub use paragraph::{normalize_paragraph, Paragraph, ParagraphBuffer};
pub use stack::SectionStack;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::SegmenterConfig;
use crate::error::SegmentError;
use crate::model::{Document, PageId};

/// Turns documents with pages into documents with chapter/section trees
///
/// Holds only immutable settings; all per-document state lives in a
/// [`DocumentBuilder`] created for each call.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Segment one document
    ///
    /// Pages are read in order, lines within a page in physical order. A page
    /// without content is a caller error and aborts the whole document.
    pub fn segment(&self, mut document: Document) -> Result<Document, SegmentError> {
        if let Some(page) = document.pages.iter().find(|p| p.content.is_none()) {
            return Err(SegmentError::InvalidInput {
                document: document.name.clone(),
                page: page.index,
                page_name: page.name.clone(),
            });
        }

        let pages = std::mem::take(&mut document.pages);
        let mut builder = DocumentBuilder::new(document, &self.config.fallback_section_name);

        for (i, page) in pages.iter().enumerate() {
            let text = page.content.as_deref().unwrap_or_default();
            debug!(
                document = %builder.document().name,
                page = page.index,
                preview = %page.summarize(),
                "Segmenting page"
            );

            for line in text.lines() {
                builder.feed_line(line, PageId(i));
            }
        }

        let mut document = builder.finish();
        document.pages = pages;

        info!(
            document = %document.name,
            pages = document.pages.len(),
            chapters = document.chapters.len(),
            sections = document.sections.len(),
            paragraphs = document.contents.len(),
            orphan_paragraphs = document.orphan_contents.len(),
            orphan_sections = document.orphan_sections.len(),
            "Segmented document"
        );

        Ok(document)
    }

    /// Segment many documents in parallel; results keep input order
    pub fn segment_all(&self, documents: Vec<Document>) -> Vec<Result<Document, SegmentError>> {
        let run = || {
            documents
                .into_par_iter()
                .map(|document| self.segment(document))
                .collect::<Vec<_>>()
        };

        match self.config.max_workers {
            Some(workers) => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    warn!(error = %e, workers, "Falling back to the global thread pool");
                    run()
                }
            },
            None => run(),
        }
    }
}

/// Segment one document with default settings
pub fn segment_document(document: Document) -> Result<Document, SegmentError> {
    Segmenter::default().segment(document)
}
