mod document;
mod node;


pub use document::{Document, DocumentId, Page};
pub use node::{Chapter, Content, Section};

use serde::{Deserialize, Serialize};

/// Content type assigned to every paragraph produced by the segmenter
pub const DEFAULT_CONTENT_TYPE: &str = "text";

/// Separator placed between paragraphs in a section's accumulated text
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Position of a page in `Document::pages`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub usize);

/// Position of a chapter in `Document::chapters`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(pub usize);

/// Position of a section in the flat `Document::sections` index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub usize);

/// Position of a paragraph in `Document::contents`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub usize);

/// Characters kept by [`preview`] before truncating
pub const PREVIEW_CHARS: usize = 100;

/// Append `page` to a contributor list unless it was the last one recorded
///
/// Pages are fed in reading order, so a repeat can only ever be the tail.
pub(crate) fn record_page(pages: &mut Vec<PageId>, page: PageId) {
    if pages.last() != Some(&page) {
        pages.push(page);
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`, with `...` if anything was cut
pub(crate) fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
