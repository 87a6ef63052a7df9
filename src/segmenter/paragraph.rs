use crate::model::{record_page, PageId};

/// A normalized paragraph ready to be attached to the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    /// Pages the paragraph's lines came from, in reading order
    pub pages: Vec<PageId>,
}

/// Buffers consecutive content lines until a flush point
///
/// The buffer is not tied to a page: lines from consecutive pages with no
/// blank line or heading between them end up in the same paragraph.
#[derive(Debug, Default)]
pub struct ParagraphBuffer {
    lines: Vec<String>,
    pages: Vec<PageId>,
}

impl ParagraphBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str, page: PageId) {
        self.lines.push(line.to_string());
        record_page(&mut self.pages, page);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Emit the buffered lines as one paragraph and reset the buffer
    ///
    /// Returns `None` when nothing but whitespace was buffered.
    pub fn flush(&mut self) -> Option<Paragraph> {
        if self.lines.is_empty() {
            return None;
        }

        let text = normalize_paragraph(self.lines.drain(..));
        let pages = std::mem::take(&mut self.pages);

        if text.is_empty() {
            return None;
        }

        Some(Paragraph { text, pages })
    }
}

/// Join raw lines into one paragraph:
/// - blank lines are dropped
/// - a fragment ending in `-` is glued to the next one without the hyphen
/// - other fragments are joined with a space
/// - whitespace runs collapse to a single space
pub fn normalize_paragraph<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();

    for line in lines {
        let fragment = line.as_ref().trim();
        if fragment.is_empty() {
            continue;
        }

        if joined.ends_with('-') {
            joined.pop();
        } else if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(fragment);
    }

    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
