use once_cell::sync::Lazy;
use regex::Regex;

/// Heading depth reserved for chapters
pub const CHAPTER_DEPTH: usize = 2;

static HEADING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)\s*(.*)$").expect("valid heading regex"));

/// A recognized heading line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Number of leading `#` markers
    pub depth: usize,
    /// Trimmed text after the markers, possibly empty
    pub title: &'a str,
}

impl Heading<'_> {
    pub fn is_chapter(&self) -> bool {
        self.depth == CHAPTER_DEPTH
    }
}

/// How the segmenter should treat one physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `## Title`
    Chapter { title: &'a str },
    /// `# Title`, `### Title`, `#### Title`, ...
    Section { depth: usize, title: &'a str },
    /// Empty or whitespace-only
    Blank,
    /// Anything else, with line terminators removed
    Content(&'a str),
}

/// Parse a heading out of a line, ignoring surrounding whitespace
pub fn parse_heading(line: &str) -> Option<Heading<'_>> {
    let caps = HEADING_PATTERN.captures(line.trim())?;
    let depth = caps.get(1).map_or(0, |m| m.as_str().len());
    let title = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(Heading { depth, title })
}

/// Classify one line; pure, safe to call from any thread
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    match parse_heading(line) {
        Some(h) if h.is_chapter() => LineKind::Chapter { title: h.title },
        Some(h) => LineKind::Section {
            depth: h.depth,
            title: h.title,
        },
        None => LineKind::Content(line.trim_end_matches(&['\r', '\n'][..])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_is_marker_count() {
        for depth in 1..=8 {
            let line = format!("{} Title", "#".repeat(depth));
            let heading = parse_heading(&line).unwrap();
            assert_eq!(heading.depth, depth, "Failed for {:?}", line);
            assert_eq!(heading.title, "Title");
        }
    }

    #[test]
    fn test_depth_two_is_chapter() {
        assert_eq!(
            classify_line("## Chapter One"),
            LineKind::Chapter {
                title: "Chapter One"
            }
        );
        assert_eq!(
            classify_line("# Intro"),
            LineKind::Section {
                depth: 1,
                title: "Intro"
            }
        );
        assert_eq!(
            classify_line("### Deeper"),
            LineKind::Section {
                depth: 3,
                title: "Deeper"
            }
        );
    }

    #[test]
    fn test_marker_without_space() {
        assert_eq!(
            classify_line("##Chapter"),
            LineKind::Chapter { title: "Chapter" }
        );
        assert_eq!(
            classify_line("#####Five"),
            LineKind::Section {
                depth: 5,
                title: "Five"
            }
        );
    }

    #[test]
    fn test_markers_only_give_empty_title() {
        assert_eq!(classify_line("##"), LineKind::Chapter { title: "" });
        assert_eq!(
            classify_line("  ### "),
            LineKind::Section { depth: 3, title: "" }
        );
    }

    #[test]
    fn test_indented_heading_is_trimmed() {
        assert_eq!(
            classify_line("   ##   Spaced Out   "),
            LineKind::Chapter { title: "Spaced Out" }
        );
    }

    #[test]
    fn test_plain_text_is_content() {
        assert_eq!(classify_line("Hello world"), LineKind::Content("Hello world"));
        assert_eq!(
            classify_line("  indented text  \r"),
            LineKind::Content("  indented text  ")
        );
        assert_eq!(classify_line("C# is a language"), LineKind::Content("C# is a language"));
        assert!(parse_heading("no markers").is_none());
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   \t "), LineKind::Blank);
    }
}
