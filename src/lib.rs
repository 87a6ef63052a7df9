// Public API exports
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod model;
pub mod segmenter;

// Re-export main types for convenience
pub use config::{AppConfig, DataConfig, OutputConfig, SegmenterConfig};
pub use error::{LoadError, SegmentError};

pub use model::{
    Chapter, ChapterId, Content, ContentId, Document, DocumentId, Page, PageId, Section,
    SectionId,
};

pub use segmenter::{
    classify_line, normalize_paragraph, segment_document, DocumentBuilder, LineKind,
    Segmenter, SegmenterState, CHAPTER_DEPTH,
};

pub use loader::{load_document, load_documents};

pub use export::{render_report, write_json, write_report};
