//! # Rulesync Matcher
//!
//! Text analysis shared by the updater and the validator:
//!
//! - Topic extraction from markdown-like content (headers, bold spans,
//!   list items), normalized into comparable strings.
//! - Similarity judgments: duplicate-instruction detection by word
//!   overlap, sliding-window sequence similarity, and topic overlap.
//!
//! All matchers are pure functions over strings; a failed heuristic is
//! simply "no match", never an error.

mod similarity;
mod topics;

pub use similarity::{
    content_contains_similar, has_similar_topic, instruction_exists, sequence_ratio,
    SIMILAR_CONTENT_THRESHOLD, SIMILAR_TOPIC_THRESHOLD,
};
pub use topics::{extract_topics, normalize_topic};
