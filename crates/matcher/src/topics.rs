use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Longest bold span still considered a topic, in words
const MAX_BOLD_TOPIC_WORDS: usize = 6;
/// Longest list item still considered a topic, in words
const MAX_LIST_TOPIC_WORDS: usize = 8;

static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]|\d+\.").unwrap());
static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());
static MODAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(always|never|must|should|do not|don't)\s+").unwrap());
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Extract normalized topics from markdown-like content.
///
/// Sources, per trimmed line:
/// - header text (`##` or deeper)
/// - every bold span of at most 6 words
/// - every list item (`-`, `*`, `•`, or `1.`-style) of at most 8 words
///
/// Candidates that normalize to the empty string are discarded.
pub fn extract_topics(content: &str) -> BTreeSet<String> {
    let mut topics = BTreeSet::new();

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with("##") {
            add_topic(&mut topics, line.trim_start_matches('#').trim());
        }

        for capture in BOLD_SPAN.captures_iter(line) {
            let span = &capture[1];
            if span.split_whitespace().count() <= MAX_BOLD_TOPIC_WORDS {
                add_topic(&mut topics, span);
            }
        }

        if line.starts_with(['-', '*', '•']) || NUMBERED_ITEM.is_match(line) {
            let body = LIST_MARKER.replace_all(line, "");
            let body = body.trim();
            if !body.is_empty() && body.split_whitespace().count() <= MAX_LIST_TOPIC_WORDS {
                add_topic(&mut topics, body);
            }
        }
    }

    topics
}

/// Normalize a raw phrase into its comparison form: lowercased, leading
/// modal/negation word stripped, punctuation removed, whitespace collapsed.
///
/// Distinct phrasings intentionally collapse to the same topic; this is
/// the dedup key.
pub fn normalize_topic(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = MODAL_PREFIX.replace(&lowered, "");
    let cleaned = PUNCTUATION.replace_all(&stripped, "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn add_topic(topics: &mut BTreeSet<String>, raw: &str) {
    let topic = normalize_topic(raw);
    if !topic.is_empty() {
        topics.insert(topic);
    }
}
