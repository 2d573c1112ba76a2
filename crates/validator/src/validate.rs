use crate::recent::{extract_recent_instructions, RECENT_LINES};
use rulesync_discovery::InstructionFile;
use rulesync_matcher::{
    content_contains_similar, extract_topics, has_similar_topic, SIMILAR_CONTENT_THRESHOLD,
    SIMILAR_TOPIC_THRESHOLD,
};
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Topics named per file before collapsing into "+N more"
const MAX_REPORTED_TOPICS: usize = 3;

/// Which consistency checks to run. Both are on by default.
#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    pub check_latest: bool,
    pub check_all: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            check_latest: true,
            check_all: true,
        }
    }
}

/// Validate instruction files for cross-file consistency.
///
/// Returns `(all_valid, issues)`. Zero files fail outright; a single
/// file trivially passes. Unreadable files contribute an issue and are
/// excluded from the comparisons.
pub fn validate(
    files: &[InstructionFile],
    project_root: &Path,
    options: ValidateOptions,
) -> (bool, Vec<String>) {
    let mut issues = Vec::new();

    if files.is_empty() {
        issues.push("No instruction files found".to_string());
        return (false, issues);
    }
    if files.len() < 2 {
        return (true, issues);
    }

    log::debug!(
        "Validating {} instruction files under {}",
        files.len(),
        project_root.display()
    );

    let mut contents: Vec<(&InstructionFile, String)> = Vec::new();
    for file in files {
        if !file.path.exists() {
            issues.push(format!("File not found: {}", file.path.display()));
            continue;
        }
        match file.read() {
            Ok(content) => contents.push((file, content)),
            Err(err) => issues.push(format!("Cannot read {}: {err}", file.file_name())),
        }
    }

    if contents.len() < 2 {
        let all_valid = issues.is_empty();
        return (all_valid, issues);
    }

    if options.check_latest {
        issues.extend(check_latest_update(&contents));
    }
    if options.check_all {
        issues.extend(check_topic_coverage(&contents));
    }

    (issues.is_empty(), issues)
}

/// Flag siblings that lack the newest file's recent content.
fn check_latest_update(contents: &[(&InstructionFile, String)]) -> Vec<String> {
    let mut issues = Vec::new();

    let mut by_mtime: Vec<(&InstructionFile, &str)> = contents
        .iter()
        .map(|(file, content)| (*file, content.as_str()))
        .collect();
    by_mtime.sort_by_key(|(file, _)| Reverse(modified_time(&file.path)));

    let Some(&(newest_file, newest_content)) = by_mtime.first() else {
        return issues;
    };

    let sample = extract_recent_instructions(newest_content, RECENT_LINES);
    if sample.is_empty() {
        return issues;
    }

    let missing: Vec<String> = by_mtime[1..]
        .iter()
        .filter(|(_, content)| {
            !content_contains_similar(content, &sample, SIMILAR_CONTENT_THRESHOLD)
        })
        .map(|(file, _)| file.file_name())
        .collect();

    if !missing.is_empty() {
        issues.push(format!(
            "Recent update in '{}' may be missing from: {}",
            newest_file.file_name(),
            missing.join(", ")
        ));
    }

    issues
}

/// Flag files missing topics that at least one other file covers.
fn check_topic_coverage(contents: &[(&InstructionFile, String)]) -> Vec<String> {
    let mut issues = Vec::new();

    let file_topics: Vec<(&InstructionFile, &str, BTreeSet<String>)> = contents
        .iter()
        .map(|(file, content)| (*file, content.as_str(), extract_topics(content)))
        .collect();

    let mut all_topics: BTreeSet<&String> = BTreeSet::new();
    for (_, _, topics) in &file_topics {
        all_topics.extend(topics.iter());
    }

    for (file, content, topics) in &file_topics {
        let mut actually_missing: Vec<&String> = Vec::new();

        for topic in &all_topics {
            if topics.contains(*topic) {
                continue;
            }
            let appears_in_others = file_topics.iter().any(|(other, _, other_topics)| {
                other.path != file.path && other_topics.contains(*topic)
            });
            if appears_in_others && !has_similar_topic(content, topic, SIMILAR_TOPIC_THRESHOLD) {
                actually_missing.push(*topic);
            }
        }

        if actually_missing.is_empty() {
            continue;
        }

        let shown: Vec<&str> = actually_missing
            .iter()
            .take(MAX_REPORTED_TOPICS)
            .map(|topic| topic.as_str())
            .collect();
        let mut issue = format!(
            "'{}' may be missing guidance on: {}",
            file.file_name(),
            shown.join(", ")
        );
        if actually_missing.len() > MAX_REPORTED_TOPICS {
            issue.push_str(&format!(
                " (+{} more)",
                actually_missing.len() - MAX_REPORTED_TOPICS
            ));
        }
        issues.push(issue);
    }

    issues
}

fn modified_time(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
