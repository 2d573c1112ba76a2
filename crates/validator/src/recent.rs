/// Lines kept from the end of the newest file as its "recent
/// instructions" sample
pub(crate) const RECENT_LINES: usize = 10;

/// Extract the most recent instruction content from the end of a file.
///
/// Trailing blank lines, `---` separators and `Last updated:` metadata
/// are stripped first; the last `line_count` substantial lines remain.
pub fn extract_recent_instructions(content: &str, line_count: usize) -> String {
    let mut lines: Vec<&str> = content.trim().lines().collect();

    while let Some(last) = lines.last() {
        let trimmed = last.trim();
        if trimmed.is_empty() || trimmed.starts_with("---") || trimmed.starts_with("Last updated:")
        {
            lines.pop();
        } else {
            break;
        }
    }

    let start = lines.len().saturating_sub(line_count);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_trailing_metadata() {
        let content = "## Rules\n- Keep it simple\n\n---\nLast updated: 2026-08-01\n";

        assert_eq!(
            extract_recent_instructions(content, RECENT_LINES),
            "## Rules\n- Keep it simple"
        );
    }

    #[test]
    fn keeps_only_the_tail() {
        let content = (1..=15)
            .map(|n| format!("- rule {n}"))
            .collect::<Vec<_>>()
            .join("\n");

        let recent = extract_recent_instructions(&content, 10);

        assert!(recent.starts_with("- rule 6"));
        assert!(recent.ends_with("- rule 15"));
    }

    #[test]
    fn empty_content_yields_empty_sample() {
        assert_eq!(extract_recent_instructions("", RECENT_LINES), "");
        assert_eq!(extract_recent_instructions("\n---\n", RECENT_LINES), "");
    }
}
