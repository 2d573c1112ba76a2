/// Reserved section appended when no existing header fits
const FALLBACK_HEADER: &str = "## Additional Instructions";

/// Canonical section name -> trigger words scored against the instruction
const SECTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "## Behaviors",
        &["behavior", "workflow", "process", "procedure"],
    ),
    (
        "## Development Workflow",
        &["commit", "test", "deploy", "build", "workflow"],
    ),
    ("## Testing", &["test", "pytest", "jest", "validate"]),
    ("## Code Style", &["style", "format", "lint", "convention"]),
    ("## Documentation", &["document", "doc", "comment", "readme"]),
    ("## Security", &["security", "secret", "auth", "vulnerability"]),
];

/// Pick the best existing `##` header for an instruction.
///
/// Every second-level header present in the content is scored: +1 per
/// trigger word found in the lowercased instruction, for each keyword
/// table entry whose name is a substring of the header. The strictly
/// highest nonzero score wins; ties keep the first-encountered header.
pub fn find_best_section(content: &str, instruction: &str) -> Option<String> {
    let instruction_lower = instruction.to_lowercase();

    let existing_sections = content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("##") && !line.starts_with("###"));

    let mut best_section = None;
    let mut best_score = 0usize;

    for section in existing_sections {
        let section_lower = section.to_lowercase();
        let mut score = 0usize;

        for (section_name, keywords) in SECTION_KEYWORDS {
            if section_lower.contains(&section_name.to_lowercase()) {
                for keyword in *keywords {
                    if instruction_lower.contains(keyword) {
                        score += 1;
                    }
                }
            }
        }

        if score > best_score {
            best_score = score;
            best_section = Some(section.to_string());
        }
    }

    best_section
}

/// Insert a (contextualized) instruction into content as a markdown list
/// item. Callers run the duplicate gate first.
///
/// With a matching section the item lands after the section's last item
/// (or right after the header when the section is empty), followed by a
/// blank line. Otherwise the item goes into the "Additional Instructions"
/// section, which is created at the end of the file when absent.
pub fn insert_instruction(content: &str, instruction: &str) -> String {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

    if let Some(best_section) = find_best_section(content, instruction) {
        if let Some(insert_at) = section_insert_position(&lines, &best_section) {
            lines.insert(insert_at, format!("- {instruction}"));
            lines.insert(insert_at + 1, String::new());
            return lines.join("\n");
        }
    }

    if let Some(insert_at) = fallback_insert_position(&lines) {
        // no trailing blank line in this branch
        lines.insert(insert_at, format!("- {instruction}"));
        return lines.join("\n");
    }

    let trimmed = content.trim_end();
    if trimmed.is_empty() {
        format!("{FALLBACK_HEADER}\n\n- {instruction}\n")
    } else {
        format!("{trimmed}\n{FALLBACK_HEADER}\n\n- {instruction}\n")
    }
}

/// Past the header and any leading blank lines, then past the section's
/// existing items up to a blank line or the next `##` header.
fn section_insert_position(lines: &[String], header: &str) -> Option<usize> {
    let header_index = lines.iter().position(|line| line.trim() == header)?;

    let mut position = header_index + 1;
    while position < lines.len() && lines[position].trim().is_empty() {
        position += 1;
    }
    if position < lines.len() && !lines[position].trim().is_empty() {
        while position < lines.len() {
            let current = lines[position].trim();
            if current.is_empty() || current.starts_with("##") {
                break;
            }
            position += 1;
        }
    }

    Some(position)
}

fn fallback_insert_position(lines: &[String]) -> Option<usize> {
    let header_index = lines.iter().position(|line| line.contains(FALLBACK_HEADER))?;

    let mut position = header_index + 1;
    while position < lines.len() && lines[position].trim().is_empty() {
        position += 1;
    }
    while position < lines.len() {
        let current = lines[position].trim();
        if current.is_empty() || current.starts_with("##") {
            break;
        }
        position += 1;
    }

    Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WORKFLOW_CONTENT: &str = "\
# Project Instructions

## Development Workflow

Some workflow info.

## Testing

Test instructions here.

## Code Style

Style guidelines.
";

    #[test]
    fn testing_instruction_targets_testing_or_workflow() {
        let section = find_best_section(WORKFLOW_CONTENT, "Run pytest before committing");

        let section = section.expect("a section should be selected");
        assert!(section.contains("Testing") || section.contains("Workflow"));
        assert!(!section.contains("Code Style"));
    }

    #[test]
    fn unrelated_instruction_selects_nothing() {
        let section = find_best_section(WORKFLOW_CONTENT, "Prefer tabs over spaces everywhere");

        assert_eq!(section, None);
    }

    #[test]
    fn first_section_wins_ties() {
        let content = "## Development Workflow\n\nitems\n\n## Behaviors\n\nitems\n";
        let section = find_best_section(content, "document the release workflow");

        assert_eq!(section.as_deref(), Some("## Development Workflow"));
    }

    #[test]
    fn inserts_after_last_item_of_selected_section() {
        let content = "\
# Instructions

## Testing

- Existing test rule

## Code Style

- Formatting rule
";
        let updated = insert_instruction(content, "Run pytest before committing");

        // the inserted blank line stacks with the one already separating
        // the sections
        let expected = "\
# Instructions

## Testing

- Existing test rule
- Run pytest before committing


## Code Style

- Formatting rule
";
        assert_eq!(updated, expected);
    }

    #[test]
    fn inserts_directly_after_empty_section_header() {
        let content = "# Instructions\n\n## Testing\n";
        let updated = insert_instruction(content, "Run the test suite");

        assert!(updated.contains("## Testing\n\n- Run the test suite\n"));
    }

    #[test]
    fn appends_to_existing_fallback_section() {
        let content = "\
# Instructions

## Additional Instructions

- First rule
";
        let updated = insert_instruction(content, "Second rule");

        assert!(updated.contains("- First rule\n- Second rule"));
        // the section is extended, not duplicated
        assert_eq!(updated.matches("## Additional Instructions").count(), 1);
    }

    #[test]
    fn creates_fallback_section_at_end_of_file() {
        let updated = insert_instruction("# Agent Instructions\n", "New instruction");

        assert_eq!(
            updated,
            "# Agent Instructions\n## Additional Instructions\n\n- New instruction\n"
        );
    }

    #[test]
    fn creates_fallback_section_in_empty_file() {
        let updated = insert_instruction("", "New instruction");

        assert_eq!(updated, "## Additional Instructions\n\n- New instruction\n");
    }
}
