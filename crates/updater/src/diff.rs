use similar::TextDiff;

/// Generate a unified diff between old and new content.
///
/// Headers are `a/<file_name>` and `b/<file_name>`. The diff is empty
/// exactly when the contents are equal.
pub fn generate_diff(old_content: &str, new_content: &str, file_name: &str) -> String {
    if old_content == new_content {
        return String::new();
    }

    TextDiff::from_lines(old_content, new_content)
        .unified_diff()
        .header(&format!("a/{file_name}"), &format!("b/{file_name}"))
        .to_string()
}
