use crate::sections::insert_instruction;
use rulesync_analyzer::ProjectContext;
use rulesync_discovery::InstructionFile;
use rulesync_matcher::instruction_exists;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Outcome of updating a single file.
///
/// `changed` is false whenever the instruction was judged already
/// present, in which case `new_content` equals `old_content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub old_content: String,
    pub new_content: String,
    pub changed: bool,
}

/// Append inferred project facts to an instruction.
///
/// One detected language becomes "(this is a X project)", several become
/// "(languages: ...)". When the raw instruction mentions testing and a
/// test framework is known, " using <framework>" is appended on top.
pub fn contextualize(instruction: &str, context: &ProjectContext) -> String {
    let languages: Vec<&str> = context.languages.iter().map(String::as_str).collect();

    let mut contextualized = match languages.as_slice() {
        [] => instruction.to_string(),
        [only] => format!("{instruction} (this is a {only} project)"),
        many => format!("{instruction} (languages: {})", many.join(", ")),
    };

    if instruction.to_lowercase().contains("test") {
        if let Some(test_framework) = &context.test_framework {
            contextualized.push_str(&format!(" using {test_framework}"));
        }
    }

    contextualized
}

/// Update instruction files with a new instruction.
///
/// Files are processed strictly in input order. Unreadable files are
/// skipped; files already containing an equivalent instruction come back
/// with `changed: false`. With `apply`, every changed file is written
/// back verbatim; write failures are dropped after a warning and never
/// fail the batch.
pub fn update_files(
    files: &[InstructionFile],
    instruction: &str,
    context: &ProjectContext,
    apply: bool,
) -> Vec<(PathBuf, UpdateResult)> {
    let mut updates = Vec::new();

    for file in files {
        let content = match file.read() {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Skipping unreadable {}: {err}", file.path.display());
                continue;
            }
        };

        if instruction_exists(&content, instruction) {
            updates.push((
                file.path.clone(),
                UpdateResult {
                    old_content: content.clone(),
                    new_content: content,
                    changed: false,
                },
            ));
            continue;
        }

        let contextualized = contextualize(instruction, context);
        let new_content = insert_instruction(&content, &contextualized);

        if apply && new_content != content {
            if let Err(err) = fs::write(&file.path, &new_content) {
                log::warn!("Failed to write {}: {err}", file.path.display());
            }
        }

        updates.push((
            file.path.clone(),
            UpdateResult {
                old_content: content,
                new_content,
                changed: true,
            },
        ));
    }

    updates
}
