use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn rulesync() -> Command {
    Command::cargo_bin("rulesync").unwrap()
}

#[test]
fn list_fails_in_empty_project() {
    let temp = tempdir().unwrap();

    rulesync()
        .args(["list", "--project-dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Supported files: AGENTS.md"))
        .stderr(predicate::str::contains("No instruction files found"));
}

#[test]
fn list_shows_discovered_files() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("AGENTS.md"), "# Agents\n").unwrap();
    fs::write(temp.path().join("CLAUDE.md"), "# Claude\n").unwrap();

    rulesync()
        .args(["list", "--project-dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("AGENTS.md [agents]"))
        .stdout(predicate::str::contains("CLAUDE.md [claude]"))
        .stdout(predicate::str::contains("Total: 2 file(s)"));
}

#[test]
fn update_applies_instruction_to_all_files() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("AGENTS.md"), "# Agent Instructions\n").unwrap();
    fs::write(temp.path().join("main.py"), "print('hi')\n").unwrap();
    fs::write(temp.path().join("requirements.txt"), "pytest\n").unwrap();

    rulesync()
        .args(["update", "Use type hints", "--yes", "--project-dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 1 file(s)"));

    let content = fs::read_to_string(temp.path().join("AGENTS.md")).unwrap();
    assert!(content.contains("- Use type hints (this is a Python project)"));
    assert!(content.contains("## Additional Instructions"));
}

#[test]
fn update_skips_existing_instruction() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("AGENTS.md"),
        "# Agent Instructions\n\n- Run tests before committing\n",
    )
    .unwrap();

    rulesync()
        .args([
            "update",
            "Run tests before committing",
            "--yes",
            "--project-dir",
        ])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes needed"));
}

#[test]
fn update_dry_run_leaves_files_untouched() {
    let temp = tempdir().unwrap();
    let original = "# Agent Instructions\n";
    fs::write(temp.path().join("AGENTS.md"), original).unwrap();

    rulesync()
        .args(["update", "New rule", "--dry-run", "--project-dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert_eq!(
        fs::read_to_string(temp.path().join("AGENTS.md")).unwrap(),
        original
    );
}

#[test]
fn update_fails_without_instruction_files() {
    let temp = tempdir().unwrap();

    rulesync()
        .args(["update", "Anything", "--yes", "--project-dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No instruction files found"));
}

#[test]
fn validate_passes_with_single_file() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("AGENTS.md"), "# Agents\n").unwrap();

    rulesync()
        .args(["validate", "--project-dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All instruction files are consistent"));
}

#[test]
fn validate_reports_divergent_files() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("AGENTS.md"),
        "## Security\n\n- Never commit secrets\n",
    )
    .unwrap();
    fs::write(temp.path().join("CLAUDE.md"), "# Notes\n").unwrap();

    rulesync()
        .args(["validate", "--project-dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("may be missing guidance on"));
}

#[test]
fn init_reports_files_and_context() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("AGENTS.md"), "# Agents\n").unwrap();
    fs::write(temp.path().join("main.py"), "print('hi')\n").unwrap();
    fs::write(temp.path().join("requirements.txt"), "pytest\n").unwrap();

    rulesync()
        .args(["init", "--project-dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 instruction file(s):"))
        .stdout(predicate::str::contains("Languages: Python"))
        .stdout(predicate::str::contains("Package manager: pip"));
}

#[test]
fn invalid_project_dir_fails() {
    rulesync()
        .args(["list", "--project-dir", "/definitely/not/a/real/path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
