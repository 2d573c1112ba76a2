use crate::ecosystems;
use crate::walker;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Directory levels below the root inspected for language detection
pub const DEFAULT_SCAN_DEPTH: usize = 3;

/// Extension -> canonical language name
const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("jsx", "JavaScript"),
    ("tsx", "TypeScript"),
    ("rs", "Rust"),
    ("go", "Go"),
    ("java", "Java"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("kt", "Kotlin"),
    ("c", "C"),
    ("cpp", "C++"),
    ("cs", "C#"),
];

/// Lightweight project context inferred from the file tree.
///
/// Built fresh per invocation; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub languages: BTreeSet<String>,
    pub frameworks: Vec<String>,
    pub test_framework: Option<String>,
    pub package_manager: Option<String>,
    pub project_type: Option<String>,
}

/// Analyze a project tree.
///
/// Ecosystems are checked in a fixed order (Python, Node, Rust, Go);
/// a later match overwrites `package_manager`/`test_framework` set by an
/// earlier one.
pub fn analyze(root: &Path) -> ProjectContext {
    let mut context = ProjectContext {
        languages: detect_languages(root),
        ..ProjectContext::default()
    };

    ecosystems::apply_python(root, &mut context);
    ecosystems::apply_node(root, &mut context);
    ecosystems::apply_rust(root, &mut context);
    ecosystems::apply_go(root, &mut context);

    log::debug!(
        "Project context for {}: languages={:?} package_manager={:?}",
        root.display(),
        context.languages,
        context.package_manager
    );
    context
}

fn detect_languages(root: &Path) -> BTreeSet<String> {
    let mut languages = BTreeSet::new();

    for path in walker::project_files(root, DEFAULT_SCAN_DEPTH) {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };
        let extension = extension.to_lowercase();
        if let Some((_, language)) = EXTENSION_LANGUAGES
            .iter()
            .find(|(candidate, _)| *candidate == extension)
        {
            languages.insert((*language).to_string());
        }
    }

    languages
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn detects_python_project() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("main.py"), "print('hello')").unwrap();
        fs::write(temp.path().join("requirements.txt"), "click==8.0.0").unwrap();

        let context = analyze(temp.path());

        assert!(context.languages.contains("Python"));
        assert_eq!(context.package_manager.as_deref(), Some("pip"));
    }

    #[test]
    fn detects_javascript_project_with_react() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.js"), "console.log('hello');").unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"name": "test", "dependencies": {"react": "^18.0.0"}}"#,
        )
        .unwrap();

        let context = analyze(temp.path());

        assert!(context.languages.contains("JavaScript"));
        assert_eq!(context.package_manager.as_deref(), Some("npm"));
        assert!(context.frameworks.iter().any(|f| f == "React"));
    }

    #[test]
    fn detects_pytest_from_tests_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("main.py"), "def hello(): pass").unwrap();
        fs::write(temp.path().join("requirements.txt"), "pytest>=7.0.0").unwrap();
        let tests_dir = temp.path().join("tests");
        fs::create_dir(&tests_dir).unwrap();
        fs::write(tests_dir.join("test_main.py"), "def test_hello(): pass").unwrap();

        let context = analyze(temp.path());

        assert_eq!(context.test_framework.as_deref(), Some("pytest"));
    }

    #[test]
    fn empty_project_yields_default_context() {
        let temp = tempdir().unwrap();

        let context = analyze(temp.path());

        assert!(context.languages.is_empty());
        assert!(context.frameworks.is_empty());
        assert_eq!(context.test_framework, None);
        assert_eq!(context.package_manager, None);
    }

    #[test]
    fn last_checked_ecosystem_wins() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("main.py"), "def hello(): pass").unwrap();
        fs::write(temp.path().join("requirements.txt"), "pytest").unwrap();
        fs::create_dir(temp.path().join("tests")).unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package]\nname = \"x\"").unwrap();

        let context = analyze(temp.path());

        assert_eq!(context.package_manager.as_deref(), Some("cargo"));
        assert_eq!(context.test_framework.as_deref(), Some("cargo test"));
    }

    #[test]
    fn language_set_collapses_duplicates() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.py"), "").unwrap();
        fs::write(temp.path().join("b.py"), "").unwrap();
        fs::write(temp.path().join("c.jsx"), "").unwrap();
        fs::write(temp.path().join("d.js"), "").unwrap();

        let context = analyze(temp.path());

        let languages: Vec<&str> = context.languages.iter().map(String::as_str).collect();
        assert_eq!(languages, vec!["JavaScript", "Python"]);
    }
}
