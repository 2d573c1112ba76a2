use crate::context::ProjectContext;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Python source files scanned at most when probing for an import
const MAX_IMPORT_SCAN_FILES: usize = 10;

/// package.json dependency name -> framework name, in report order
const NODE_FRAMEWORKS: &[(&str, &str)] = &[
    ("react", "React"),
    ("next", "Next.js"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("express", "Express"),
    ("@nestjs/core", "NestJS"),
];

/// Node test libraries, in detection priority order
const NODE_TEST_FRAMEWORKS: &[&str] = &["jest", "vitest", "mocha"];

pub(crate) fn apply_python(root: &Path, context: &mut ProjectContext) {
    if !has_file(root, "requirements.txt") && !has_file(root, "pyproject.toml") {
        return;
    }

    context.package_manager = Some("pip".to_string());
    context.frameworks.extend(python_frameworks(root));

    if has_file(root, "pytest.ini") || has_directory(root, "tests") {
        context.test_framework = Some("pytest".to_string());
    } else if has_directory(root, "test") {
        context.test_framework = Some("unittest".to_string());
    }
}

pub(crate) fn apply_node(root: &Path, context: &mut ProjectContext) {
    let manifest = root.join("package.json");
    if !manifest.is_file() {
        return;
    }

    context.package_manager = Some("npm".to_string());

    let Some(dependencies) = read_dependency_names(&manifest) else {
        return;
    };

    for (dependency, framework) in NODE_FRAMEWORKS {
        if dependencies.contains(*dependency) {
            context.frameworks.push((*framework).to_string());
        }
    }

    for library in NODE_TEST_FRAMEWORKS {
        if dependencies.contains(*library) {
            context.test_framework = Some((*library).to_string());
            break;
        }
    }
}

pub(crate) fn apply_rust(root: &Path, context: &mut ProjectContext) {
    if has_file(root, "Cargo.toml") {
        context.package_manager = Some("cargo".to_string());
        context.test_framework = Some("cargo test".to_string());
    }
}

pub(crate) fn apply_go(root: &Path, context: &mut ProjectContext) {
    if has_file(root, "go.mod") {
        context.package_manager = Some("go".to_string());
        context.test_framework = Some("go test".to_string());
    }
}

fn python_frameworks(root: &Path) -> Vec<String> {
    let mut frameworks = Vec::new();

    if has_file(root, "manage.py") {
        frameworks.push("Django".to_string());
    }

    if has_directory(root, "app") || has_file(root, "app.py") {
        if has_python_import(root, "fastapi") {
            frameworks.push("FastAPI".to_string());
        } else if has_python_import(root, "flask") {
            frameworks.push("Flask".to_string());
        }
    }

    frameworks
}

/// Probe Python sources for `import <module>` / `from <module>`,
/// giving up after a fixed number of readable files.
fn has_python_import(root: &Path, module: &str) -> bool {
    let import_statement = format!("import {module}");
    let from_statement = format!("from {module}");
    let mut checked = 0usize;

    for entry in WalkDir::new(root).into_iter().filter_map(|r| r.ok()) {
        if checked >= MAX_IMPORT_SCAN_FILES {
            break;
        }
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some("py")
        {
            continue;
        }
        match fs::read_to_string(path) {
            Ok(content) => {
                if content.contains(&import_statement) || content.contains(&from_statement) {
                    return true;
                }
                checked += 1;
            }
            Err(_) => continue,
        }
    }

    false
}

fn read_dependency_names(manifest: &Path) -> Option<HashSet<String>> {
    let raw = fs::read_to_string(manifest).ok()?;
    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("Ignoring malformed {}: {err}", manifest.display());
            return None;
        }
    };

    let mut names = HashSet::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(map) = value.get(section).and_then(|v| v.as_object()) {
            names.extend(map.keys().cloned());
        }
    }
    Some(names)
}

fn has_file(root: &Path, name: &str) -> bool {
    root.join(name).exists()
}

fn has_directory(root: &Path, name: &str) -> bool {
    root.join(name).is_dir()
}
