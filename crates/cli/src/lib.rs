//! Command-line shell around the rulesync core.
//!
//! Rendering stays deliberately thin: the core engine owns discovery,
//! context analysis, updates and validation; this crate parses flags,
//! prints plain text and maps outcomes to exit codes.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use rulesync_analyzer::{analyze, ProjectContext};
use rulesync_discovery::{discover, resolve_root, InstructionFile, INSTRUCTION_FILE_PATTERNS};
use rulesync_updater::update_files;
use rulesync_validator::{validate, ValidateOptions};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rulesync")]
#[command(about = "Brief your AI coding assistants once, update them all", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report discovered instruction files and inferred project context
    Init {
        /// Project directory (default: current directory)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
    /// Add an instruction to every instruction file
    Update {
        /// Instruction text to add
        instruction: String,

        /// Project directory (default: current directory)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Apply without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Show the plan without writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Check instruction files for cross-file consistency
    Validate {
        /// Project directory (default: current directory)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
    /// List discovered instruction files
    List {
        /// Project directory (default: current directory)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Init { project_dir } => init(&project_dir),
        Commands::Update {
            instruction,
            project_dir,
            yes,
            dry_run,
        } => update(&instruction, &project_dir, yes, dry_run),
        Commands::Validate { project_dir } => run_validate(&project_dir),
        Commands::List { project_dir } => list(&project_dir),
    }
}

fn init(project_dir: &Path) -> Result<()> {
    let root = resolve_root(project_dir)?;
    print_stdout(&format!("Initializing rulesync in {}", root.display()))?;

    let files = discover(&root);
    if files.is_empty() {
        print_stdout("No instruction files found")?;
        print_supported_files()?;
    } else {
        print_stdout(&format!("Found {} instruction file(s):", files.len()))?;
        print_file_listing(&files, &root)?;
    }

    let context = analyze(&root);
    print_context(&context)?;

    print_stdout("Run 'rulesync update \"<instruction>\"' to add instructions")?;
    Ok(())
}

fn update(instruction: &str, project_dir: &Path, yes: bool, dry_run: bool) -> Result<()> {
    let root = resolve_root(project_dir)?;

    let files = discover(&root);
    if files.is_empty() {
        bail!("No instruction files found. Run 'rulesync init' first.");
    }

    let context = analyze(&root);
    print_context(&context)?;

    let preview = update_files(&files, instruction, &context, false);
    let planned: Vec<&PathBuf> = preview
        .iter()
        .filter(|(_, result)| result.changed)
        .map(|(path, _)| path)
        .collect();
    let skipped: Vec<&PathBuf> = preview
        .iter()
        .filter(|(_, result)| !result.changed)
        .map(|(path, _)| path)
        .collect();

    if planned.is_empty() {
        print_stdout("No changes needed - instruction already exists in all files")?;
        return Ok(());
    }

    print_stdout(&format!("Files to update ({}):", planned.len()))?;
    for path in &planned {
        print_stdout(&format!("  {}", relative(path, &root)))?;
    }
    if !skipped.is_empty() {
        print_stdout(&format!(
            "Skipped {} file(s) (instruction already exists):",
            skipped.len()
        ))?;
        for path in &skipped {
            print_stdout(&format!("  {}", relative(path, &root)))?;
        }
    }

    if dry_run {
        print_stdout("Dry run - no files were modified")?;
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Apply instruction to {} file(s)?", planned.len()))
            .default(true)
            .interact()?;
        if !confirmed {
            print_stdout("Cancelled - no files were modified")?;
            return Ok(());
        }
    }

    update_files(&files, instruction, &context, true);
    print_stdout(&format!("Updated {} file(s)", planned.len()))?;
    Ok(())
}

fn run_validate(project_dir: &Path) -> Result<()> {
    let root = resolve_root(project_dir)?;

    let files = discover(&root);
    if files.is_empty() {
        bail!("No instruction files found");
    }

    print_stdout(&format!("Checking {} file(s)...", files.len()))?;
    let (all_valid, issues) = validate(&files, &root, ValidateOptions::default());

    if all_valid {
        print_stdout("All instruction files are consistent")?;
        return Ok(());
    }

    for issue in &issues {
        print_stdout(&format!("  - {issue}"))?;
    }
    bail!("Found {} consistency issue(s)", issues.len());
}

fn list(project_dir: &Path) -> Result<()> {
    let root = resolve_root(project_dir)?;

    let mut files = discover(&root);
    if files.is_empty() {
        print_supported_files()?;
        bail!("No instruction files found");
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    print_file_listing(&files, &root)?;

    let total_size: u64 = files.iter().map(|file| file_size(&file.path)).sum();
    print_stdout(&format!(
        "Total: {} file(s), {} bytes",
        files.len(),
        total_size
    ))?;
    Ok(())
}

fn print_file_listing(files: &[InstructionFile], root: &Path) -> Result<()> {
    for file in files {
        print_stdout(&format!(
            "  {} [{}] {} bytes",
            relative(&file.path, root),
            file.kind.as_str(),
            file_size(&file.path)
        ))?;
    }
    Ok(())
}

fn print_context(context: &ProjectContext) -> Result<()> {
    print_stdout("Project context:")?;
    if !context.languages.is_empty() {
        let languages: Vec<&str> = context.languages.iter().map(String::as_str).collect();
        print_stdout(&format!("  Languages: {}", languages.join(", ")))?;
    }
    if !context.frameworks.is_empty() {
        print_stdout(&format!("  Frameworks: {}", context.frameworks.join(", ")))?;
    }
    if let Some(test_framework) = &context.test_framework {
        print_stdout(&format!("  Testing: {test_framework}"))?;
    }
    if let Some(package_manager) = &context.package_manager {
        print_stdout(&format!("  Package manager: {package_manager}"))?;
    }
    Ok(())
}

fn print_supported_files() -> Result<()> {
    print_stdout(&format!(
        "Supported files: {}",
        INSTRUCTION_FILE_PATTERNS.join(", ")
    ))
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|metadata| metadata.len()).unwrap_or(0)
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}
