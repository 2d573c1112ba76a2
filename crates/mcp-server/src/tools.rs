//! MCP Tools for rulesync
//!
//! Lets AI agents read, update and validate their own instruction files
//! through one workspace-scoped interface. Every tool resolves and
//! validates `project_path` before touching the filesystem; write
//! operations default to preview mode.

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use rulesync_analyzer::{analyze, ProjectContext};
use rulesync_discovery::{discover, resolve_root, INSTRUCTION_FILE_PATTERNS};
use rulesync_updater::update_files;
use rulesync_validator::{validate, ValidateOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rulesync MCP Service
#[derive(Clone)]
pub struct RulesyncService {
    /// Tool router
    tool_router: ToolRouter<Self>,
}

impl RulesyncService {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    fn resolve_project(path: &str) -> Result<PathBuf, rulesync_discovery::DiscoveryError> {
        resolve_root(Path::new(path))
    }
}

impl Default for RulesyncService {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for RulesyncService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Rulesync keeps AI assistant instruction files (AGENTS.md, CLAUDE.md, \
                 .cursorrules, ...) in sync. Use 'list' or 'read' to inspect files, \
                 'context' for project facts, 'update' to add an instruction everywhere \
                 (preview by default), and 'validate' to check cross-file consistency."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tool Input/Output Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadRequest {
    /// Project directory
    #[schemars(description = "Absolute path to project directory")]
    pub project_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateRequest {
    /// Project directory
    #[schemars(description = "Absolute path to project directory")]
    pub project_path: String,

    /// Instruction to add to all files
    #[schemars(description = "Instruction to add to all instruction files")]
    pub instruction: String,

    /// Preview only (default: true)
    #[schemars(description = "If true, show what would change without applying")]
    pub preview: Option<bool>,

    /// Why this instruction is being added
    #[schemars(description = "Why this instruction is being added (for the audit log)")]
    pub rationale: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ValidateRequest {
    /// Project directory
    #[schemars(description = "Absolute path to project directory")]
    pub project_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRequest {
    /// Project directory
    #[schemars(description = "Absolute path to project directory")]
    pub project_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ContextRequest {
    /// Project directory
    #[schemars(description = "Absolute path to project directory")]
    pub project_path: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct FileContent {
    /// Path relative to the project root
    pub path: String,
    /// Instruction file kind
    pub kind: String,
    /// Content length in bytes
    pub size: usize,
    /// Full file content
    pub content: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ReadResult {
    pub status: String,
    pub project: String,
    pub file_count: usize,
    pub files: Vec<FileContent>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct FileEntry {
    /// Path relative to the project root
    pub path: String,
    /// Instruction file kind
    pub kind: String,
    /// File size in bytes
    pub size: u64,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ListResult {
    pub status: String,
    pub file_count: usize,
    pub total_size: u64,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ContextInfo {
    /// Detected languages
    pub languages: Vec<String>,
    /// Detected frameworks
    pub frameworks: Vec<String>,
    /// Detected test framework
    pub test_framework: Option<String>,
    /// Detected package manager
    pub package_manager: Option<String>,
    /// Project type (reserved)
    pub project_type: Option<String>,
}

impl From<ProjectContext> for ContextInfo {
    fn from(context: ProjectContext) -> Self {
        Self {
            languages: context.languages.into_iter().collect(),
            frameworks: context.frameworks,
            test_framework: context.test_framework,
            package_manager: context.package_manager,
            project_type: context.project_type,
        }
    }
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ContextResult {
    pub status: String,
    pub project: String,
    pub context: ContextInfo,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct UpdateOutcome {
    pub status: String,
    pub message: String,
    pub instruction: String,
    pub files_updated: Vec<String>,
    pub files_skipped: Vec<String>,
    pub context: ContextInfo,
    pub rationale: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ValidateOutcome {
    pub status: String,
    pub file_count: usize,
    pub files: Vec<String>,
    pub issues: Vec<String>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct NoFilesResult {
    pub status: String,
    pub message: String,
    pub supported_files: Vec<String>,
}

fn no_files() -> NoFilesResult {
    NoFilesResult {
        status: "NO_FILES".to_string(),
        message: "No instruction files found in project".to_string(),
        supported_files: INSTRUCTION_FILE_PATTERNS
            .iter()
            .map(|pattern| pattern.to_string())
            .collect(),
    }
}

fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).unwrap_or_default(),
    )])
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl RulesyncService {
    /// Read all instruction files
    #[tool(
        description = "Read current instruction files in a project (AGENTS.md, CLAUDE.md, copilot-instructions.md, ...). Safe read-only operation."
    )]
    pub async fn read(
        &self,
        Parameters(request): Parameters<ReadRequest>,
    ) -> Result<CallToolResult, McpError> {
        let root = match Self::resolve_project(&request.project_path) {
            Ok(root) => root,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        };

        let files = discover(&root);
        if files.is_empty() {
            return Ok(json_result(&no_files()));
        }

        let mut contents = Vec::new();
        for file in &files {
            let content = match file.read() {
                Ok(content) => content,
                Err(e) => {
                    return Ok(CallToolResult::error(vec![Content::text(format!(
                        "Error reading {}: {e}",
                        file.file_name()
                    ))]));
                }
            };
            contents.push(FileContent {
                path: relative(&file.path, &root),
                kind: file.kind.as_str().to_string(),
                size: content.len(),
                content,
            });
        }

        log::info!("Read {} instruction files from {}", files.len(), root.display());

        Ok(json_result(&ReadResult {
            status: "SUCCESS".to_string(),
            project: root.display().to_string(),
            file_count: contents.len(),
            files: contents,
        }))
    }

    /// Add an instruction to every instruction file
    #[tool(
        description = "Update all instruction files with a new instruction, with duplicate prevention and smart section placement. WRITE OPERATION when preview=false; preview is the default."
    )]
    pub async fn update(
        &self,
        Parameters(request): Parameters<UpdateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let root = match Self::resolve_project(&request.project_path) {
            Ok(root) => root,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        };

        let files = discover(&root);
        if files.is_empty() {
            return Ok(json_result(&no_files()));
        }

        let context = analyze(&root);
        let preview = request.preview.unwrap_or(true);
        let rationale = request
            .rationale
            .unwrap_or_else(|| "No rationale provided".to_string());

        let plan = update_files(&files, &request.instruction, &context, false);
        let files_updated: Vec<String> = plan
            .iter()
            .filter(|(_, result)| result.changed)
            .map(|(path, _)| relative(path, &root))
            .collect();
        let files_skipped: Vec<String> = plan
            .iter()
            .filter(|(_, result)| !result.changed)
            .map(|(path, _)| relative(path, &root))
            .collect();

        if files_updated.is_empty() {
            return Ok(json_result(&UpdateOutcome {
                status: "NO_CHANGES".to_string(),
                message: "Instruction already exists in all files".to_string(),
                instruction: request.instruction,
                files_updated,
                files_skipped,
                context: context.into(),
                rationale,
            }));
        }

        if preview {
            log::info!("Preview mode: would update {} files", files_updated.len());
            return Ok(json_result(&UpdateOutcome {
                status: "PREVIEW".to_string(),
                message: "Preview mode - no files modified. Set preview=false to apply."
                    .to_string(),
                instruction: request.instruction,
                files_updated,
                files_skipped,
                context: context.into(),
                rationale,
            }));
        }

        update_files(&files, &request.instruction, &context, true);
        log::info!(
            "Updated {} files with instruction. Rationale: {rationale}",
            files_updated.len()
        );

        Ok(json_result(&UpdateOutcome {
            status: "SUCCESS".to_string(),
            message: format!("Successfully updated {} file(s)", files_updated.len()),
            instruction: request.instruction,
            files_updated,
            files_skipped,
            context: context.into(),
            rationale,
        }))
    }

    /// Check instruction files for cross-file consistency
    #[tool(
        description = "Validate instruction file consistency across all discovered files. Safe read-only operation."
    )]
    pub async fn validate(
        &self,
        Parameters(request): Parameters<ValidateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let root = match Self::resolve_project(&request.project_path) {
            Ok(root) => root,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        };

        let files = discover(&root);
        if files.is_empty() {
            return Ok(json_result(&no_files()));
        }

        let (all_valid, issues) = validate(&files, &root, ValidateOptions::default());
        log::info!(
            "Validated {} files: {}",
            files.len(),
            if all_valid { "valid" } else { "issues found" }
        );

        Ok(json_result(&ValidateOutcome {
            status: if all_valid { "VALID" } else { "INVALID" }.to_string(),
            file_count: files.len(),
            files: files
                .iter()
                .map(|file| relative(&file.path, &root))
                .collect(),
            issues,
        }))
    }

    /// List instruction files with metadata
    #[tool(
        description = "List all instruction files in a project with paths, kinds and sizes. Safe read-only operation."
    )]
    pub async fn list(
        &self,
        Parameters(request): Parameters<ListRequest>,
    ) -> Result<CallToolResult, McpError> {
        let root = match Self::resolve_project(&request.project_path) {
            Ok(root) => root,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        };

        let mut files = discover(&root);
        if files.is_empty() {
            return Ok(json_result(&no_files()));
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let mut entries = Vec::new();
        let mut total_size = 0u64;
        for file in &files {
            let size = std::fs::metadata(&file.path)
                .map(|metadata| metadata.len())
                .unwrap_or(0);
            total_size += size;
            entries.push(FileEntry {
                path: relative(&file.path, &root),
                kind: file.kind.as_str().to_string(),
                size,
            });
        }

        log::info!("Listed {} instruction files", entries.len());

        Ok(json_result(&ListResult {
            status: "SUCCESS".to_string(),
            file_count: entries.len(),
            total_size,
            files: entries,
        }))
    }

    /// Analyze project context
    #[tool(
        description = "Analyze project context (languages, frameworks, test tools) for context-aware updates. Safe read-only operation."
    )]
    pub async fn context(
        &self,
        Parameters(request): Parameters<ContextRequest>,
    ) -> Result<CallToolResult, McpError> {
        let root = match Self::resolve_project(&request.project_path) {
            Ok(root) => root,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(format!("Error: {e}"))])),
        };

        let context = analyze(&root);
        log::info!("Analyzed project context for {}", root.display());

        Ok(json_result(&ContextResult {
            status: "SUCCESS".to_string(),
            project: root.display().to_string(),
            context: context.into(),
        }))
    }
}
