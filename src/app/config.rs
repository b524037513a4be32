use crate::app::cli::Cli;
use crate::app::models::{RuntimeConfig, ScanConfig, Strategy, SummarizationRules};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILENAME: &str = "config.json";

/// Value of `llm_interpretation_guide` that selects [`LLM_INTERPRETATION_GUIDE`].
pub const DEFAULT_GUIDE_SENTINEL: &str = "default";

pub const LLM_INTERPRETATION_GUIDE: &str = r#"This document is a token-efficient representation of a codebase. Read it as follows:

- HIERARCHY: Indentation (two spaces per level) represents the directory structure.
- DIRECTORIES: A line ending with a forward slash `/` is a directory.
- FILES: A line not ending in a slash is a file inside the directory given by its indentation.
- ROOTS: Each scanned path starts with a `---[ROOT_DIRECTORY: path]---` or `---[FILE: path]---` header.
- FILE CONTENT:
  - Textual content is enclosed between two `---[FILE_CONTENT]---` markers placed right after the filename.
  - Comments and redundant blank lines have been removed from the content.
- SPECIAL FILE TAGS: Some files are represented by a single tag on the line after the filename:
  - `[SUMMARY_JSON] {"key":"value",...}`: A compact one-line JSON summary of a configuration file (e.g. package.json).
  - `[BINARY]`: A binary file whose content is not included.
  - `[IGNORED]`: A file skipped by the filtering rules (minified files, lock files, SVG, ...).
  - `[ERROR] message...`: The file could not be read or processed."#;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// On-disk configuration. Keys missing from the file keep their default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub output_dir: String,
    pub output_filename: String,
    pub text_extensions: Vec<String>,
    pub included_hidden_filenames: Vec<String>,
    pub ignored_folders: Vec<String>,
    pub ignored_filenames: Vec<String>,
    pub ignored_extensions: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub respect_gitignore: bool,
    pub llm_interpretation_guide: String,
    pub summarization_rules: SummarizationRules,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let mut summarization_rules = SummarizationRules::default();
        for name in ["package.json", "jsconfig.json", "tsconfig.json"] {
            summarization_rules
                .by_filename
                .insert(name.to_string(), Strategy::SummarizeJson);
        }

        Self {
            output_dir: "scan_results".to_string(),
            output_filename: "scan_output.txt".to_string(),
            text_extensions: strings(&[
                ".txt", ".py", ".js", ".json", ".html", ".css", ".md", ".xml", ".csv", ".ini",
                ".cfg", ".log", ".rst", ".yml", ".yaml", ".tex", ".java", ".c", ".cpp", ".h",
                ".hpp", ".sh", ".bat", ".rb", ".php", ".jsx", ".pl", ".sql", ".cs", ".go", ".rs",
                ".swift", ".kt", ".scala", ".jsw", ".vb", ".example", ".ts",
            ]),
            included_hidden_filenames: strings(&[".env.example"]),
            ignored_folders: strings(&[
                "node_modules",
                "venv",
                "__pycache__",
                ".git",
                ".vscode",
                ".idea",
                "playwright-report",
            ]),
            ignored_filenames: strings(&[
                "package-lock.json",
                "yarn.lock",
                "pnpm-lock.yaml",
                "composer.lock",
            ]),
            ignored_extensions: strings(&[".svg", ".lock"]),
            exclude_patterns: Vec::new(),
            respect_gitignore: false,
            llm_interpretation_guide: LLM_INTERPRETATION_GUIDE.to_string(),
            summarization_rules,
        }
    }
}

impl ConfigFile {
    /// Freezes the file contents into the snapshot the scanner works from.
    pub fn into_scan_config(self, extra_excludes: &[String]) -> Result<ScanConfig> {
        let guide = if self.llm_interpretation_guide == DEFAULT_GUIDE_SENTINEL {
            LLM_INTERPRETATION_GUIDE.to_string()
        } else {
            self.llm_interpretation_guide
        };
        let excludes = merge_vecs(Some(self.exclude_patterns), Some(extra_excludes.to_vec()));

        Ok(ScanConfig {
            text_extensions: self.text_extensions.into_iter().collect(),
            included_hidden_filenames: self.included_hidden_filenames.into_iter().collect(),
            ignored_folders: self.ignored_folders.into_iter().collect(),
            ignored_filenames: self.ignored_filenames.into_iter().collect(),
            ignored_extensions: self.ignored_extensions.into_iter().collect(),
            summarization_rules: self.summarization_rules,
            guide,
            exclude: build_globset(&excludes)?,
            respect_gitignore: self.respect_gitignore,
        })
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn parse_config(path: &Path, content: &str) -> Result<ConfigFile> {
    if is_toml(path) {
        toml::from_str(content).context(format!("Failed to parse {:?}", path))
    } else {
        serde_json::from_str(content).context(format!("Failed to parse {:?}", path))
    }
}

fn render_config(path: &Path, config: &ConfigFile) -> Result<String> {
    if is_toml(path) {
        Ok(toml::to_string_pretty(config)?)
    } else {
        Ok(serde_json::to_string_pretty(config)?)
    }
}

fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("tree_prompt")
            .join(DEFAULT_CONFIG_FILENAME)
    })
}

/// Explicit path first, then `./config.json`, then the per-user config.
fn locate_config(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILENAME);
    if local.exists() {
        return local;
    }
    match home_config_path() {
        Some(home) if home.exists() => home,
        _ => local,
    }
}

/// Loads the config at `path`, writing the defaults there when it is missing.
/// Any failure is logged and the built-in defaults are used instead.
pub fn load_config(path: &Path) -> ConfigFile {
    if !path.exists() {
        log::info!(
            "Configuration file {:?} not found. Creating it with default values.",
            path
        );
        let defaults = ConfigFile::default();
        if let Err(e) = write_config(path, &defaults) {
            log::warn!("Error creating default config file: {:#}. Using internal defaults.", e);
        }
        return defaults;
    }

    let loaded = fs::read_to_string(path)
        .context(format!("Failed to read config at {:?}", path))
        .and_then(|content| parse_config(path, &content));

    match loaded {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{:#}. Using internal defaults.", e);
            ConfigFile::default()
        }
    }
}

pub fn write_config(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create config directory {:?}", parent))?;
    }
    let content = render_config(path, config)?;
    fs::write(path, content).context(format!("Failed to write config to {:?}", path))
}

fn merge_vecs(file_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = file_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}

/// Merges the config file with CLI overrides. CLI values win.
pub fn resolve_config(cli: &Cli) -> Result<RuntimeConfig> {
    let path = locate_config(cli.config.as_deref());
    log::debug!("Using configuration {:?}", path);
    let mut file = load_config(&path);

    if let Some(dir) = &cli.output_dir {
        file.output_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(name) = &cli.output_filename {
        file.output_filename = name.clone();
    }
    if cli.gitignore {
        file.respect_gitignore = true;
    }

    let output_path = Path::new(&file.output_dir).join(&file.output_filename);
    let excludes = cli.exclude.clone().unwrap_or_default();

    Ok(RuntimeConfig {
        scan: file.into_scan_config(&excludes)?,
        output_path,
        to_stdout: cli.stdout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = load_config(&path);
        assert_eq!(config, ConfigFile::default());
        assert!(path.exists());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["output_filename"], "scan_output.txt");
        assert_eq!(
            written["summarization_rules"]["by_filename"]["package.json"],
            "summarize_json"
        );
        assert_eq!(
            written["summarization_rules"]["default_strategy"],
            "full_content"
        );
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"ignored_folders": ["build"], "llm_interpretation_guide": "default",
                "summarization_rules": {"by_extension": {".json": "summarize_json"}}}"#,
        )
        .unwrap();

        let scan = load_config(&path).into_scan_config(&[]).unwrap();
        assert!(scan.ignored_folders.contains("build"));
        assert!(!scan.ignored_folders.contains("node_modules"));
        assert!(scan.text_extensions.contains(".rs"));
        assert_eq!(scan.guide, LLM_INTERPRETATION_GUIDE);
        assert_eq!(
            scan.summarization_rules.by_extension.get(".json"),
            Some(&Strategy::SummarizeJson)
        );
        assert!(scan.summarization_rules.by_filename.is_empty());
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(&path), ConfigFile::default());
    }

    #[test]
    fn toml_configs_are_supported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree_prompt.toml");
        fs::write(
            &path,
            "output_filename = \"ctx.txt\"\nllm_interpretation_guide = \"Custom guide\"\n\n[summarization_rules]\ndefault_strategy = \"summarize_json\"\n",
        )
        .unwrap();

        let file = load_config(&path);
        assert_eq!(file.output_filename, "ctx.txt");
        let scan = file.into_scan_config(&[]).unwrap();
        assert_eq!(scan.guide, "Custom guide");
        assert_eq!(
            scan.summarization_rules.default_strategy,
            Strategy::SummarizeJson
        );
    }

    #[test]
    fn invalid_exclude_glob_is_an_error() {
        let result = ConfigFile::default().into_scan_config(&["src/[".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn merge_keeps_order_and_drops_duplicates() {
        let merged = merge_vecs(
            Some(vec!["a".into(), "b".into()]),
            Some(vec!["b".into(), "c".into()]),
        );
        assert_eq!(merged, vec!["a", "b", "c"]);
    }
}
