use globset::GlobSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// A content transformation selected per file by the summarization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    #[default]
    FullContent,
    SummarizeJson,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::FullContent => "full_content",
            Strategy::SummarizeJson => "summarize_json",
        }
    }
}

impl From<&str> for Strategy {
    fn from(name: &str) -> Self {
        match name {
            "full_content" => Strategy::FullContent,
            "summarize_json" => Strategy::SummarizeJson,
            other => {
                log::debug!("Unknown strategy '{}', using full_content", other);
                Strategy::FullContent
            }
        }
    }
}

impl From<String> for Strategy {
    fn from(name: String) -> Self {
        Strategy::from(name.as_str())
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.name().to_string()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filename and extension rules mapping files to a strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationRules {
    pub default_strategy: Strategy,
    pub by_filename: BTreeMap<String, Strategy>,
    pub by_extension: BTreeMap<String, Strategy>,
}

/// Immutable snapshot of everything the walker needs. Built once per run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub text_extensions: HashSet<String>,
    pub included_hidden_filenames: HashSet<String>,
    pub ignored_folders: HashSet<String>,
    pub ignored_filenames: HashSet<String>,
    pub ignored_extensions: HashSet<String>,
    pub summarization_rules: SummarizationRules,
    pub guide: String,
    /// Globs matched against the path relative to the scanned root.
    pub exclude: GlobSet,
    pub respect_gitignore: bool,
}

/// Represents the final configuration after merging the config file and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub scan: ScanConfig,
    pub output_path: PathBuf,
    pub to_stdout: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File { extension: String },
}

/// A single filesystem item discovered while listing a directory.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict {
    Ignored,
    Binary,
    TextContent(String),
    SummaryJson(String),
    Error(String),
}

/// `.` followed by the lowercased final extension, or an empty string.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
