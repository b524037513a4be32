use crate::app::formatter::OutputGenerator;
use crate::app::models::{extension_of, DirectoryEntry, EntryKind, FileVerdict, ScanConfig};
use crate::app::rules::{classify, file_disposition, Disposition};
use crate::app::strategy::resolve_strategy;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use pathdiff::diff_paths;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a ScanConfig,
    gitignore: Option<Gitignore>,
}

impl<'a> Scanner<'a> {
    pub fn new(root: PathBuf, config: &'a ScanConfig) -> Self {
        let gitignore = if config.respect_gitignore {
            load_gitignore(&root)
        } else {
            None
        };
        Self {
            root,
            config,
            gitignore,
        }
    }

    /// Renders `dir` depth-first: directories before files, each group sorted
    /// case-insensitively. A directory that cannot be listed becomes a single
    /// `[ERROR]` line and is not descended.
    pub fn walk(&self, dir: &Path, depth: usize) -> Vec<String> {
        self.walk_dir(dir, depth, &mut Vec::new())
    }

    /// `ancestors` holds the canonical paths of the directories being walked,
    /// so a symlink back to one of them is reported instead of followed.
    fn walk_dir(&self, dir: &Path, depth: usize, ancestors: &mut Vec<PathBuf>) -> Vec<String> {
        let entries = match self.list_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Could not read directory {}: {}", dir.display(), e);
                return vec![OutputGenerator::directory_error(dir, &e, depth)];
            }
        };

        let canonical = fs::canonicalize(dir).ok();
        if let Some(path) = &canonical {
            ancestors.push(path.clone());
        }
        let lines = self.render_entries(entries, depth, ancestors);
        if canonical.is_some() {
            ancestors.pop();
        }
        lines
    }

    fn render_entries(
        &self,
        entries: Vec<DirectoryEntry>,
        depth: usize,
        ancestors: &mut Vec<PathBuf>,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in entries {
            match classify(&entry, self.config) {
                Disposition::Skip => {}
                Disposition::Descend => {
                    lines.push(OutputGenerator::directory_line(&entry.name, depth));
                    if leads_to_ancestor(&entry.path, ancestors) {
                        log::warn!("Not following {}: it loops back to a parent", entry.path.display());
                        lines.push(OutputGenerator::directory_error(
                            &entry.path,
                            &"symlink loops back to a parent directory",
                            depth + 1,
                        ));
                    } else {
                        lines.extend(self.walk_dir(&entry.path, depth + 1, ancestors));
                    }
                }
                disposition => {
                    let verdict = self.verdict(&entry, disposition);
                    lines.extend(OutputGenerator::file_lines(&entry.name, &verdict, depth));
                }
            }
        }
        lines
    }

    /// Renders a single file passed directly as a scan root. Hidden and
    /// exclude rules do not apply to an explicitly named file.
    pub fn scan_file(&self, path: &Path) -> Vec<String> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let entry = DirectoryEntry {
            kind: EntryKind::File {
                extension: extension_of(&name),
            },
            relative_path: PathBuf::from(&name),
            path: path.to_path_buf(),
            name,
        };
        let verdict = self.verdict(&entry, file_disposition(&entry, self.config));
        OutputGenerator::file_lines(&entry.name, &verdict, 0)
    }

    fn list_entries(&self, dir: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut entries = Vec::new();

        for item in fs::read_dir(dir)? {
            let item = item?;
            let path = item.path();
            let name = item.file_name().to_string_lossy().to_string();

            // Follows symlinks; dangling links and special files are dropped.
            let Ok(metadata) = fs::metadata(&path) else {
                continue;
            };
            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else if metadata.is_file() {
                EntryKind::File {
                    extension: extension_of(&name),
                }
            } else {
                continue;
            };

            if self.is_gitignored(&path, kind == EntryKind::Directory) {
                continue;
            }

            let relative_path = diff_paths(&path, &self.root).unwrap_or_else(|| PathBuf::from(&name));
            entries.push(DirectoryEntry {
                name,
                path,
                relative_path,
                kind,
            });
        }

        sort_entries(&mut entries);
        Ok(entries)
    }

    fn is_gitignored(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore
            .as_ref()
            .is_some_and(|gi| gi.matched_path_or_any_parents(path, is_dir).is_ignore())
    }

    fn verdict(&self, entry: &DirectoryEntry, disposition: Disposition) -> FileVerdict {
        match disposition {
            Disposition::Ignored => FileVerdict::Ignored,
            Disposition::Text => self.process_text(entry),
            _ => FileVerdict::Binary,
        }
    }

    fn process_text(&self, entry: &DirectoryEntry) -> FileVerdict {
        let content = match fs::read(&entry.path) {
            Ok(bytes) => decode_lenient(&bytes),
            Err(e) => {
                log::warn!("Error reading or processing {}: {}", entry.path.display(), e);
                return FileVerdict::Error(e.to_string());
            }
        };

        let extension = match &entry.kind {
            EntryKind::File { extension } => extension.as_str(),
            EntryKind::Directory => "",
        };
        let strategy = resolve_strategy(&entry.name, extension, &self.config.summarization_rules);
        log::debug!("{} -> {}", entry.relative_path.display(), strategy);
        strategy.apply(&content, &entry.name, extension)
    }
}

/// Directories first, then case-insensitive name; the raw name breaks ties
/// between names that differ only in case.
fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by_cached_key(|e| (!e.is_dir(), e.name.to_lowercase(), e.name.clone()));
}

fn leads_to_ancestor(path: &Path, ancestors: &[PathBuf]) -> bool {
    fs::canonicalize(path).is_ok_and(|target| ancestors.contains(&target))
}

fn load_gitignore(root: &Path) -> Option<Gitignore> {
    let path = root.join(".gitignore");
    if !path.is_file() {
        return None;
    }
    let mut builder = GitignoreBuilder::new(root);
    if let Some(e) = builder.add(&path) {
        log::warn!("Problem reading {}: {}", path.display(), e);
    }
    match builder.build() {
        Ok(gitignore) => Some(gitignore),
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            None
        }
    }
}

/// UTF-8 decoding that drops invalid byte sequences instead of failing.
pub fn decode_lenient(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Renders one scan root with its header line.
pub fn scan_path(path: &Path, config: &ScanConfig) -> Vec<String> {
    let root = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let is_dir = root.is_dir();

    let mut lines = vec![OutputGenerator::root_header(&root, is_dir)];
    if is_dir {
        let scanner = Scanner::new(root.clone(), config);
        lines.extend(scanner.walk(&root, 0));
    } else {
        let parent = root.parent().map(Path::to_path_buf).unwrap_or_default();
        lines.extend(Scanner::new(parent, config).scan_file(&root));
    }
    lines
}
