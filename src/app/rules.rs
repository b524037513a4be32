use crate::app::models::{DirectoryEntry, EntryKind, ScanConfig};

/// What the walker should do with an entry before reading anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Produce no output at all.
    Skip,
    /// Emit the directory name and descend.
    Descend,
    /// Emit the file name with an `[IGNORED]` tag.
    Ignored,
    /// Emit the file name with a `[BINARY]` tag.
    Binary,
    /// Read the file and run it through a strategy.
    Text,
}

/// Classifies `entry` using only its name, extension and relative path.
///
/// Hidden directories are always skipped: the hidden allow-list only names files.
pub fn classify(entry: &DirectoryEntry, config: &ScanConfig) -> Disposition {
    let hidden = entry.name.starts_with('.');
    if hidden && (entry.is_dir() || !config.included_hidden_filenames.contains(&entry.name)) {
        return Disposition::Skip;
    }
    if config.exclude.is_match(&entry.relative_path) {
        return Disposition::Skip;
    }

    match entry.kind {
        EntryKind::Directory if config.ignored_folders.contains(&entry.name) => Disposition::Skip,
        EntryKind::Directory => Disposition::Descend,
        EntryKind::File { .. } => file_disposition(entry, config),
    }
}

/// Ignore rules first, then the text/binary split by extension.
pub fn file_disposition(entry: &DirectoryEntry, config: &ScanConfig) -> Disposition {
    let extension = match &entry.kind {
        EntryKind::File { extension } => extension.as_str(),
        EntryKind::Directory => "",
    };
    if config.ignored_filenames.contains(&entry.name)
        || config.ignored_extensions.contains(extension)
        || entry.name.contains(".min.")
    {
        Disposition::Ignored
    } else if config.text_extensions.contains(extension) {
        Disposition::Text
    } else {
        Disposition::Binary
    }
}
