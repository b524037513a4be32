use crate::app::models::FileVerdict;
use std::fmt::Display;
use std::path::Path;

pub const FILE_CONTENT_MARKER: &str = "---[FILE_CONTENT]---";

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn indent(depth: usize) -> String {
        "  ".repeat(depth)
    }

    pub fn directory_line(name: &str, depth: usize) -> String {
        format!("{}{}/", Self::indent(depth), name)
    }

    pub fn directory_error(path: &Path, err: &impl Display, depth: usize) -> String {
        format!(
            "{}[ERROR] Could not read directory {}: {}",
            Self::indent(depth),
            path.display(),
            err
        )
    }

    /// The filename line followed by its tag block one level deeper.
    /// Processed content itself is emitted without indentation.
    pub fn file_lines(name: &str, verdict: &FileVerdict, depth: usize) -> Vec<String> {
        let child = Self::indent(depth + 1);
        let mut lines = vec![format!("{}{}", Self::indent(depth), name)];

        match verdict {
            FileVerdict::Ignored => lines.push(format!("{}[IGNORED]", child)),
            FileVerdict::Binary => lines.push(format!("{}[BINARY]", child)),
            FileVerdict::SummaryJson(json) => lines.push(format!("{}[SUMMARY_JSON] {}", child, json)),
            FileVerdict::Error(message) => lines.push(format!("{}[ERROR] {}", child, message)),
            FileVerdict::TextContent(content) => {
                lines.push(format!("{}{}", child, FILE_CONTENT_MARKER));
                lines.push(content.clone());
                lines.push(format!("{}{}", child, FILE_CONTENT_MARKER));
            }
        }
        lines
    }

    pub fn root_header(path: &Path, is_dir: bool) -> String {
        if is_dir {
            format!("---[ROOT_DIRECTORY: {}]---", path.display())
        } else {
            format!("---[FILE: {}]---", path.display())
        }
    }

    /// Guide text, a `---` separator, then each root section separated by a
    /// blank line.
    pub fn format_document(guide: &str, sections: &[Vec<String>]) -> String {
        let body = sections
            .iter()
            .map(|section| section.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut out = String::from(guide);
        out.push_str("\n---\n\n");
        out.push_str(&body);
        out
    }
}
