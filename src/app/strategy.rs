use crate::app::comments;
use crate::app::models::{FileVerdict, Strategy, SummarizationRules};
use crate::app::summarizer;
use crate::app::whitespace;

/// Filename rules win over extension rules; anything else gets the default.
pub fn resolve_strategy(filename: &str, extension: &str, rules: &SummarizationRules) -> Strategy {
    rules
        .by_filename
        .get(filename)
        .or_else(|| rules.by_extension.get(extension))
        .copied()
        .unwrap_or(rules.default_strategy)
}

impl Strategy {
    pub fn apply(self, content: &str, filename: &str, extension: &str) -> FileVerdict {
        match self {
            Strategy::FullContent => full_content(content, extension),
            Strategy::SummarizeJson => summarizer::summarize(content, filename),
        }
    }
}

/// Comment stripping followed by blank-line normalization.
pub fn process_code_content(content: &str, extension: &str) -> String {
    let stripped = comments::strip(content, extension);
    whitespace::normalize(comments::split_lines(&stripped)).join("\n")
}

pub fn full_content(content: &str, extension: &str) -> FileVerdict {
    FileVerdict::TextContent(process_code_content(content, extension))
}
