//! Line-oriented comment removal for common language families.
//!
//! These are heuristics, not lexers. A `//` or `#` marker only counts as a
//! comment when the text before it on the same line holds an even number of
//! `'` and an even number of `"` characters. Escaped quotes are not understood.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static MARKUP_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]").unwrap()
});

/// Splits on every line boundary, including lone `\r`, form feed and the
/// Unicode separators. A trailing boundary does not yield an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

/// Comment grammar used for a file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `/* */` blocks, plus `//` line comments when `line_comments` is set.
    CStyle { line_comments: bool },
    /// `<!-- -->` blocks.
    Markup,
    /// `#` line comments. Python additionally tracks triple-quoted strings.
    Hash { triple_quoted_strings: bool },
    None,
}

impl CommentStyle {
    pub fn for_extension(ext: &str) -> Self {
        match ext {
            ".css" => CommentStyle::CStyle {
                line_comments: false,
            },
            ".js" | ".jsw" | ".c" | ".cpp" | ".java" | ".cs" | ".go" | ".rs" | ".swift" | ".kt"
            | ".scala" | ".h" | ".hpp" => CommentStyle::CStyle {
                line_comments: true,
            },
            ".xml" | ".html" => CommentStyle::Markup,
            ".py" => CommentStyle::Hash {
                triple_quoted_strings: true,
            },
            ".sh" | ".rb" | ".pl" | ".yml" | ".yaml" | ".ini" | ".cfg" | ".bat" => {
                CommentStyle::Hash {
                    triple_quoted_strings: false,
                }
            }
            _ => CommentStyle::None,
        }
    }
}

/// Removes comments from `content` according to the family of `extension`.
///
/// Whole-line `#` comments become empty lines so the normalizer can collapse
/// them. Lines the heuristics cannot handle pass through unchanged.
pub fn strip(content: &str, extension: &str) -> String {
    match CommentStyle::for_extension(extension) {
        CommentStyle::CStyle { line_comments } => {
            let without_blocks = BLOCK_COMMENT.replace_all(content, "");
            if line_comments {
                split_lines(&without_blocks)
                    .into_iter()
                    .map(strip_slash_comment)
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                without_blocks.into_owned()
            }
        }
        CommentStyle::Markup => MARKUP_COMMENT.replace_all(content, "").into_owned(),
        CommentStyle::Hash {
            triple_quoted_strings,
        } => strip_hash_comments(content, triple_quoted_strings),
        CommentStyle::None => content.to_string(),
    }
}

fn outside_quotes(before: &str) -> bool {
    before.matches('\'').count() % 2 == 0 && before.matches('"').count() % 2 == 0
}

fn strip_slash_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) if outside_quotes(&line[..idx]) => line[..idx].trim_end(),
        _ => line,
    }
}

fn strip_hash_comments(content: &str, triple_quoted_strings: bool) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_multiline_string = false;

    for (i, line) in split_lines(content).into_iter().enumerate() {
        if triple_quoted_strings {
            // Only one delimiter kind is considered per line; `"""` wins.
            let delimiter_count = if line.contains("\"\"\"") {
                line.matches("\"\"\"").count()
            } else {
                line.matches("'''").count()
            };
            if delimiter_count % 2 != 0 {
                in_multiline_string = !in_multiline_string;
            }
        }

        if in_multiline_string {
            out.push(line);
            continue;
        }

        let Some(idx) = line.find('#') else {
            out.push(line);
            continue;
        };
        if !outside_quotes(&line[..idx]) {
            out.push(line);
        } else if i == 0 && (line.starts_with("#!") || line.starts_with("::#")) {
            out.push(line.trim_end());
        } else if line.trim_start().starts_with('#') {
            out.push("");
        } else {
            out.push(line[..idx].trim_end());
        }
    }

    out.join("\n")
}
