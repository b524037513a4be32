use crate::app::models::FileVerdict;
use crate::app::strategy::full_content;
use serde_json::{Map, Value};

const PACKAGE_KEYS: [&str; 5] = ["name", "version", "dependencies", "devDependencies", "scripts"];
const TSCONFIG_KEYS: [&str; 3] = ["references", "include", "exclude"];

/// Produces a compact `SummaryJson` verdict. Known config files are reduced
/// to a fixed key set; any other file passes through as parsed.
///
/// Malformed JSON, or a known file that yields no keys, falls back to full
/// content processing as `.json`.
pub fn summarize(content: &str, filename: &str) -> FileVerdict {
    let data: Value = match serde_json::from_str(content) {
        Ok(data) => data,
        Err(e) => {
            log::debug!("{} is not valid JSON ({}), emitting full content", filename, e);
            return full_content(content, ".json");
        }
    };

    let summary = match filename {
        "package.json" => pick(PACKAGE_KEYS.iter().map(|&key| (key, data.get(key)))),
        "jsconfig.json" | "tsconfig.json" => {
            let paths = data
                .get("compilerOptions")
                .and_then(|opts| opts.get("paths"));
            let rest = TSCONFIG_KEYS.iter().map(|&key| (key, data.get(key)));
            pick(std::iter::once(("compilerOptions_paths", paths)).chain(rest))
        }
        _ => return compact(&data),
    };

    if summary.is_empty() {
        return full_content(content, ".json");
    }
    compact(&Value::Object(summary))
}

fn compact(value: &Value) -> FileVerdict {
    match serde_json::to_string(value) {
        Ok(json) => FileVerdict::SummaryJson(json),
        Err(e) => FileVerdict::Error(e.to_string()),
    }
}

/// Builds an object from the given fields, skipping missing and null values.
fn pick<'a, I>(fields: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a str, Option<&'a Value>)>,
{
    let mut out = Map::new();
    for (key, value) in fields {
        match value {
            Some(Value::Null) | None => {}
            Some(v) => {
                out.insert(key.to_string(), v.clone());
            }
        }
    }
    out
}
