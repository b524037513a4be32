/// Collapses blank-line runs to a single blank line and trims trailing
/// whitespace. Blank lines at the very start and end are dropped, which keeps
/// the result stable when it is processed again.
pub fn normalize<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();

    for line in lines {
        let line = line.trim_end();
        if line.trim().is_empty() {
            if out.last().map_or(true, |prev| prev.is_empty()) {
                continue;
            }
            out.push(String::new());
        } else {
            out.push(line.to_string());
        }
    }

    if out.last().is_some_and(|last| last.is_empty()) {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_blank_runs() {
        let lines = ["a", "", "", "", "b", "  ", "\t", "c"];
        assert_eq!(normalize(lines), vec!["a", "", "b", "", "c"]);
    }

    #[test]
    fn trims_trailing_whitespace() {
        assert_eq!(
            normalize(["fn x() {   ", "  y();\t", "}"]),
            vec!["fn x() {", "  y();", "}"]
        );
    }

    #[test]
    fn drops_leading_and_trailing_blanks() {
        assert_eq!(normalize(["", "  ", "a", "", ""]), vec!["a"]);
        assert!(normalize(["", " "]).is_empty());
    }
}
