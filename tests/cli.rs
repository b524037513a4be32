use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn setup_project() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");

    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules/left-pad")).unwrap();
    fs::write(root.join("node_modules/left-pad/index.js"), "module.exports = 1;").unwrap();
    fs::write(
        root.join("package.json"),
        r#"{"name":"x","version":"1.0.0","private":true}"#,
    )
    .unwrap();
    fs::write(root.join("package-lock.json"), "{}").unwrap();
    fs::write(root.join(".env"), "TOKEN=secret").unwrap();
    fs::write(root.join(".env.example"), "TOKEN=\n").unwrap();
    fs::write(
        root.join("src/app.py"),
        "#!/usr/bin/env python\n# comment\nx = 1  # trailing\n",
    )
    .unwrap();
    fs::write(root.join("src/app.min.js"), "var a=1;").unwrap();

    dir
}

fn tree_prompt(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tree_prompt").unwrap();
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("config.json"));
    cmd
}

#[test]
fn prints_compact_tree_to_stdout() {
    let dir = setup_project();

    tree_prompt(&dir)
        .arg("--stdout")
        .arg(dir.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::contains("token-efficient representation"))
        .stdout(predicate::str::contains("---[ROOT_DIRECTORY: "))
        .stdout(predicate::str::contains(
            "package.json\n  [SUMMARY_JSON] {\"name\":\"x\",\"version\":\"1.0.0\"}",
        ))
        .stdout(predicate::str::contains("package-lock.json\n  [IGNORED]"))
        .stdout(predicate::str::contains("  app.min.js\n    [IGNORED]"))
        .stdout(predicate::str::contains(
            "  app.py\n    ---[FILE_CONTENT]---\n#!/usr/bin/env python\n\nx = 1\n    ---[FILE_CONTENT]---",
        ))
        .stdout(predicate::str::contains(".env.example\n  ---[FILE_CONTENT]---\nTOKEN=\n"))
        .stdout(predicate::str::contains("secret").not())
        .stdout(predicate::str::contains("node_modules").not());
}

#[test]
fn creates_default_config_when_missing() {
    let dir = setup_project();

    tree_prompt(&dir)
        .arg("--stdout")
        .arg(dir.path().join("project"))
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(written.contains("\"default_strategy\": \"full_content\""));
    assert!(written.contains("\"package-lock.json\""));
}

#[test]
fn writes_output_file() {
    let dir = setup_project();
    let out_dir = dir.path().join("results");

    tree_prompt(&dir)
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--output-filename")
        .arg("context.txt")
        .arg(dir.path().join("project"))
        .assert()
        .success();

    let output = fs::read_to_string(out_dir.join("context.txt")).unwrap();
    assert!(output.contains("\n---\n\n---[ROOT_DIRECTORY: "));
    assert!(output.contains("src/\n"));
}

#[test]
fn multiple_roots_are_separated_by_blank_lines() {
    let dir = setup_project();
    let single = dir.path().join("project/src/app.py");

    tree_prompt(&dir)
        .arg("--stdout")
        .arg(dir.path().join("project"))
        .arg(&single)
        .assert()
        .success()
        .stdout(predicate::str::contains("\n\n---[FILE: "))
        .stdout(predicate::str::contains("app.py]---\napp.py\n  ---[FILE_CONTENT]---"));
}

#[test]
fn custom_config_rules_apply() {
    let dir = setup_project();
    fs::write(
        dir.path().join("config.json"),
        r#"{
            "llm_interpretation_guide": "GUIDE",
            "ignored_folders": [],
            "summarization_rules": {"by_extension": {".js": "summarize_json"}}
        }"#,
    )
    .unwrap();

    tree_prompt(&dir)
        .arg("--stdout")
        .arg("--exclude")
        .arg("src")
        .arg("--")
        .arg(dir.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("GUIDE\n---\n\n"))
        .stdout(predicate::str::contains("node_modules/\n  left-pad/\n    index.js"))
        .stdout(predicate::str::contains("app.py").not())
        .stdout(predicate::str::contains("package.json\n  ---[FILE_CONTENT]---"));
}

#[test]
fn fails_without_valid_paths() {
    let dir = setup_project();

    tree_prompt(&dir)
        .arg("--stdout")
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid directory or file to scan"));
}
