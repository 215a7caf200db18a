use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn triport() -> Command {
    Command::cargo_bin("triport").unwrap()
}

const FIXTURE: &str = "tests/fixtures/settings.js";

/// A legacy file: eight parser flags (no verifyURISyntax), otherwise clean.
fn legacy_file(dir: &TempDir) -> std::path::PathBuf {
    let content = std::fs::read_to_string(FIXTURE)
        .unwrap()
        .replace("        \"verifyURISyntax\" : true,\n", "");
    let path = dir.path().join("settings.js");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_check_clean_fixture_succeeds() {
    triport()
        .arg("check")
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"))
        .stdout(predicate::str::contains("2 records"));
}

#[test]
fn test_check_json_format_produces_valid_json() {
    let output = triport()
        .arg("check")
        .arg(FIXTURE)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["records_checked"], 2);
    assert_eq!(json["summary"]["errors"], 0);
    assert_eq!(json["summary"]["warnings"], 0);
    assert!(json["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn test_check_text_is_default() {
    triport()
        .arg("check")
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"records_checked\"").not());
}

#[test]
fn test_check_legacy_eight_flag_file_warns_but_passes() {
    let temp = TempDir::new().unwrap();
    let path = legacy_file(&temp);

    triport()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"))
        .stdout(predicate::str::contains("verifyURISyntax"));
}

#[test]
fn test_check_strict_turns_warnings_into_failure() {
    let temp = TempDir::new().unwrap();
    let path = legacy_file(&temp);

    triport()
        .arg("check")
        .arg(&path)
        .arg("--strict")
        .assert()
        .failure();
}

#[test]
fn test_check_severity_error_silences_warnings() {
    let temp = TempDir::new().unwrap();
    let path = legacy_file(&temp);
    let config_path = temp.path().join("triport.toml");
    std::fs::write(&config_path, "severity = \"Error\"\n\n[rules]\n").unwrap();

    // The legacy file only warns, so raising the threshold to errors
    // leaves nothing to report and --strict has nothing to fail on.
    triport()
        .arg("check")
        .arg(&path)
        .arg("--config")
        .arg(&config_path)
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_check_broken_record_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.js");
    std::fs::write(
        &path,
        r#"{ "import.local": { "no-separator-key": { "name": "x.ttl" } } }"#,
    )
    .unwrap();

    triport()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Malformed composite key"));
}

#[test]
fn test_check_missing_file_reports_error() {
    let temp = TempDir::new().unwrap();

    triport()
        .arg("check")
        .arg(temp.path().join("absent.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_list_sorted_oldest_first() {
    let output = triport().arg("list").arg(FIXTURE).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let books = stdout.find("LIBRARY;;books.ttl").unwrap();
    let authors = stdout.find("LIBRARY;;authors.ttl").unwrap();
    assert!(books < authors, "older import must come first");
}

#[test]
fn test_list_json_format() {
    let output = triport()
        .arg("list")
        .arg(FIXTURE)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = json.as_array().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["key"], "LIBRARY;;books.ttl");
    assert_eq!(entries[0]["status"], "DONE");
    assert_eq!(entries[1]["key"], "LIBRARY;;authors.ttl");
}

#[test]
fn test_show_prints_record_json() {
    let output = triport()
        .arg("show")
        .arg(FIXTURE)
        .arg("LIBRARY;;books.ttl")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["name"], "books.ttl");
    assert_eq!(json["baseURI"], "http://library.example/graph/books");
    assert_eq!(json["parserSettings"]["stopOnError"], true);
}

#[test]
fn test_show_unknown_key_fails() {
    triport()
        .arg("show")
        .arg(FIXTURE)
        .arg("LIBRARY;;missing.ttl")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No import record under key 'LIBRARY;;missing.ttl'",
        ));
}

#[test]
fn test_show_malformed_key_fails() {
    triport()
        .arg("show")
        .arg(FIXTURE)
        .arg("not-a-composite-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains(";;"));
}

#[test]
fn test_init_creates_checkable_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.js");

    triport().arg("init").arg(&path).assert().success();

    triport()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_init_refuses_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.js");
    std::fs::write(&path, "{}").unwrap();

    triport()
        .arg("init")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));
}

#[test]
fn test_touch_records_an_import() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.js");

    triport()
        .arg("touch")
        .arg(&path)
        .arg("LIBRARY;;books.ttl")
        .arg("--context")
        .arg("http://library.example/graph/books")
        .arg("--data")
        .arg("4f8f1c6e-62a3-4b0e-9c25-6a1a6c59f1c2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded import"));

    // The written file is clean and carries the record
    triport()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));

    let output = triport()
        .arg("show")
        .arg(&path)
        .arg("LIBRARY;;books.ttl")
        .output()
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(json["status"], "DONE");
    assert_eq!(json["name"], "books.ttl");
    // baseURI defaults to context
    assert_eq!(json["baseURI"], "http://library.example/graph/books");
}

#[test]
fn test_touch_replaces_existing_record() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.js");
    std::fs::copy(FIXTURE, &path).unwrap();

    triport()
        .arg("touch")
        .arg(&path)
        .arg("LIBRARY;;books.ttl")
        .arg("--context")
        .arg("http://library.example/graph/books")
        .arg("--status")
        .arg("ERROR")
        .arg("--message")
        .arg("RDF Parse Error: unexpected end of file")
        .assert()
        .success();

    let output = triport()
        .arg("show")
        .arg(&path)
        .arg("LIBRARY;;books.ttl")
        .output()
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(json["status"], "ERROR");
    assert_eq!(json["message"], "RDF Parse Error: unexpected end of file");
}

#[test]
fn test_touch_preserves_unknown_keys() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.js");
    std::fs::write(
        &path,
        r#"{ "properties": {}, "import.local": {}, "import.server": { "k": 1 } }"#,
    )
    .unwrap();

    triport()
        .arg("touch")
        .arg(&path)
        .arg("LIBRARY;;books.ttl")
        .arg("--context")
        .arg("http://library.example/graph/books")
        .assert()
        .success();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["import.server"]["k"], 1);
    assert!(raw["import.local"]["LIBRARY;;books.ttl"].is_object());
}

#[test]
fn test_forget_removes_record() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.js");
    std::fs::copy(FIXTURE, &path).unwrap();

    triport()
        .arg("forget")
        .arg(&path)
        .arg("LIBRARY;;books.ttl")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    triport()
        .arg("show")
        .arg(&path)
        .arg("LIBRARY;;books.ttl")
        .assert()
        .failure();

    // Forgetting again fails
    triport()
        .arg("forget")
        .arg(&path)
        .arg("LIBRARY;;books.ttl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No import record under key"));
}

#[test]
fn test_verbose_check_shows_rules_and_help() {
    let temp = TempDir::new().unwrap();
    let path = legacy_file(&temp);

    triport()
        .arg("check")
        .arg(&path)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("PS-001"))
        .stdout(predicate::str::contains("help:"));
}
