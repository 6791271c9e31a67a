// main.rsとエントリーポイントのテスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::*;
use serde_json::Value;
use std::process::{Command, Output};

const ENV_KEYS: &[&str] = &[
    "APP_LOG_LEVEL",
    "APP_DB_FILE_NAMES",
    "APP_LOG_FORMAT",
    "APP_JSON_RECOVERY",
    "APP_CSV_RECOVERY",
    "APP_ON_PARSE_ERROR",
];

/// 環境変数と作業ディレクトリを固定してバイナリを起動する
fn command(catalog: &CatalogDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_catalog_max"));
    command.current_dir(catalog.path());
    for key in ENV_KEYS {
        command.env_remove(key);
    }
    command
}

fn json_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

fn find_message<'a>(lines: &'a [Value], message: &str) -> Vec<&'a Value> {
    lines
        .iter()
        .filter(|line| line["fields"]["message"] == message)
        .collect()
}

#[test]
fn test_cli_help() {
    let catalog = CatalogDir::new();
    let output = command(&catalog).arg("--help").output().expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--db-file-names"));
    assert!(stdout.contains("--log-level"));
    assert!(stdout.contains("--json-recovery"));
    assert!(stdout.contains("--on-parse-error"));
}

#[test]
fn test_cli_version() {
    let catalog = CatalogDir::new();
    let output = command(&catalog).arg("--version").output().expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_reports_maxima_as_json_lines() {
    let catalog = CatalogDir::new();
    let csv_path = catalog.write("catalog.csv", SAMPLE_CSV);

    let output = command(&catalog)
        .args(["--log-format", "json", "--db-file-names"])
        .arg(&csv_path)
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let lines = json_lines(&output);

    let priced = find_message(&lines, "highest priced product");
    assert_eq!(priced.len(), 1);
    assert_eq!(priced[0]["fields"]["product"], "Gadget");
    assert_eq!(priced[0]["fields"]["price"], 25);
    assert_eq!(priced[0]["fields"]["rating"], 2);
    assert_eq!(priced[0]["span"]["format"], "csv");

    let rated = find_message(&lines, "top rated product");
    assert_eq!(rated.len(), 1);
    assert_eq!(rated[0]["fields"]["product"], "Gizmo");
    assert_eq!(rated[0]["fields"]["rating"], 9);

    assert_eq!(find_message(&lines, "start program").len(), 1);
    assert_eq!(find_message(&lines, "end program").len(), 1);
}

#[test]
fn test_files_from_environment_in_order() {
    let catalog = CatalogDir::new();
    catalog.write("first.json", SAMPLE_JSON);
    catalog.write("second.csv", SAMPLE_CSV);
    catalog.write("ignored.txt", "Widget,1,1\n");

    let output = command(&catalog)
        .env("APP_DB_FILE_NAMES", "first.json,ignored.txt,second.csv")
        .env("APP_LOG_FORMAT", "json")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let lines = json_lines(&output);
    let products: Vec<&Value> = find_message(&lines, "highest priced product")
        .into_iter()
        .map(|line| &line["fields"]["product"])
        .collect();
    assert_eq!(products, vec!["A", "Gadget"]);
}

#[test]
fn test_per_file_errors_do_not_change_exit_status() {
    let catalog = CatalogDir::new();
    catalog.write("broken.json", "[{\"Product\":");

    let output = command(&catalog)
        .args(["--log-format", "json", "--db-file-names", "broken.json,missing.csv"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let lines = json_lines(&output);
    assert_eq!(find_message(&lines, "fail to read file").len(), 1);
    assert_eq!(find_message(&lines, "fail to open file").len(), 1);
    assert!(find_message(&lines, "highest priced product").is_empty());
}

#[test]
fn test_invalid_log_level_is_fatal() {
    let catalog = CatalogDir::new();
    let csv_path = catalog.write("catalog.csv", SAMPLE_CSV);

    let output = command(&catalog)
        .env("APP_LOG_LEVEL", "loud")
        .arg("--db-file-names")
        .arg(&csv_path)
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("highest priced product"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loud"));
}

#[test]
fn test_log_level_filters_info_entries() {
    let catalog = CatalogDir::new();
    let csv_path = catalog.write("catalog.csv", SAMPLE_CSV);

    let output = command(&catalog)
        .args(["--log-level", "error", "--db-file-names"])
        .arg(&csv_path)
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("highest priced product"));
}
