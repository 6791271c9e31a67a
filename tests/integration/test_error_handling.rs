// エラーハンドリングの統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use catalog_max::{
    config::ProcessingOptions,
    core::{FileError, Item, Maxima, NumericField, ParseErrorPolicy, RecordError, RecoveryPolicy},
    dispatch::{process_file, FileStatus},
    reporting::{MemoryReporter, ReportEvent},
    App,
};
use fixtures::*;

const JSON_WITH_BAD_ELEMENT: &str = r#"[
    {"Product":"Early","Price":500,"Rating":500},
    {"Product":"Broken","Price":"expensive","Rating":1},
    {"Product":"Late","Price":1,"Rating":2}
]"#;

fn process(path: &std::path::Path, options: ProcessingOptions) -> (FileStatus, MemoryReporter) {
    let reporter = MemoryReporter::new();
    let status = process_file(path, &options, &reporter);
    (status, reporter)
}

fn skipped_count(reporter: &MemoryReporter) -> usize {
    reporter
        .events()
        .iter()
        .filter(|event| matches!(event, ReportEvent::RecordSkipped { .. }))
        .count()
}

#[test]
fn test_json_bad_element_discards_the_file_by_default() {
    let catalog = CatalogDir::new();
    let path = catalog.write("bad.json", JSON_WITH_BAD_ELEMENT);

    let (status, reporter) = process(&path, ProcessingOptions::default());

    match status {
        FileStatus::Failed(FileError::Aborted { source }) => {
            assert!(matches!(source, RecordError::JsonElement { index: 1, .. }))
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert_eq!(reporter.maxima_count(), 0);
}

#[test]
fn test_json_bad_element_is_skipped_when_configured() {
    let catalog = CatalogDir::new();
    let path = catalog.write("bad.json", JSON_WITH_BAD_ELEMENT);
    let options = ProcessingOptions::default().with_json_recovery(RecoveryPolicy::SkipOnError);

    let (status, reporter) = process(&path, options);

    let outcome = status.outcome().unwrap();
    assert_eq!(outcome.stats.records, 2);
    assert_eq!(outcome.stats.skipped, 1);
    assert_eq!(skipped_count(&reporter), 1);
    assert_eq!(
        reporter.maxima_for(&path).unwrap().highest_priced,
        Some(Item::new("Early", 500, 500))
    );
}

#[test]
fn test_json_framing_errors_are_fatal_under_any_policy() {
    let catalog = CatalogDir::new();
    let cases = [
        ("object.json", r#"{"Product":"A","Price":1,"Rating":1}"#),
        ("unclosed.json", r#"[{"Product":"A","Price":1,"Rating":1}"#),
        ("trailing.json", r#"[{"Product":"A","Price":1,"Rating":1},]"#),
        ("empty.json", ""),
    ];

    for (name, contents) in cases {
        let path = catalog.write(name, contents);
        let options = ProcessingOptions::default().with_json_recovery(RecoveryPolicy::SkipOnError);

        let (status, reporter) = process(&path, options);

        assert!(
            matches!(status, FileStatus::Failed(_)),
            "{name} should fail, got {status:?}"
        );
        assert_eq!(reporter.maxima_count(), 0, "{name} must not report maxima");
    }
}

#[test]
fn test_csv_parse_failure_is_zero_filled_by_default() {
    let catalog = CatalogDir::new();
    let path = catalog.write("prices.csv", "Broken,n/a,8\nCheap,-5,1\n");

    let (status, reporter) = process(&path, ProcessingOptions::default());

    let outcome = status.outcome().unwrap();
    assert_eq!(outcome.stats.records, 2);
    assert_eq!(outcome.stats.zero_filled, 1);

    let maxima = reporter.maxima_for(&path).unwrap();
    assert_eq!(maxima.highest_priced, Some(Item::new("Broken", 0, 8)));
    assert_eq!(maxima.top_rated, Some(Item::new("Broken", 0, 8)));
    assert!(reporter.events().contains(&ReportEvent::ZeroFilled {
        path: path.clone(),
        field: NumericField::Price,
        value: "n/a".to_string(),
    }));
}

#[test]
fn test_csv_parse_failure_skips_row_when_configured() {
    let catalog = CatalogDir::new();
    let path = catalog.write("prices.csv", "Broken,n/a,8\nCheap,-5,1\n");
    let options = ProcessingOptions::default().with_parse_error_policy(ParseErrorPolicy::SkipRow);

    let (status, reporter) = process(&path, options);

    let outcome = status.outcome().unwrap();
    assert_eq!(outcome.stats.records, 1);
    assert_eq!(outcome.stats.skipped, 1);
    assert_eq!(
        reporter.maxima_for(&path).unwrap().highest_priced,
        Some(Item::new("Cheap", -5, 1))
    );
}

#[test]
fn test_csv_parse_failure_aborts_with_skip_row_and_abort_policy() {
    let catalog = CatalogDir::new();
    let path = catalog.write("prices.csv", "Cheap,5,1\nBroken,n/a,8\n");
    let options = ProcessingOptions::default()
        .with_parse_error_policy(ParseErrorPolicy::SkipRow)
        .with_csv_recovery(RecoveryPolicy::AbortOnError);

    let (status, reporter) = process(&path, options);

    assert!(matches!(
        status,
        FileStatus::Failed(FileError::Aborted {
            source: RecordError::Field(_)
        })
    ));
    assert_eq!(reporter.maxima_count(), 0);
}

#[test]
fn test_csv_row_with_invalid_utf8_still_counts() {
    let catalog = CatalogDir::new();
    let path = catalog.write("encoding.csv", b"Good,1,1\nCaf\xe9,900,900\nBetter,2,2\n");

    let (status, reporter) = process(&path, ProcessingOptions::default());

    let outcome = status.outcome().unwrap();
    assert_eq!(outcome.stats.records, 3);
    assert_eq!(outcome.stats.skipped, 0);
    assert_eq!(skipped_count(&reporter), 0);
    assert_eq!(
        reporter.maxima_for(&path).unwrap().highest_priced,
        Some(Item::new("Caf\u{FFFD}", 900, 900))
    );
}

#[test]
fn test_json_element_with_invalid_utf8_does_not_abort() {
    let catalog = CatalogDir::new();
    let path = catalog.write(
        "encoding.json",
        b"[{\"Product\":\"Caf\xe9\",\"Price\":900,\"Rating\":1},{\"Product\":\"B\",\"Price\":3,\"Rating\":9}]",
    );

    let (status, reporter) = process(&path, ProcessingOptions::default());

    assert!(status.is_completed());
    assert_eq!(
        reporter.maxima_for(&path),
        Some(Maxima {
            highest_priced: Some(Item::new("Caf\u{FFFD}", 900, 1)),
            top_rated: Some(Item::new("B", 3, 9)),
        })
    );
}

#[test]
fn test_open_failure_is_reported_and_run_continues() {
    let catalog = CatalogDir::new();
    let missing = catalog.path().join("missing.json");
    let good = catalog.write("good.csv", SAMPLE_CSV);

    let app = App::new(ProcessingOptions::default(), MemoryReporter::new());
    let summary = app.run(&[&missing, &good]);

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.completed, 1);

    let failures: Vec<String> = app
        .reporter()
        .events()
        .into_iter()
        .filter_map(|event| match event {
            ReportEvent::FileFailed { path, message } if path == missing => Some(message),
            _ => None,
        })
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("missing.json"));
    assert!(app.reporter().maxima_for(&good).is_some());
}
