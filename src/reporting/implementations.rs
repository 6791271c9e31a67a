// 報告の具象実装群

use super::traits::{FileReporter, Reporter};
use crate::core::{
    FieldParseError, FileError, FileFormat, FileStats, Item, Maxima, NumericField, RecordError,
    RunSummary,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, Span};

/// tracingによる構造化ログ出力の実装
#[derive(Debug, Default, Clone)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for TracingReporter {
    type File = TracingFileReporter;

    fn run_started(&self, file_count: usize) {
        info!(file_count, "start program");
    }

    fn run_finished(&self, summary: &RunSummary) {
        info!(
            completed = summary.completed,
            failed = summary.failed,
            unsupported = summary.unsupported,
            "end program"
        );
    }

    fn unsupported_file(&self, path: &Path) {
        debug!(file = %path.display(), "skip file with unsupported extension");
    }

    fn for_file(&self, path: &Path, format: FileFormat) -> TracingFileReporter {
        TracingFileReporter {
            span: tracing::info_span!("process_file", file = %path.display(), format = %format),
        }
    }
}

/// ファイル名とフォーマットをspanに持つファイル単位のレポーター
#[derive(Debug)]
pub struct TracingFileReporter {
    span: Span,
}

fn conversion_message(field: NumericField) -> &'static str {
    match field {
        NumericField::Price => "fail to convert price of product",
        NumericField::Rating => "fail to convert rating of product",
    }
}

fn record_message(error: &RecordError) -> &'static str {
    match error {
        RecordError::CsvRow { .. } => "fail to read line",
        RecordError::JsonElement { .. } => "fail to decode line",
        RecordError::Field(field_error) => conversion_message(field_error.field),
    }
}

fn emit_item(message: &str, item: Option<&Item>) {
    match item {
        Some(item) => info!(
            product = %item.product,
            price = item.price,
            rating = item.rating,
            "{message}"
        ),
        None => info!(item = "none", "{message}"),
    }
}

impl FileReporter for TracingFileReporter {
    fn file_started(&self) {
        let _entered = self.span.enter();
        info!("start process file");
    }

    fn record_skipped(&self, record_error: &RecordError) {
        let _entered = self.span.enter();
        error!(error = %record_error, skipped = true, "{}", record_message(record_error));
    }

    fn field_zero_filled(&self, field_error: &FieldParseError) {
        let _entered = self.span.enter();
        error!(
            error = %field_error,
            value = %field_error.value,
            "{}",
            conversion_message(field_error.field)
        );
    }

    fn file_failed(&self, file_error: &FileError) {
        let _entered = self.span.enter();
        let message = match file_error {
            FileError::Open { .. } => "fail to open file",
            FileError::Read { .. } | FileError::Framing { .. } | FileError::CsvStream { .. } => {
                "fail to read file"
            }
            FileError::Aborted { .. } => "abort process file",
        };
        error!(error = %file_error, "{message}");
    }

    fn maxima(&self, maxima: &Maxima) {
        let _entered = self.span.enter();
        emit_item("highest priced product", maxima.highest_priced.as_ref());
        emit_item("top rated product", maxima.top_rated.as_ref());
    }

    fn file_finished(&self, stats: &FileStats) {
        let _entered = self.span.enter();
        info!(
            records = stats.records,
            skipped = stats.skipped,
            zero_filled = stats.zero_filled,
            ignored = stats.ignored,
            "end process file"
        );
    }
}

/// 何もしない報告実装（ベンチマーク用）
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for NoOpReporter {
    type File = NoOpReporter;

    fn run_started(&self, _file_count: usize) {}

    fn run_finished(&self, _summary: &RunSummary) {}

    fn unsupported_file(&self, _path: &Path) {}

    fn for_file(&self, _path: &Path, _format: FileFormat) -> NoOpReporter {
        Self
    }
}

impl FileReporter for NoOpReporter {
    fn file_started(&self) {}

    fn record_skipped(&self, _error: &RecordError) {}

    fn field_zero_filled(&self, _error: &FieldParseError) {}

    fn file_failed(&self, _error: &FileError) {}

    fn maxima(&self, _maxima: &Maxima) {}

    fn file_finished(&self, _stats: &FileStats) {}
}

/// 記録された報告イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    RunStarted { file_count: usize },
    RunFinished { summary: RunSummary },
    Unsupported { path: PathBuf },
    FileStarted { path: PathBuf, format: FileFormat },
    RecordSkipped { path: PathBuf, message: String },
    ZeroFilled { path: PathBuf, field: NumericField, value: String },
    FileFailed { path: PathBuf, message: String },
    Maxima { path: PathBuf, maxima: Maxima },
    FileFinished { path: PathBuf, stats: FileStats },
}

/// メモリ内に報告を記録する実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ReportEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, event: ReportEvent) {
        self.lock().push(event);
    }

    /// テスト用：記録されたイベントを取得
    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// テスト用：指定ファイルについて報告された最大値
    pub fn maxima_for(&self, path: &Path) -> Option<Maxima> {
        self.lock().iter().find_map(|event| match event {
            ReportEvent::Maxima { path: reported, maxima } if reported == path => {
                Some(maxima.clone())
            }
            _ => None,
        })
    }

    /// テスト用：報告された最大値の件数
    pub fn maxima_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|event| matches!(event, ReportEvent::Maxima { .. }))
            .count()
    }

    /// テスト用：データクリア
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Reporter for MemoryReporter {
    type File = MemoryFileReporter;

    fn run_started(&self, file_count: usize) {
        self.push(ReportEvent::RunStarted { file_count });
    }

    fn run_finished(&self, summary: &RunSummary) {
        self.push(ReportEvent::RunFinished { summary: *summary });
    }

    fn unsupported_file(&self, path: &Path) {
        self.push(ReportEvent::Unsupported {
            path: path.to_path_buf(),
        });
    }

    fn for_file(&self, path: &Path, format: FileFormat) -> MemoryFileReporter {
        MemoryFileReporter {
            parent: self.clone(),
            path: path.to_path_buf(),
            format,
        }
    }
}

/// MemoryReporterのファイル単位レポーター
#[derive(Debug, Clone)]
pub struct MemoryFileReporter {
    parent: MemoryReporter,
    path: PathBuf,
    format: FileFormat,
}

impl FileReporter for MemoryFileReporter {
    fn file_started(&self) {
        self.parent.push(ReportEvent::FileStarted {
            path: self.path.clone(),
            format: self.format,
        });
    }

    fn record_skipped(&self, error: &RecordError) {
        self.parent.push(ReportEvent::RecordSkipped {
            path: self.path.clone(),
            message: error.to_string(),
        });
    }

    fn field_zero_filled(&self, error: &FieldParseError) {
        self.parent.push(ReportEvent::ZeroFilled {
            path: self.path.clone(),
            field: error.field,
            value: error.value.clone(),
        });
    }

    fn file_failed(&self, error: &FileError) {
        self.parent.push(ReportEvent::FileFailed {
            path: self.path.clone(),
            message: error.to_string(),
        });
    }

    fn maxima(&self, maxima: &Maxima) {
        self.parent.push(ReportEvent::Maxima {
            path: self.path.clone(),
            maxima: maxima.clone(),
        });
    }

    fn file_finished(&self, stats: &FileStats) {
        self.parent.push(ReportEvent::FileFinished {
            path: self.path.clone(),
            stats: *stats,
        });
    }
}
