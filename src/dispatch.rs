// ファイル単位の処理振り分け
//
// 拡張子からフォーマットを選び、ファイルを開いてリデューサーに渡す。
// 1ファイルの失敗は他のファイルの処理に影響しない。

use crate::config::ProcessingOptions;
use crate::core::{FileError, FileFormat, FileOutcome};
use crate::reducer::reduce;
use crate::reporting::{FileReporter, Reporter};
use crate::source::{CsvRowSource, JsonArraySource};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 1ファイルの処理結果
#[derive(Debug)]
pub enum FileStatus {
    /// 対応していない拡張子
    Unsupported,
    /// ファイル単位で致命的なエラー（結果は報告されない）
    Failed(FileError),
    Completed(FileOutcome),
}

impl FileStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn outcome(&self) -> Option<&FileOutcome> {
        match self {
            Self::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FileError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// 1ファイルを処理し、最大値を報告する
pub fn process_file<R: Reporter>(path: &Path, options: &ProcessingOptions, reporter: &R) -> FileStatus {
    let Some(format) = FileFormat::from_path(path) else {
        reporter.unsupported_file(path);
        return FileStatus::Unsupported;
    };

    let file_reporter = reporter.for_file(path, format);
    file_reporter.file_started();

    // ファイルハンドルはソースが所有し、どの経路でもここで閉じられる
    let result = File::open(path)
        .map_err(|source| FileError::open(path, source))
        .and_then(|file| process_reader(file, format, options, &file_reporter));

    match result {
        Ok(outcome) => {
            file_reporter.maxima(&outcome.maxima);
            file_reporter.file_finished(&outcome.stats);
            FileStatus::Completed(outcome)
        }
        Err(error) => {
            file_reporter.file_failed(&error);
            FileStatus::Failed(error)
        }
    }
}

/// 任意のリーダーを指定フォーマットとして読み、最大値を求める
pub fn process_reader<Rd, F>(
    reader: Rd,
    format: FileFormat,
    options: &ProcessingOptions,
    reporter: &F,
) -> Result<FileOutcome, FileError>
where
    Rd: Read,
    F: FileReporter + ?Sized,
{
    let policy = options.recovery_for(format);

    match format {
        FileFormat::Json => reduce(JsonArraySource::new(BufReader::new(reader)), policy, reporter),
        FileFormat::Csv => reduce(
            CsvRowSource::new(reader, options.on_parse_error()),
            policy,
            reporter,
        ),
    }
}
