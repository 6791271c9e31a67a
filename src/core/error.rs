// Custom error types for catalog processing
// カタログ処理専用のカスタムエラー型定義

use super::types::NumericField;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// 起動時の設定エラー（処理開始前に致命的）
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid log level `{value}`: expected one of off, error, warn, info, debug, trace")]
    InvalidLogLevel { value: String },

    #[error("failed to install log subscriber: {message}")]
    Subscriber { message: String },
}

/// 数値カラムの変換エラー
#[derive(Error, Debug)]
#[error("invalid {field} `{value}`: {source}")]
pub struct FieldParseError {
    pub field: NumericField,
    pub value: String,
    #[source]
    pub source: ParseIntError,
}

impl FieldParseError {
    pub fn new(field: NumericField, value: impl Into<String>, source: ParseIntError) -> Self {
        Self {
            field,
            value: value.into(),
            source,
        }
    }
}

/// 1レコード分のエラー（回復方針によっては読み飛ばせる）
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("malformed csv row: {source}")]
    CsvRow {
        #[source]
        source: csv::Error,
    },

    #[error("invalid element #{index}: {source}")]
    JsonElement {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Field(#[from] FieldParseError),
}

impl RecordError {
    /// CSV行エラーの作成
    pub fn csv_row(source: csv::Error) -> Self {
        Self::CsvRow { source }
    }

    /// JSON要素エラーの作成
    pub fn json_element(index: usize, source: serde_json::Error) -> Self {
        Self::JsonElement { index, source }
    }
}

/// ファイル単位で致命的なエラー（そのファイルの結果は破棄される）
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: io::Error,
    },

    #[error("malformed json at byte {offset}: {reason}")]
    Framing { offset: u64, reason: String },

    #[error("csv stream error: {source}")]
    CsvStream {
        #[source]
        source: csv::Error,
    },

    #[error("aborted on record error: {source}")]
    Aborted {
        #[source]
        source: RecordError,
    },
}

impl FileError {
    /// オープンエラーの作成
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// 読み込みエラーの作成
    pub fn read(source: io::Error) -> Self {
        Self::Read { source }
    }

    /// JSON構造エラーの作成
    pub fn framing(offset: u64, reason: impl Into<String>) -> Self {
        Self::Framing {
            offset,
            reason: reason.into(),
        }
    }

    /// 中断エラーの作成
    pub fn aborted(source: RecordError) -> Self {
        Self::Aborted { source }
    }
}

/// レコードソースが返すエラー
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Fatal(#[from] FileError),
}

impl From<FieldParseError> for SourceError {
    fn from(error: FieldParseError) -> Self {
        Self::Record(error.into())
    }
}
