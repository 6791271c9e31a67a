// 報告のトレイト定義

use crate::core::{
    FieldParseError, FileError, FileFormat, FileStats, Maxima, RecordError, RunSummary,
};
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// 実行全体の報告を抽象化するトレイト
pub trait Reporter {
    type File: FileReporter;

    /// 実行開始時の報告
    fn run_started(&self, file_count: usize);

    /// 実行完了時の報告
    fn run_finished(&self, summary: &RunSummary);

    /// 対応していない拡張子のファイル
    fn unsupported_file(&self, path: &Path);

    /// ファイル名とフォーマットを固定したファイル単位のレポーターを作成
    fn for_file(&self, path: &Path, format: FileFormat) -> Self::File;
}

/// 1ファイル分の報告を抽象化するトレイト
#[cfg_attr(test, automock)]
pub trait FileReporter {
    /// ファイル処理開始時の報告
    fn file_started(&self);

    /// 回復方針により読み飛ばしたレコード
    fn record_skipped(&self, error: &RecordError);

    /// ゼロで補ったフィールド
    fn field_zero_filled(&self, error: &FieldParseError);

    /// ファイル単位で致命的なエラー
    fn file_failed(&self, error: &FileError);

    /// 最大値の報告
    fn maxima(&self, maxima: &Maxima);

    /// ファイル処理完了時の報告
    fn file_finished(&self, stats: &FileStats);
}
