pub mod config;
pub mod core;
pub mod dispatch;
pub mod reducer;
pub mod reporting;
pub mod source;

use std::path::Path;

use crate::config::ProcessingOptions;
use crate::core::RunSummary;
use crate::dispatch::{process_file, FileStatus};
use crate::reporting::Reporter;

// 処理方針とレポーターを所有するアプリケーション本体
// ファイル間で状態を共有せず、指定順に1ファイルずつ処理する
pub struct App<R>
where
    R: Reporter,
{
    options: ProcessingOptions,
    reporter: R,
}

impl<R> App<R>
where
    R: Reporter,
{
    /// 新しいAppインスタンスを作成（コンストラクタインジェクション）
    pub fn new(options: ProcessingOptions, reporter: R) -> Self {
        Self { options, reporter }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 指定されたファイルを順番に処理する
    ///
    /// ファイル単位の失敗は報告されるだけで、残りのファイルの処理は続く。
    pub fn run<P: AsRef<Path>>(&self, files: &[P]) -> RunSummary {
        self.reporter.run_started(files.len());

        let mut summary = RunSummary::default();
        for path in files {
            match process_file(path.as_ref(), &self.options, &self.reporter) {
                FileStatus::Completed(_) => summary.completed += 1,
                FileStatus::Failed(_) => summary.failed += 1,
                FileStatus::Unsupported => summary.unsupported += 1,
            }
        }

        self.reporter.run_finished(&summary);
        summary
    }
}
