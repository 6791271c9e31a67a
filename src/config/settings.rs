// コマンドライン引数と環境変数からの設定読み込み
//
// 引数が優先され、なければ `APP_` で始まる環境変数を使う。

use super::logging::{parse_log_level, LogFormat};
use super::options::ProcessingOptions;
use crate::core::{ConfigError, ParseErrorPolicy, RecoveryPolicy};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog_max")]
#[command(about = "Report the highest priced and top rated product of each catalog file")]
#[command(version)]
pub struct Settings {
    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, env = "APP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Catalog files to process in order (comma separated or repeated)
    #[arg(long, env = "APP_DB_FILE_NAMES", value_delimiter = ',')]
    pub db_file_names: Vec<PathBuf>,

    /// Additional catalog files, processed after --db-file-names
    pub files: Vec<PathBuf>,

    /// Log output format
    #[arg(long, env = "APP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// What to do with an element that is not a valid item in a JSON file
    #[arg(long, env = "APP_JSON_RECOVERY", value_enum, default_value_t = RecoveryPolicy::AbortOnError)]
    pub json_recovery: RecoveryPolicy,

    /// What to do with a malformed row in a CSV file
    #[arg(long, env = "APP_CSV_RECOVERY", value_enum, default_value_t = RecoveryPolicy::SkipOnError)]
    pub csv_recovery: RecoveryPolicy,

    /// What to do when a CSV price or rating is not an integer
    #[arg(long, env = "APP_ON_PARSE_ERROR", value_enum, default_value_t = ParseErrorPolicy::ZeroFill)]
    pub on_parse_error: ParseErrorPolicy,
}

impl Settings {
    /// ログレベルを解釈する。不正な値は起動時の致命的エラー
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_log_level(&self.log_level)
    }

    pub fn processing_options(&self) -> ProcessingOptions {
        ProcessingOptions::new()
            .with_json_recovery(self.json_recovery)
            .with_csv_recovery(self.csv_recovery)
            .with_parse_error_policy(self.on_parse_error)
    }

    /// 処理対象のファイル（指定順）
    pub fn file_names(&self) -> Vec<PathBuf> {
        self.db_file_names
            .iter()
            .chain(self.files.iter())
            .cloned()
            .collect()
    }
}
