// ログレベルの解釈とsubscriberの初期化

use crate::core::ConfigError;
use tracing_subscriber::filter::LevelFilter;

/// ログの出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// 人が読むための1行テキスト
    #[default]
    Text,
    /// 1行1オブジェクトのJSON
    Json,
}

/// ログレベル名を解釈する（大文字小文字は区別しない）
pub fn parse_log_level(value: &str) -> Result<LevelFilter, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::OFF),
        "error" => Ok(LevelFilter::ERROR),
        "warn" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "debug" => Ok(LevelFilter::DEBUG),
        "trace" => Ok(LevelFilter::TRACE),
        _ => Err(ConfigError::InvalidLogLevel {
            value: value.to_string(),
        }),
    }
}

/// 標準出力へのグローバルsubscriberを登録する。プロセスにつき1回だけ成功する
pub fn init_tracing(level: LevelFilter, format: LogFormat) -> Result<(), ConfigError> {
    let builder = tracing_subscriber::fmt().with_max_level(level);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|error| ConfigError::Subscriber {
        message: error.to_string(),
    })
}
