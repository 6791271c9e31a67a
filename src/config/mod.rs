// 設定管理
//
// - options.rs   - ファイル処理の方針（回復方針など）
// - settings.rs  - コマンドライン引数と環境変数からの読み込み
// - logging.rs   - ログレベルの解釈とsubscriberの初期化

pub mod logging;
pub mod options;
pub mod settings;

// 公開API
pub use logging::{init_tracing, parse_log_level, LogFormat};
pub use options::ProcessingOptions;
pub use settings::Settings;
