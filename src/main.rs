use anyhow::{Context, Result};
use clap::Parser;

use catalog_max::{
    config::{init_tracing, Settings},
    reporting::TracingReporter,
    App,
};

fn main() -> Result<()> {
    // .envがあれば読み込む（開発用）
    let _ = dotenvy::dotenv();

    // 1. 設定の読み込み（不正なログレベルはここで終了）
    let settings = Settings::parse();
    let level = settings
        .level_filter()
        .context("failed to set log level")?;
    init_tracing(level, settings.log_format).context("failed to initialize logging")?;

    // 2. 指定順にファイルを処理
    let app = App::new(settings.processing_options(), TracingReporter::new());
    app.run(&settings.file_names());

    Ok(())
}
