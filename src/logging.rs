// ログ初期化

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogConfig;

/// ファイル出力先ディレクトリ
pub fn resolve_log_dir(config: &LogConfig) -> Option<PathBuf> {
    config.log_dir.clone().or_else(|| {
        ProjectDirs::from("dev", "vidscope", "vidscope").map(|dirs| dirs.data_dir().join("logs"))
    })
}

/// RUST_LOG があれば優先し、なければ設定値、最後に info
fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// ログを初期化する
///
/// ファイル出力が有効な場合は返り値のガードを保持している間だけ書き込まれる。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact();

    let (file_layer, guard) = match config
        .enable_file_logging
        .then(|| resolve_log_dir(config))
        .flatten()
    {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir)?;
            let appender = tracing_appender::rolling::daily(&log_dir, &config.log_file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .json()
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(build_env_filter(&config.log_level))
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
