// ============================================
// src/logging.rs
// ログ出力の初期化 (TUI が stdout を使うのでファイルに書く)
// ============================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "triviawiz.log";

/// ログの出力先ディレクトリ
fn default_log_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("jp", "Fukumoto0141", "TRIVIA_WIZ") {
        return proj_dirs.data_dir().to_path_buf();
    }
    // 取得できなかったらカレントディレクトリに (フォールバック)
    PathBuf::from(".")
}

/// `-v` の回数からフィルタを決める (RUST_LOG があればそちらを優先)
fn filter_for(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv 以上
    }
}

/// ログを初期化する
///
/// 戻り値の guard はプログラム終了まで保持すること (drop 時にバッファを書き出す)。
pub fn init(verbose: u8, log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(guard)
}
