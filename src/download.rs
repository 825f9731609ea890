//! yt-dlp を使った動画ダウンロード

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{error, info};

use crate::api::youtube::extract_video_id;

/// mp4を優先するフォーマット指定
pub const FORMAT_SELECTOR: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to prepare download directory '{path}': {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Download timeout after {0} seconds")]
    Timeout(u64),
    #[error("Download failed: {0}")]
    Failed(String),
    #[error("File was not created: {0}")]
    FileMissing(String),
}

/// ダウンロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub filename: String,
    pub path: PathBuf,
}

pub struct Downloader {
    program: String,
    output_dir: PathBuf,
    timeout: Duration,
}

impl Downloader {
    pub fn new(output_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: "yt-dlp".to_string(),
            output_dir: output_dir.into(),
            timeout,
        }
    }

    /// 実行するプログラムを差し替える
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// yt-dlp に渡す引数
    pub fn build_args(&self, url: &str, output: &Path) -> Vec<String> {
        vec![
            "-f".to_string(),
            FORMAT_SELECTOR.to_string(),
            "-o".to_string(),
            output.display().to_string(),
            "--no-playlist".to_string(),
            url.to_string(),
        ]
    }

    pub async fn download(&self, url: &str) -> Result<DownloadedFile, DownloadError> {
        let video_id =
            extract_video_id(url).ok_or_else(|| DownloadError::InvalidUrl(url.to_string()))?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| DownloadError::Directory {
                path: self.output_dir.display().to_string(),
                source,
            })?;

        let filename = format!("{}.mp4", uuid::Uuid::new_v4());
        let path = self.output_dir.join(&filename);

        info!(video_id = %video_id, output = %path.display(), "⬇️ Starting download");

        let child = Command::new(&self.program)
            .args(self.build_args(url, &path))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DownloadError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // タイムアウト時は child がドロップされ kill される
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| DownloadError::Timeout(self.timeout.as_secs()))?
            .map_err(|source| DownloadError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(video_id = %video_id, status = ?output.status, "❌ Download failed");
            return Err(DownloadError::Failed(if stderr.is_empty() {
                "Download failed".to_string()
            } else {
                stderr
            }));
        }

        if !path.exists() {
            return Err(DownloadError::FileMissing(path.display().to_string()));
        }

        info!(video_id = %video_id, filename = %filename, "✅ Download complete");
        Ok(DownloadedFile { filename, path })
    }
}
