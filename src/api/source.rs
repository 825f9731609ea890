//! 動画データソースの抽象化
//!
//! 実APIクライアントとモックを同じインターフェースで扱う。

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use crate::analytics::metrics::{compute_analysis, ScoreSource};
use crate::api::data_api::DataApiClient;
use crate::api::mock::MockVideoSource;
use crate::api::youtube::{extract_video_id, ApiKey, VideoId};
use crate::config::AppConfig;
use crate::models::{AnalyzedVideoRecord, RawVideoRecord};

/// データ取得エラー
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("YouTube API error: {0}")]
    Status(u16),
    #[error("Video not found")]
    NotFound,
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// 利用者向けの「データ取得不可」メッセージ
    pub fn user_message(&self) -> String {
        format!("Video data unavailable: {}", self)
    }
}

/// URLからの分析処理のエラー
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error("Invalid YouTube URL: {input}")]
    InvalidUrl { input: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// 動画IDから動画情報を取得するデータソース
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// ログ用の名前
    fn name(&self) -> &'static str;

    async fn fetch_video(&self, video_id: &VideoId) -> Result<RawVideoRecord, FetchError>;
}

/// 設定済みAPIキーを返す。未設定・プレースホルダーは `None`
pub fn usable_api_key(config: &AppConfig) -> Option<ApiKey> {
    config
        .api_key
        .as_ref()
        .map(|key| ApiKey::new(key.clone()))
        .filter(|key| !key.is_placeholder())
}

/// 設定に応じたデータソースを作成する
pub fn build_source(config: &AppConfig) -> Result<Box<dyn VideoSource>, FetchError> {
    match usable_api_key(config) {
        Some(api_key) => {
            info!(
                api_key = %api_key.masked(),
                base_url = %config.api_base_url,
                "🔑 Using YouTube Data API"
            );
            let client = DataApiClient::new(
                api_key,
                config.api_base_url.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )?;
            Ok(Box::new(client))
        }
        None => {
            warn!("YouTube API key not configured. Using mock data.");
            Ok(Box::new(MockVideoSource::new()))
        }
    }
}

/// URL → 動画ID → 取得 → 指標算出
pub async fn analyze_url(
    input: &str,
    source: &dyn VideoSource,
    scores: &mut (impl ScoreSource + Send),
) -> Result<AnalyzedVideoRecord, AnalyzeError> {
    let video_id = extract_video_id(input).ok_or_else(|| AnalyzeError::InvalidUrl {
        input: input.to_string(),
    })?;

    info!(video_id = %video_id, source = source.name(), "🎬 Fetching video data");
    let record = source.fetch_video(&video_id).await?;

    Ok(compute_analysis(record, scores))
}
