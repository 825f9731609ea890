//! 動画レコードのデータモデル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// データソースから取得した動画情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoRecord {
    /// タイトル
    pub title: String,
    /// 説明文
    pub description: String,
    /// 再生回数
    pub views: u64,
    /// 高評価数
    pub likes: u64,
    /// コメント数
    pub comments: u64,
    /// 公開日時
    pub published_at: DateTime<Utc>,
    /// 再生時間 (`PT#H#M#S`)
    pub duration_code: String,
    /// タグ
    #[serde(default)]
    pub tags: Vec<String>,
    /// チャンネル名
    pub channel_title: String,
    /// サムネイルURL
    pub thumbnail_url: String,
}

/// 指標算出済みの動画情報
///
/// `analytics::compute_analysis` でのみ生成される。生成後は変更できない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedVideoRecord {
    #[serde(flatten)]
    video: RawVideoRecord,
    engagement_rate: f64,
    sentiment_score: f64,
    seo_score: u8,
    clickbait_score: u8,
    #[serde(default)]
    insufficient_data: bool,
}

impl AnalyzedVideoRecord {
    pub(crate) fn new(
        video: RawVideoRecord,
        engagement_rate: f64,
        sentiment_score: f64,
        seo_score: u8,
        clickbait_score: u8,
        insufficient_data: bool,
    ) -> Self {
        Self {
            video,
            engagement_rate,
            sentiment_score,
            seo_score,
            clickbait_score,
            insufficient_data,
        }
    }

    /// 元の動画情報
    pub fn video(&self) -> &RawVideoRecord {
        &self.video
    }

    /// エンゲージメント率（%、小数2桁）
    pub fn engagement_rate(&self) -> f64 {
        self.engagement_rate
    }

    /// 感情スコア（0〜1、小数2桁）
    pub fn sentiment_score(&self) -> f64 {
        self.sentiment_score
    }

    /// SEOスコア（0〜100）
    pub fn seo_score(&self) -> u8 {
        self.seo_score
    }

    /// クリックベイトスコア（0〜100）
    pub fn clickbait_score(&self) -> u8 {
        self.clickbait_score
    }

    /// 再生回数0でエンゲージメント率が定義できない
    pub fn insufficient_data(&self) -> bool {
        self.insufficient_data
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// テスト用の標準レコード
    pub fn sample_record() -> RawVideoRecord {
        RawVideoRecord {
            title: "How to Build React Apps in 2024 | Complete Tutorial".to_string(),
            description: "Learn React development with modern best practices, hooks, and performance optimization techniques. This comprehensive guide covers everything you need to know about building scalable React applications in 2024.".to_string(),
            views: 125_430,
            likes: 8_420,
            comments: 342,
            published_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            duration_code: "PT15M30S".to_string(),
            tags: vec![
                "javascript".to_string(),
                "programming".to_string(),
                "tutorial".to_string(),
                "webdev".to_string(),
                "coding".to_string(),
            ],
            channel_title: "CodeMaster Pro".to_string(),
            thumbnail_url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg".to_string(),
        }
    }
}
