//! 動画指標の算出
//!
//! エンゲージメント率とSEOスコアは入力だけで決まる。感情スコアと
//! クリックベイトスコアは未実装モデルの代替値で、`ScoreSource` から注入する。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AnalyzedVideoRecord, RawVideoRecord};

/// 感情スコアの下限
pub const SENTIMENT_MIN: f64 = 0.75;
/// 感情スコアの上限（含まない）
pub const SENTIMENT_MAX: f64 = 1.0;
/// SEOスコアの上限
pub const SEO_SCORE_CAP: u8 = 100;

/// 代替スコアの供給元
pub trait ScoreSource {
    /// 感情スコア。`[0.75, 1.00)` を想定
    fn sentiment(&mut self) -> f64;
    /// クリックベイトスコア。`[0, 100]`
    fn clickbait(&mut self) -> u8;
}

/// 乱数による代替スコア
#[derive(Debug, Clone)]
pub struct RandomScores<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomScores<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomScores<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// 同じシードなら同じ列を返す
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ScoreSource for RandomScores<R> {
    fn sentiment(&mut self) -> f64 {
        self.rng.gen_range(SENTIMENT_MIN..SENTIMENT_MAX)
    }

    fn clickbait(&mut self) -> u8 {
        self.rng.gen_range(0..=100)
    }
}

/// 固定値を返すスコア源（テスト・再現用）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScores {
    pub sentiment: f64,
    pub clickbait: u8,
}

impl Default for FixedScores {
    fn default() -> Self {
        Self {
            sentiment: SENTIMENT_MIN,
            clickbait: 0,
        }
    }
}

impl ScoreSource for FixedScores {
    fn sentiment(&mut self) -> f64 {
        self.sentiment
    }

    fn clickbait(&mut self) -> u8 {
        self.clickbait
    }
}

/// スコアの色分け区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreBand::High
        } else if score >= 60 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

/// 小数2桁に丸める
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// エンゲージメント率 `(likes + comments) / views * 100`
///
/// 再生回数0では定義できないため `None` を返す。
pub fn engagement_rate(likes: u64, comments: u64, views: u64) -> Option<f64> {
    if views == 0 {
        return None;
    }
    let interactions = likes as f64 + comments as f64;
    Some(round2(interactions / views as f64 * 100.0))
}

fn title_term(title: &str) -> u8 {
    let length = title.chars().count();
    if (30..=60).contains(&length) {
        25
    } else {
        15
    }
}

fn description_term(description: &str) -> u8 {
    if description.chars().count() >= 100 {
        25
    } else {
        15
    }
}

fn tags_term(tags: &[String]) -> u8 {
    if tags.len() >= 5 {
        25
    } else {
        15
    }
}

fn keyword_term(title: &str) -> u8 {
    let lowered = title.to_lowercase();
    if lowered.contains("how") || lowered.contains("tutorial") {
        25
    } else {
        20
    }
}

/// SEOスコア。4項目の合計を100で頭打ちにする
///
/// 長さはUnicodeスカラー値（`chars()`）で数える。絵文字などBMP外の文字を含む
/// タイトルは、UTF-16単位で数えるブラウザ側の表示と判定が変わることがある。
pub fn seo_score(title: &str, description: &str, tags: &[String]) -> u8 {
    let total = u16::from(title_term(title))
        + u16::from(description_term(description))
        + u16::from(tags_term(tags))
        + u16::from(keyword_term(title));
    total.min(u16::from(SEO_SCORE_CAP)) as u8
}

/// 動画情報から指標を算出する
pub fn compute_analysis(
    record: RawVideoRecord,
    scores: &mut impl ScoreSource,
) -> AnalyzedVideoRecord {
    let rate = engagement_rate(record.likes, record.comments, record.views);
    let insufficient_data = rate.is_none();
    let seo = seo_score(&record.title, &record.description, &record.tags);
    let sentiment = round2(scores.sentiment().clamp(0.0, 1.0));
    let clickbait = scores.clickbait().min(100);

    debug!(
        views = record.views,
        engagement_rate = ?rate,
        seo_score = seo,
        sentiment_score = sentiment,
        clickbait_score = clickbait,
        "📊 Analysis computed"
    );

    AnalyzedVideoRecord::new(
        record,
        rate.unwrap_or(0.0),
        sentiment,
        seo,
        clickbait,
        insufficient_data,
    )
}
