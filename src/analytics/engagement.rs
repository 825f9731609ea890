//! エンゲージメント内訳とベンチマーク比較

use serde::{Deserialize, Serialize};

use crate::analytics::metrics::round2;
use crate::models::AnalyzedVideoRecord;

/// 業界平均の目安値（%）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    pub engagement_rate: f64,
    pub like_ratio: f64,
    pub comment_ratio: f64,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            engagement_rate: 5.2,
            like_ratio: 3.8,
            comment_ratio: 0.5,
        }
    }
}

/// ベンチマークとの比較結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Comparison {
    /// 10%超上回る
    Above { percent: f64 },
    /// 10%超下回る
    Below { percent: f64 },
    Average,
}

impl Comparison {
    /// ベンチマークが0以下なら比較できないため `Average`
    pub fn against(current: f64, benchmark: f64) -> Self {
        if benchmark <= 0.0 || !benchmark.is_finite() {
            return Comparison::Average;
        }
        let percent = round1((current - benchmark) / benchmark * 100.0);
        if current > benchmark * 1.1 {
            Comparison::Above { percent }
        } else if current < benchmark * 0.9 {
            Comparison::Below { percent }
        } else {
            Comparison::Average
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Above { percent } => write!(f, "+{:.1}% above average", percent),
            Comparison::Below { percent } => write!(f, "{:.1}% below average", percent),
            Comparison::Average => write!(f, "Average performance"),
        }
    }
}

/// エンゲージメントパネルの内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementBreakdown {
    /// エンゲージメント率（%）
    pub engagement_rate: f64,
    /// 高評価率（%）
    pub like_ratio: f64,
    /// コメント率（%）
    pub comment_ratio: f64,
    pub engagement_vs_benchmark: Comparison,
    pub likes_vs_benchmark: Comparison,
    pub comments_vs_benchmark: Comparison,
    /// 反応のうち高評価が占める割合（%、小数1桁）
    pub likes_share: f64,
    /// 高評価100件あたりのコメント数（小数1桁）
    pub comment_like_ratio: f64,
    /// 再生回数0のため比率が算出できない
    pub insufficient_data: bool,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// 分母が0なら0
fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

fn ratio(part: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    round2(part as f64 / views as f64 * 100.0)
}

/// ベンチマークと比較したエンゲージメント内訳
pub fn engagement_breakdown(
    analysis: &AnalyzedVideoRecord,
    benchmarks: &Benchmarks,
) -> EngagementBreakdown {
    let video = analysis.video();
    let like_ratio = ratio(video.likes, video.views);
    let comment_ratio = ratio(video.comments, video.views);

    EngagementBreakdown {
        engagement_rate: analysis.engagement_rate(),
        like_ratio,
        comment_ratio,
        engagement_vs_benchmark: Comparison::against(
            analysis.engagement_rate(),
            benchmarks.engagement_rate,
        ),
        likes_vs_benchmark: Comparison::against(like_ratio, benchmarks.like_ratio),
        comments_vs_benchmark: Comparison::against(comment_ratio, benchmarks.comment_ratio),
        likes_share: share(video.likes, video.likes + video.comments),
        comment_like_ratio: share(video.comments, video.likes),
        insufficient_data: analysis.insufficient_data(),
    }
}
