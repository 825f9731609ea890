// SEO分析パネル用のチェック項目

use serde::{Deserialize, Serialize};

use crate::models::AnalyzedVideoRecord;

/// 推奨タイトル長
pub const TITLE_RANGE: std::ops::RangeInclusive<usize> = 30..=60;
/// 推奨説明文長
pub const DESCRIPTION_RANGE: std::ops::RangeInclusive<usize> = 100..=160;
/// 推奨タグ数
pub const TAG_RANGE: std::ops::RangeInclusive<usize> = 5..=15;

const EMOTIONAL_WORDS: [&str; 3] = ["amazing", "best", "complete"];

/// チェック結果の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Good,
    Warning,
    Error,
}

/// 個別チェック
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoCheck {
    /// 項目名
    pub name: String,
    /// 状態
    pub status: CheckStatus,
    /// 表示メッセージ
    pub message: String,
    /// 項目スコア（0〜100）
    pub score: u8,
}

/// 総合評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum SeoRating {
    #[display("Excellent")]
    Excellent,
    #[display("Good")]
    Good,
    #[display("Needs Improvement")]
    NeedsImprovement,
}

impl SeoRating {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            SeoRating::Excellent
        } else if score >= 60 {
            SeoRating::Good
        } else {
            SeoRating::NeedsImprovement
        }
    }
}

/// SEO分析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoReport {
    pub score: u8,
    pub rating: SeoRating,
    pub checks: Vec<SeoCheck>,
    /// タイトル文字数
    pub title_length: usize,
    /// タイトルの単語数（空白区切り）
    pub title_word_count: usize,
    /// タグ数
    pub tag_count: usize,
    /// タグの平均文字数（四捨五入）。タグがなければ0
    pub average_tag_length: usize,
}

fn check(name: &str, status: CheckStatus, message: String, score: u8) -> SeoCheck {
    SeoCheck {
        name: name.to_string(),
        status,
        message,
        score,
    }
}

fn title_length_check(length: usize) -> SeoCheck {
    if TITLE_RANGE.contains(&length) {
        check(
            "Title Length",
            CheckStatus::Good,
            format!("Perfect length ({} chars)", length),
            100,
        )
    } else if length < *TITLE_RANGE.start() {
        check(
            "Title Length",
            CheckStatus::Warning,
            format!("Too short ({} chars, aim for 30-60)", length),
            60,
        )
    } else {
        check(
            "Title Length",
            CheckStatus::Error,
            format!("Too long ({} chars, aim for 30-60)", length),
            40,
        )
    }
}

fn description_length_check(length: usize) -> SeoCheck {
    if DESCRIPTION_RANGE.contains(&length) {
        check(
            "Description Length",
            CheckStatus::Good,
            format!("Optimal length ({} chars)", length),
            100,
        )
    } else {
        check(
            "Description Length",
            CheckStatus::Warning,
            format!("{} chars (aim for 100-160)", length),
            70,
        )
    }
}

fn tag_count_check(count: usize) -> SeoCheck {
    if TAG_RANGE.contains(&count) {
        check(
            "Tags Count",
            CheckStatus::Good,
            format!("Good tag count ({})", count),
            100,
        )
    } else {
        check(
            "Tags Count",
            CheckStatus::Warning,
            format!("{} tags (aim for 5-15)", count),
            60,
        )
    }
}

// キーワード分布は解析していないため固定値
fn keyword_density_check() -> SeoCheck {
    check(
        "Keyword Density",
        CheckStatus::Good,
        "Keywords well distributed".to_string(),
        85,
    )
}

fn emotional_words_check(title: &str) -> SeoCheck {
    let lowered = title.to_lowercase();
    if EMOTIONAL_WORDS.iter().any(|word| lowered.contains(word)) {
        check(
            "Emotional Words",
            CheckStatus::Good,
            "Contains emotional triggers".to_string(),
            90,
        )
    } else {
        check(
            "Emotional Words",
            CheckStatus::Warning,
            "Consider adding emotional words".to_string(),
            60,
        )
    }
}

fn average_tag_length(tags: &[String]) -> usize {
    if tags.is_empty() {
        return 0;
    }
    let total: usize = tags.iter().map(|tag| tag.chars().count()).sum();
    (total as f64 / tags.len() as f64).round() as usize
}

/// 分析結果からSEOチェック一覧を作成
pub fn seo_checks(analysis: &AnalyzedVideoRecord) -> SeoReport {
    let video = analysis.video();
    let title_length = video.title.chars().count();
    let tag_count = video.tags.len();

    SeoReport {
        score: analysis.seo_score(),
        rating: SeoRating::from_score(analysis.seo_score()),
        checks: vec![
            title_length_check(title_length),
            description_length_check(video.description.chars().count()),
            tag_count_check(tag_count),
            keyword_density_check(),
            emotional_words_check(&video.title),
        ],
        title_length,
        title_word_count: video.title.split_whitespace().count(),
        tag_count,
        average_tag_length: average_tag_length(&video.tags),
    }
}
