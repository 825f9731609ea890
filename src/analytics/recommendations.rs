// 改善提案の生成

use serde::{Deserialize, Serialize};

use crate::analytics::engagement::Benchmarks;
use crate::analytics::seo::{TAG_RANGE, TITLE_RANGE};
use crate::models::AnalyzedVideoRecord;

/// サムネイル改善のヒント
pub const THUMBNAIL_TIPS: [&str; 6] = [
    "Use high contrast colors (yellow/red backgrounds work well)",
    "Include emotional facial expressions",
    "Add text overlay with key benefit (e.g., 'In 15 Minutes')",
    "Use the rule of thirds for text placement",
    "Include relevant icons or symbols",
    "Make text readable on mobile (minimum 30px font size)",
];

/// タイトル案
pub const TITLE_SUGGESTIONS: [&str; 4] = [
    "🚀 Build Amazing React Apps in 2024 | Complete Beginner to Pro Tutorial",
    "React Mastery 2024: Everything You Need to Know (Step-by-Step Guide)",
    "The Ultimate React Tutorial That Will Change How You Code Forever",
    "React in 15 Minutes: From Zero to Hero | Modern Development Guide",
];

/// 追加候補のタグ
pub const TAG_SUGGESTIONS: [&str; 15] = [
    "reactjs",
    "javascript",
    "webdevelopment",
    "coding",
    "tutorial",
    "programming",
    "frontend",
    "nodejs",
    "hooks",
    "jsx",
    "es6",
    "typescript",
    "webdev",
    "beginners",
    "2024",
];

/// 説明文の書き出し例
pub const DESCRIPTION_SUGGESTIONS: [&str; 2] = [
    "Master React development with this comprehensive tutorial covering hooks, state management, and modern best practices. Perfect for beginners and intermediate developers looking to level up their skills.",
    "Learn React from scratch with hands-on examples, real-world projects, and industry best practices. This complete guide includes everything you need to become a React developer in 2024.",
];

/// 優先度（宣言順に高い）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[display("High Priority")]
    High,
    #[display("Medium Priority")]
    Medium,
    #[display("Low Priority")]
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub detail: String,
}

/// 分析結果から優先度順の改善提案を作成
pub fn recommend(analysis: &AnalyzedVideoRecord, benchmarks: &Benchmarks) -> Vec<Recommendation> {
    let video = analysis.video();
    let mut recommendations = Vec::new();

    let title_length = video.title.chars().count();
    if !TITLE_RANGE.contains(&title_length) {
        recommendations.push(Recommendation {
            priority: Priority::High,
            title: "Optimize Title Length".to_string(),
            detail: format!(
                "Your title is {} characters. Aim for 30-60 characters for better visibility.",
                title_length
            ),
        });
    }

    if analysis.insufficient_data() {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            title: "Improve Engagement Rate".to_string(),
            detail: "Not enough views yet to measure engagement. Promote the video and encourage early interaction.".to_string(),
        });
    } else if analysis.engagement_rate() < benchmarks.engagement_rate {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            title: "Improve Engagement Rate".to_string(),
            detail: format!(
                "Your {}% engagement can be improved with better CTAs and community interaction.",
                analysis.engagement_rate()
            ),
        });
    }

    if video.tags.len() < *TAG_RANGE.start() {
        recommendations.push(Recommendation {
            priority: Priority::Low,
            title: "Add More Relevant Tags".to_string(),
            detail: format!(
                "You have {} tags. Consider adding 2-3 more specific tags for better discoverability.",
                video.tags.len()
            ),
        });
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}
