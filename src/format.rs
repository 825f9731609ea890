//! 表示用フォーマット
//!
//! 再生時間トークン (`PT#H#M#S`) の解析と、大きな数値の短縮表記。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("duration pattern must compile")
});

/// 再生時間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl VideoDuration {
    /// `PT15M30S` 形式を解析する。時・分・秒はいずれも省略可
    pub fn parse(token: &str) -> Option<Self> {
        let captures = DURATION_PATTERN.captures(token.trim())?;
        let component = |index: usize| -> Option<u32> {
            match captures.get(index) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };

        Some(Self {
            hours: component(1)?,
            minutes: component(2)?,
            seconds: component(3)?,
        })
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl std::fmt::Display for VideoDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hours > 0 {
            write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        } else {
            write!(f, "{}:{:02}", self.minutes, self.seconds)
        }
    }
}

/// 解析できればフォーマット済み、できなければ元のトークンを返す
pub fn format_duration(token: &str) -> String {
    VideoDuration::parse(token)
        .map(|duration| duration.to_string())
        .unwrap_or_else(|| token.to_string())
}

/// 1.2M / 3.4K 形式の短縮表記
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}
