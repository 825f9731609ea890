//! YouTube URL解析と識別子型
//!
//! 自由入力のURL文字列から動画IDを取り出す。ネットワークI/Oは行わない。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// APIキー未設定を表すプレースホルダー
pub const PLACEHOLDER_API_KEY: &str = "YOUR_YOUTUBE_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `https://www.youtube.com/watch?v=<id>`
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// `https://youtu.be/<id>`
    pub fn short_url(&self) -> String {
        format!("https://youtu.be/{}", self.0)
    }

    /// `https://www.youtube.com/embed/<id>`
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }

    /// 指定した形式の正規URLを生成
    pub fn canonical_url(&self, shape: UrlShape) -> String {
        match shape {
            UrlShape::Watch | UrlShape::WatchQuery => self.watch_url(),
            UrlShape::Short => self.short_url(),
            UrlShape::Embed => self.embed_url(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 空文字またはプレースホルダーのままか
    pub fn is_placeholder(&self) -> bool {
        let trimmed = self.0.trim();
        trimmed.is_empty() || trimmed == PLACEHOLDER_API_KEY
    }

    /// ログ出力用に末尾4文字以外を伏せる
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

/// 認識したURLの形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlShape {
    /// `youtube.com/watch?v=<id>`
    Watch,
    /// `youtu.be/<id>`
    Short,
    /// `youtube.com/embed/<id>`
    Embed,
    /// `youtube.com/watch?...&v=<id>`（他のクエリが先行する形）
    WatchQuery,
}

// 3つの形を1つの正規表現にまとめ、入力中で最も左にあるものを採用する。
// IDは `&` `\n` `?` `#` の直前までで、空のIDはマッチしない。
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"youtube\.com/watch\?v=(?P<watch>[^&\n?#]+)",
        r"|youtu\.be/(?P<short>[^&\n?#]+)",
        r"|youtube\.com/embed/(?P<embed>[^&\n?#]+)",
    ))
    .expect("URL pattern must compile")
});

// `v=` が先頭のクエリでない場合のフォールバック
static WATCH_QUERY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").expect("URL pattern must compile")
});

const NAMED_SHAPES: [(&str, UrlShape); 3] = [
    ("watch", UrlShape::Watch),
    ("short", UrlShape::Short),
    ("embed", UrlShape::Embed),
];

/// URL文字列から動画IDを抽出する。認識できない場合は `None`。
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    extract_with_shape(input).map(|(id, _)| id)
}

/// 動画IDとマッチしたURL形を返す
pub fn extract_with_shape(input: &str) -> Option<(VideoId, UrlShape)> {
    if let Some(cap) = URL_PATTERN.captures(input) {
        return NAMED_SHAPES.iter().find_map(|(group, shape)| {
            cap.name(group).map(|m| (VideoId::new(m.as_str()), *shape))
        });
    }

    WATCH_QUERY_PATTERN
        .captures(input)
        .and_then(|cap| cap.get(1))
        .map(|m| (VideoId::new(m.as_str()), UrlShape::WatchQuery))
}
