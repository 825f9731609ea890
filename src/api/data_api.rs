//! YouTube Data API v3 クライアント

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::api::source::{FetchError, VideoSource};
use crate::api::youtube::{ApiKey, VideoId};
use crate::models::RawVideoRecord;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone)]
pub struct DataApiClient {
    client: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
}

impl DataApiClient {
    pub fn new(api_key: ApiKey, base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// videos エンドポイントのURL
    pub fn videos_url(&self, video_id: &VideoId) -> String {
        format!(
            "{}/videos?id={}&part=snippet,statistics,contentDetails&key={}",
            self.base_url,
            urlencoding::encode(video_id.as_str()),
            urlencoding::encode(self.api_key.as_str())
        )
    }
}

#[async_trait]
impl VideoSource for DataApiClient {
    fn name(&self) -> &'static str {
        "youtube-data-api"
    }

    async fn fetch_video(&self, video_id: &VideoId) -> Result<RawVideoRecord, FetchError> {
        let started = std::time::Instant::now();
        let response = self.client.get(self.videos_url(video_id)).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!(video_id = %video_id, status = status.as_u16(), "❌ YouTube API error");
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        debug!(
            video_id = %video_id,
            response_size_bytes = text.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "📨 API response received"
        );

        parse_videos_response(&text)
    }
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
    content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    published_at: DateTime<Utc>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

// 件数は文字列で返る
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    maxres: Option<Thumbnail>,
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

fn parse_count(value: Option<&String>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// videos レスポンスの先頭要素を `RawVideoRecord` に変換
pub fn parse_videos_response(body: &str) -> Result<RawVideoRecord, FetchError> {
    let response: VideosResponse = serde_json::from_str(body)?;
    let item = response.items.into_iter().next().ok_or(FetchError::NotFound)?;

    let Snippet {
        title,
        description,
        published_at,
        tags,
        channel_title,
        thumbnails,
    } = item.snippet;

    let thumbnail_url = thumbnails
        .maxres
        .or(thumbnails.high)
        .or(thumbnails.default)
        .map(|t| t.url)
        .unwrap_or_default();

    Ok(RawVideoRecord {
        title,
        description,
        views: parse_count(item.statistics.view_count.as_ref()),
        likes: parse_count(item.statistics.like_count.as_ref()),
        comments: parse_count(item.statistics.comment_count.as_ref()),
        published_at,
        duration_code: item.content_details.duration,
        tags,
        channel_title,
        thumbnail_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "kind": "youtube#videoListResponse",
        "items": [{
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "publishedAt": "2009-10-25T06:57:33Z",
                "title": "Never Gonna Give You Up",
                "description": "The official video",
                "channelTitle": "Rick Astley",
                "tags": ["rick astley", "music"],
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg"},
                    "high": {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"}
                }
            },
            "statistics": {
                "viewCount": "1500000000",
                "likeCount": "17000000",
                "commentCount": "2300000"
            },
            "contentDetails": {"duration": "PT3M33S"}
        }]
    }"#;

    #[test]
    fn test_parse_videos_response() {
        let record = parse_videos_response(SAMPLE_RESPONSE).unwrap();
        assert_eq!(record.title, "Never Gonna Give You Up");
        assert_eq!(record.views, 1_500_000_000);
        assert_eq!(record.likes, 17_000_000);
        assert_eq!(record.comments, 2_300_000);
        assert_eq!(record.duration_code, "PT3M33S");
        assert_eq!(record.tags.len(), 2);
        assert_eq!(record.channel_title, "Rick Astley");
        assert_eq!(
            record.published_at.to_rfc3339(),
            "2009-10-25T06:57:33+00:00"
        );
        // maxres がなければ high
        assert_eq!(
            record.thumbnail_url,
            "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[test]
    fn test_parse_missing_statistics_and_tags() {
        let body = r#"{"items": [{
            "snippet": {"publishedAt": "2024-01-01T00:00:00Z", "title": "t"},
            "statistics": {"viewCount": "not-a-number"},
            "contentDetails": {"duration": "PT1S"}
        }]}"#;
        let record = parse_videos_response(body).unwrap();
        assert_eq!(record.views, 0);
        assert_eq!(record.likes, 0);
        assert_eq!(record.comments, 0);
        assert!(record.tags.is_empty());
        assert_eq!(record.thumbnail_url, "");
    }

    #[test]
    fn test_parse_empty_items_is_not_found() {
        match parse_videos_response(r#"{"items": []}"#) {
            Err(FetchError::NotFound) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
        match parse_videos_response(r#"{}"#) {
            Err(FetchError::NotFound) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_json() {
        match parse_videos_response("invalid json") {
            Err(FetchError::Parse(_)) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_videos_url() {
        let client = DataApiClient::new(
            ApiKey::new("key123".to_string()),
            "https://example.test/youtube/v3/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.videos_url(&VideoId::new("abc")),
            "https://example.test/youtube/v3/videos?id=abc&part=snippet,statistics,contentDetails&key=key123"
        );
    }

    /// 1回だけ固定レスポンスを返すHTTPサーバー。受け取ったリクエスト行を返す
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    fn client_for(base_url: String) -> DataApiClient {
        DataApiClient::new(
            ApiKey::new("key123".to_string()),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_video_maps_error_status() {
        let (base_url, server) =
            serve_once("403 Forbidden", r#"{"error": {"code": 403}}"#).await;

        let error = client_for(base_url)
            .fetch_video(&VideoId::new("abc"))
            .await
            .unwrap_err();
        assert!(matches!(error, FetchError::Status(403)));
        assert_eq!(
            error.user_message(),
            "Video data unavailable: YouTube API error: 403"
        );

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with(
            "GET /videos?id=abc&part=snippet,statistics,contentDetails&key=key123 "
        ));
    }

    #[tokio::test]
    async fn test_fetch_video_empty_items_is_not_found() {
        let (base_url, server) = serve_once("200 OK", r#"{"items":[]}"#).await;

        let error = client_for(base_url)
            .fetch_video(&VideoId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(error, FetchError::NotFound));
        assert_eq!(
            error.user_message(),
            "Video data unavailable: Video not found"
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_video_success_through_configured_source() {
        let (base_url, server) = serve_once("200 OK", SAMPLE_RESPONSE).await;
        let config = crate::config::AppConfig {
            api_key: Some("AIzaSyTest".to_string()),
            api_base_url: base_url,
            ..crate::config::AppConfig::default()
        };

        let source = crate::api::source::build_source(&config).unwrap();
        let record = source.fetch_video(&VideoId::new("dQw4w9WgXcQ")).await.unwrap();
        assert_eq!(record.title, "Never Gonna Give You Up");
        assert_eq!(record.views, 1_500_000_000);
        server.await.unwrap();
    }
}
