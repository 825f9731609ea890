//! 分析結果レポートの組み立てと保存

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::analytics::{
    engagement_breakdown, recommend, seo_checks, Benchmarks, EngagementBreakdown, Recommendation,
    SeoReport,
};
use crate::format::format_duration;
use crate::models::AnalyzedVideoRecord;

/// レポート出力のエラー
#[derive(Error, Debug)]
pub enum ReportError {
    /// ファイル書き込み失敗
    #[error("File I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSONシリアライズ失敗
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// 全パネルをまとめた分析レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub video_id: String,
    pub analysis: AnalyzedVideoRecord,
    /// 表示用の再生時間
    pub duration: String,
    pub engagement: EngagementBreakdown,
    pub seo: SeoReport,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    pub fn build(video_id: impl Into<String>, analysis: AnalyzedVideoRecord) -> Self {
        let benchmarks = Benchmarks::default();
        Self {
            video_id: video_id.into(),
            duration: format_duration(&analysis.video().duration_code),
            engagement: engagement_breakdown(&analysis, &benchmarks),
            seo: seo_checks(&analysis),
            recommendations: recommend(&analysis, &benchmarks),
            analysis,
        }
    }
}

/// JSONファイルとして書き出す
pub fn write_json_report(
    path: &Path,
    report: &AnalysisReport,
    pretty: bool,
) -> Result<(), ReportError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    std::fs::write(path, json).map_err(|e| ReportError::io(path, e))?;
    info!(path = %path.display(), "📄 Report written");
    Ok(())
}
