pub mod analytics;
pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod format;
pub mod io;
pub mod logging;
pub mod models;

// Re-export the main error types for convenience
pub use api::source::{AnalyzeError, FetchError};
pub use error::{VidscopeError, VidscopeResult};

// Re-export the analysis pipeline
pub use analytics::{compute_analysis, FixedScores, RandomScores, ScoreSource};
pub use api::source::{analyze_url, build_source, VideoSource};
pub use api::youtube::{extract_video_id, VideoId};
pub use models::{AnalyzedVideoRecord, RawVideoRecord};

// Re-export I/O utilities for convenience
pub use io::{write_json_report, AnalysisReport};
