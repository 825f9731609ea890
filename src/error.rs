//! クレート全体のエラー型

use thiserror::Error;

use crate::api::source::{AnalyzeError, FetchError};
use crate::download::DownloadError;
use crate::io::ReportError;

#[derive(Error, Debug)]
pub enum VidscopeError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<FetchError> for VidscopeError {
    fn from(error: FetchError) -> Self {
        Self::Analyze(AnalyzeError::Fetch(error))
    }
}

impl VidscopeError {
    /// 利用者向けの表示。データ取得失敗は「データ取得不可」にまとめる
    pub fn user_message(&self) -> String {
        match self {
            Self::Analyze(AnalyzeError::Fetch(e)) => e.user_message(),
            Self::Other(e) => format!("{:#}", e),
            other => other.to_string(),
        }
    }
}

pub type VidscopeResult<T> = Result<T, VidscopeError>;
