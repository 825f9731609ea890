//! I/O utilities for analysis reports.
//!
//! This module provides JSON export of a finished analysis.

pub mod report;

// Re-export commonly used types and functions
pub use report::{write_json_report, AnalysisReport, ReportError};
