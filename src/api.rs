pub mod data_api; // YouTube Data API v3
pub mod mock; // APIキー未設定時のモック
pub mod source; // データソース抽象化
pub mod youtube;
