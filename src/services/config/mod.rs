// 設定管理機能
// 並列度とチャンネルサイズの既定値、ビルダー形式での上書き

pub mod implementations;

// 公開API
pub use implementations::DefaultBulkConfig;
