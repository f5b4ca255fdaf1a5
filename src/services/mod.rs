// サービス層 - エンジンに注入される設定と監視の実装

pub mod config;
pub mod monitoring;

// 公開API
pub use config::DefaultBulkConfig;
pub use monitoring::{LoggingProgressReporter, NoOpProgressReporter};
