// 進捗監視機能
// バッチ開始、進捗、最初の失敗、完了の報告

pub mod implementations;

// 公開API
pub use implementations::{LoggingProgressReporter, NoOpProgressReporter};
