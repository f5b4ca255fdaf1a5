// 一括変換システムのトレイト定義
// Converter以外の抽象化インターフェースを定義

use async_trait::async_trait;
use mockall::automock;

/// 一括変換の設定を抽象化するトレイト
#[automock]
pub trait BulkConfig: Send + Sync {
    /// 要求された並列度（0以下は1として扱われる）
    fn requested_concurrency(&self) -> i64;

    /// 作業チャンネルのバッファサイズを取得
    fn channel_buffer_size(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

// BulkConfig for Box<dyn BulkConfig>
impl BulkConfig for Box<dyn BulkConfig> {
    fn requested_concurrency(&self) -> i64 {
        self.as_ref().requested_concurrency()
    }

    fn channel_buffer_size(&self) -> usize {
        self.as_ref().channel_buffer_size()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// バッチ開始時の報告
    async fn report_started(&self, total_items: usize, worker_count: usize);

    /// 変換成功ごとの報告
    async fn report_progress(&self, completed: usize, total: usize);

    /// 最初の失敗の報告
    async fn report_error(&self, identifier: &str, error: &str);

    /// バッチ完了時の報告
    async fn report_completed(&self, converted: usize, failed: bool);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_items: usize, worker_count: usize) {
        self.as_ref().report_started(total_items, worker_count).await
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        self.as_ref().report_progress(completed, total).await
    }

    async fn report_error(&self, identifier: &str, error: &str) {
        self.as_ref().report_error(identifier, error).await
    }

    async fn report_completed(&self, converted: usize, failed: bool) {
        self.as_ref().report_completed(converted, failed).await
    }
}
