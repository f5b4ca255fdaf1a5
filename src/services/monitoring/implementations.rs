// 進捗監視の具象実装

use crate::core::ProgressReporter;
use async_trait::async_trait;

/// tracingによる進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct LoggingProgressReporter {
    quiet: bool,
}

impl LoggingProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 進捗行を出さず、エラーと完了のみ報告する
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for LoggingProgressReporter {
    async fn report_started(&self, total_items: usize, worker_count: usize) {
        tracing::info!(total_items, worker_count, "starting bulk conversion");
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        if !self.quiet && (completed % 100 == 0 || completed == total) {
            let percentage = (completed as f64 / total as f64) * 100.0;
            tracing::info!("progress: {completed}/{total} ({percentage:.1}%)");
        }
    }

    async fn report_error(&self, identifier: &str, error: &str) {
        tracing::error!(identifier, "conversion failed: {error}");
    }

    async fn report_completed(&self, converted: usize, failed: bool) {
        if failed {
            tracing::info!(converted, "bulk conversion aborted");
        } else {
            tracing::info!(converted, "bulk conversion completed");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_items: usize, _worker_count: usize) {
        // 何もしない
    }

    async fn report_progress(&self, _completed: usize, _total: usize) {
        // 何もしない
    }

    async fn report_error(&self, _identifier: &str, _error: &str) {
        // 何もしない
    }

    async fn report_completed(&self, _converted: usize, _failed: bool) {
        // 何もしない
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_progress_reporter() {
        // サブスクライバ未設定でも呼び出しが成功することを確認
        let reporter = LoggingProgressReporter::quiet();

        reporter.report_started(100, 4).await;
        reporter.report_progress(50, 100).await;
        reporter.report_error("bad.tf", "test error").await;
        reporter.report_completed(99, true).await;
    }

    #[tokio::test]
    async fn test_logging_progress_reporter_creation() {
        let reporter1 = LoggingProgressReporter::new();
        let reporter2 = LoggingProgressReporter::quiet();

        assert!(!reporter1.quiet);
        assert!(reporter2.quiet);
    }

    #[tokio::test]
    async fn test_noop_progress_reporter() {
        let reporter = NoOpProgressReporter::new();

        reporter.report_started(100, 4).await;
        reporter.report_progress(50, 100).await;
        reporter.report_error("bad.tf", "test error").await;
        reporter.report_completed(99, false).await;
    }
}
