// BulkEngine - 依存性注入による一括変換エンジン
// Converter、ContentSource、設定、進捗報告をコンストラクタで受け取る

use super::{
    consumer::WorkerGauge,
    pipeline::{BatchPlan, ConversionPipeline},
};
use crate::{
    converter::Converter,
    core::{
        BatchReport, BatchSummary, BulkConfig, ConcurrencyDegree, ConversionOptions,
        ConvertError, ConvertResult, ProgressReporter,
    },
    services::{config::implementations::validate_config, NoOpProgressReporter},
    storage::ContentSource,
};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 一括変換エンジン
///
/// 1回の呼び出しが1バッチで、全件成功なら識別子をキーとするJSON
/// オブジェクトを、失敗なら最初に観測されたエラー1件だけを返す。
/// どちらの場合も戻る時点で生存中のワーカーは0。
pub struct BulkEngine<C, S, K, R> {
    converter: Arc<C>,
    source: Arc<S>,
    config: Arc<K>,
    reporter: Arc<R>,
    cancel: CancellationToken,
    gauge: WorkerGauge,
}

impl<C, S, K, R> BulkEngine<C, S, K, R>
where
    C: Converter + 'static,
    S: ContentSource + 'static,
    K: BulkConfig,
    R: ProgressReporter + 'static,
{
    pub fn new(converter: C, source: S, config: K, reporter: R) -> Self {
        Self {
            converter: Arc::new(converter),
            source: Arc::new(source),
            config: Arc::new(config),
            reporter: Arc::new(reporter),
            cancel: CancellationToken::new(),
            gauge: WorkerGauge::new(),
        }
    }

    /// 外部キャンセルトークンを設定
    ///
    /// トークンがキャンセルされると実行中のバッチは `Cancelled` で終わる。
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// 設定の並列度で一括変換
    pub async fn convert(
        &self,
        identifiers: Vec<String>,
        options: ConversionOptions,
    ) -> ConvertResult<Vec<u8>> {
        self.bulk_convert(self.config.requested_concurrency(), identifiers, options)
            .await
    }

    /// 指定された並列度で一括変換
    pub async fn bulk_convert(
        &self,
        concurrency: i64,
        identifiers: Vec<String>,
        options: ConversionOptions,
    ) -> ConvertResult<Vec<u8>> {
        Ok(self.run_batch(concurrency, identifiers, options).await?.output)
    }

    /// 一括変換してサマリー付きで返す
    pub async fn run_batch(
        &self,
        concurrency: i64,
        identifiers: Vec<String>,
        options: ConversionOptions,
    ) -> ConvertResult<BatchReport> {
        validate_config(self.config.as_ref())?;

        if identifiers.is_empty() {
            return Ok(BatchReport {
                output: b"{}".to_vec(),
                summary: BatchSummary {
                    total_items: 0,
                    worker_count: 0,
                    started_at: Utc::now(),
                    elapsed_ms: 0,
                },
            });
        }

        reject_duplicates(&identifiers)?;

        if self.cancel.is_cancelled() {
            return Err(ConvertError::Cancelled);
        }

        let degree = ConcurrencyDegree::resolve(concurrency, identifiers.len());
        tracing::debug!(
            requested = concurrency,
            workers = degree.get(),
            items = identifiers.len(),
            format = self.converter.format_name(),
            "resolved concurrency degree"
        );

        let plan = BatchPlan {
            identifiers,
            degree,
            buffer_size: self.config.channel_buffer_size(),
            options,
        };
        let pipeline = ConversionPipeline::new(
            Arc::clone(&self.converter),
            Arc::clone(&self.source),
            self.gauge.clone(),
        );

        let noop = NoOpProgressReporter::new();
        let reporter: &dyn ProgressReporter = if self.config.enable_progress_reporting() {
            self.reporter.as_ref()
        } else {
            &noop
        };

        pipeline.execute(plan, reporter, self.cancel.clone()).await
    }

    /// 生存中のワーカー数
    pub fn live_workers(&self) -> usize {
        self.gauge.live()
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &K {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}

/// 重複した識別子を拒否する
///
/// 集約マップのキーが入力と1対1に対応するよう、ワーカー起動前に検査する。
fn reject_duplicates(identifiers: &[String]) -> ConvertResult<()> {
    let mut seen = HashSet::with_capacity(identifiers.len());
    for identifier in identifiers {
        if !seen.insert(identifier.as_str()) {
            return Err(ConvertError::duplicate(identifier.clone()));
        }
    }
    Ok(())
}
