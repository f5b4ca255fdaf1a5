// Pipeline - Producer-Consumer-Aggregator パイプライン
// 1バッチ分のファンアウト/ファンインと終了待ち

use super::{
    aggregator::ResultAggregator,
    consumer::{spawn_consumers, WorkerContext, WorkerGauge},
    producer::spawn_producer,
};
use crate::{
    converter::Converter,
    core::{
        BatchReport, BatchSummary, ConcurrencyDegree, ConversionOptions, ConvertError,
        ConvertResult, ProgressReporter, WorkerOutcome,
    },
    storage::ContentSource,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// 1バッチ分の実行パラメータ
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub identifiers: Vec<String>,
    pub degree: ConcurrencyDegree,
    pub buffer_size: usize,
    pub options: ConversionOptions,
}

/// 責任が明確に分離されたパイプライン
pub struct ConversionPipeline<C, S> {
    converter: Arc<C>,
    source: Arc<S>,
    gauge: WorkerGauge,
}

impl<C, S> ConversionPipeline<C, S>
where
    C: Converter + 'static,
    S: ContentSource + 'static,
{
    pub fn new(converter: Arc<C>, source: Arc<S>, gauge: WorkerGauge) -> Self {
        Self {
            converter,
            source,
            gauge,
        }
    }

    /// 識別子リストを変換して集約する
    ///
    /// 空でないリストを前提とする。戻る時点で全ワーカーとProducerは
    /// 終了している。
    pub async fn execute<R>(
        &self,
        plan: BatchPlan,
        reporter: &R,
        cancel: CancellationToken,
    ) -> ConvertResult<BatchReport>
    where
        R: ProgressReporter + ?Sized,
    {
        let started_at = Utc::now();
        let start_time = Instant::now();

        let total = plan.identifiers.len();
        let worker_count = plan.degree.get();
        reporter.report_started(total, worker_count).await;

        // 最初の失敗でこのバッチだけをキャンセルする
        let batch_cancel = cancel.child_token();

        let (work_tx, work_rx) = mpsc::channel::<String>(plan.buffer_size);
        let (outcome_tx, outcome_rx) = mpsc::channel::<WorkerOutcome>(worker_count);

        // Producer起動
        let producer_handle = spawn_producer(plan.identifiers, work_tx, batch_cancel.clone());

        // Consumer Pool起動。outcome_txはワーカーだけが持つ
        let ctx = WorkerContext {
            converter: Arc::clone(&self.converter),
            source: Arc::clone(&self.source),
            options: plan.options,
            cancel: batch_cancel.clone(),
            gauge: self.gauge.clone(),
        };
        let consumer_handles = spawn_consumers(ctx, work_rx, outcome_tx, worker_count);

        // 全ワーカーが送信側をドロップするまで集約
        let aggregator = ResultAggregator::new()
            .run(outcome_rx, total, batch_cancel.clone(), reporter)
            .await;

        // 終了待ち。エラーがあっても全タスクを待ってから返す
        let mut join_error = producer_handle.await.err();
        for handle in consumer_handles {
            if let Err(e) = handle.await {
                join_error.get_or_insert(e);
            }
        }

        let converted = aggregator.converted();
        let failed = aggregator.has_failed();
        reporter.report_completed(converted, failed).await;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        tracing::debug!(converted, failed, elapsed_ms, "batch finished");

        if let Some(e) = join_error {
            return Err(ConvertError::task(e));
        }

        let output = aggregator.finish().map_err(|failure| failure.error)?;
        if converted < total {
            // 失敗なしで件数が足りないのは外部キャンセルのみ
            return Err(ConvertError::Cancelled);
        }

        Ok(BatchReport {
            output,
            summary: BatchSummary {
                total_items: total,
                worker_count,
                started_at,
                elapsed_ms,
            },
        })
    }
}
