// Aggregator - 結果収集と集約機能

use crate::core::{ConversionFailure, ConvertError, ProgressReporter, WorkerOutcome};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// 集約マップの唯一の所有者
///
/// 値は再エンコードせず、Converterが出力したJSONをそのまま保持する。
/// キーは整列済みなので、完了順に関係なく同じバイト列になる。
#[derive(Debug, Default)]
pub struct ResultAggregator {
    outputs: BTreeMap<String, Box<RawValue>>,
    first_failure: Option<ConversionFailure>,
    discarded: usize,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn converted(&self) -> usize {
        self.outputs.len()
    }

    pub fn has_failed(&self) -> bool {
        self.first_failure.is_some()
    }

    /// 1件の結果を取り込む。失敗が確定した場合は true を返す
    pub fn accept(&mut self, outcome: WorkerOutcome) -> bool {
        if self.first_failure.is_some() {
            self.discarded += 1;
            return false;
        }

        match outcome {
            WorkerOutcome::Converted(result) => {
                match serde_json::from_slice::<Box<RawValue>>(&result.payload) {
                    Ok(raw) => {
                        let previous = self.outputs.insert(result.identifier, raw);
                        debug_assert!(previous.is_none(), "identifier dispatched twice");
                        false
                    }
                    Err(e) => {
                        let error = ConvertError::aggregation(
                            format!("payload for {}", result.identifier),
                            e,
                        );
                        self.first_failure = Some(ConversionFailure {
                            identifier: result.identifier,
                            error,
                        });
                        true
                    }
                }
            }
            WorkerOutcome::Failed(failure) => {
                self.first_failure = Some(failure);
                true
            }
        }
    }

    /// 集約結果を確定する
    pub fn finish(self) -> Result<Vec<u8>, ConversionFailure> {
        if let Some(failure) = self.first_failure {
            return Err(failure);
        }

        serde_json::to_vec(&self.outputs).map_err(|e| ConversionFailure {
            identifier: String::new(),
            error: ConvertError::aggregation("final output", e),
        })
    }

    /// 結果チャンネルが閉じるまで受信を続ける
    ///
    /// 最初の失敗でキャンセルを発行するが、その後も全ワーカーが送信側を
    /// ドロップするまで受信を続けるので、送信待ちのワーカーは残らない。
    pub async fn run<R>(
        mut self,
        mut outcome_rx: mpsc::Receiver<WorkerOutcome>,
        total: usize,
        cancel: CancellationToken,
        reporter: &R,
    ) -> Self
    where
        R: ProgressReporter + ?Sized,
    {
        while let Some(outcome) = outcome_rx.recv().await {
            if self.accept(outcome) {
                if let Some(failure) = &self.first_failure {
                    tracing::warn!(
                        identifier = %failure.identifier,
                        kind = failure.error.kind(),
                        "first failure observed, cancelling batch"
                    );
                    reporter
                        .report_error(&failure.identifier, &failure.error.to_string())
                        .await;
                }
                cancel.cancel();
            } else if self.first_failure.is_none() {
                reporter.report_progress(self.converted(), total).await;
            }
        }

        if self.discarded > 0 {
            tracing::debug!(discarded = self.discarded, "outcomes discarded after failure");
        }
        self
    }
}
