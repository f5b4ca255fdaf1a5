// Consumer - 並列ワーカー機能

use crate::{
    converter::Converter,
    core::{ConversionFailure, ConversionOptions, ConversionResult, ConvertError, WorkerOutcome},
    storage::ContentSource,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// 生存中のワーカー数
#[derive(Debug, Clone, Default)]
pub struct WorkerGauge {
    live: Arc<AtomicUsize>,
}

impl WorkerGauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn enter(&self) -> WorkerGuard {
        self.live.fetch_add(1, Ordering::SeqCst);
        WorkerGuard {
            live: Arc::clone(&self.live),
        }
    }
}

/// ドロップ時にワーカー数を減らす
struct WorkerGuard {
    live: Arc<AtomicUsize>,
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// ワーカー間で共有する依存関係
pub struct WorkerContext<C, S> {
    pub converter: Arc<C>,
    pub source: Arc<S>,
    pub options: ConversionOptions,
    pub cancel: CancellationToken,
    pub gauge: WorkerGauge,
}

impl<C, S> Clone for WorkerContext<C, S> {
    fn clone(&self) -> Self {
        Self {
            converter: Arc::clone(&self.converter),
            source: Arc::clone(&self.source),
            options: self.options,
            cancel: self.cancel.clone(),
            gauge: self.gauge.clone(),
        }
    }
}

/// 単一識別子の変換
///
/// 内容の取得は非同期で行い、変換処理はブロッキングプールで実行する。
pub async fn convert_single_item<C, S>(
    converter: &Arc<C>,
    source: &S,
    identifier: &str,
    options: ConversionOptions,
) -> Result<Vec<u8>, ConvertError>
where
    C: Converter + 'static,
    S: ContentSource + ?Sized,
{
    let content = source
        .read_item(identifier)
        .await
        .map_err(|e| ConvertError::access(identifier, e))?;

    let converter = Arc::clone(converter);
    let label = identifier.to_string();
    tokio::task::spawn_blocking(move || converter.convert(&content, &label, &options))
        .await
        .map_err(|e| ConvertError::converter_task(identifier, e))?
}

/// 単一Consumerワーカー
///
/// 作業チャンネルから取り出すたびにキャンセルを確認し、失敗したら
/// それ以上作業を取らずに終了する。
pub fn spawn_single_consumer<C, S>(
    worker_id: usize,
    ctx: WorkerContext<C, S>,
    work_rx: Arc<Mutex<mpsc::Receiver<String>>>,
    outcome_tx: mpsc::Sender<WorkerOutcome>,
) -> tokio::task::JoinHandle<()>
where
    C: Converter + 'static,
    S: ContentSource + 'static,
{
    let guard = ctx.gauge.enter();

    tokio::spawn(async move {
        let _guard = guard;
        let mut converted = 0usize;

        loop {
            // 次の作業を取得
            let identifier = {
                let mut rx = work_rx.lock().await;
                tokio::select! {
                    biased;
                    _ = ctx.cancel.cancelled() => break,
                    next = rx.recv() => match next {
                        Some(identifier) => identifier,
                        None => break, // チャンネル終了
                    },
                }
            };

            let outcome = match convert_single_item(
                &ctx.converter,
                ctx.source.as_ref(),
                &identifier,
                ctx.options,
            )
            .await
            {
                Ok(payload) => WorkerOutcome::Converted(ConversionResult {
                    identifier,
                    payload,
                }),
                Err(error) => WorkerOutcome::Failed(ConversionFailure { identifier, error }),
            };

            let failed = matches!(outcome, WorkerOutcome::Failed(_));
            if outcome_tx.send(outcome).await.is_err() {
                // 結果チャンネルが閉じられた場合は終了
                break;
            }
            if failed {
                break;
            }
            converted += 1;
        }

        tracing::debug!(worker_id, converted, "worker exited");
    })
}

/// Consumers: 並列ワーカープール
pub fn spawn_consumers<C, S>(
    ctx: WorkerContext<C, S>,
    work_rx: mpsc::Receiver<String>,
    outcome_tx: mpsc::Sender<WorkerOutcome>,
    worker_count: usize,
) -> Vec<tokio::task::JoinHandle<()>>
where
    C: Converter + 'static,
    S: ContentSource + 'static,
{
    let work_rx = Arc::new(Mutex::new(work_rx));

    (0..worker_count)
        .map(|worker_id| {
            spawn_single_consumer(
                worker_id,
                ctx.clone(),
                Arc::clone(&work_rx),
                outcome_tx.clone(),
            )
        })
        .collect()
}
