// Producer - 識別子の配信機能

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Producer: 識別子を入力順に作業チャンネルへ配信
///
/// 全件送信するか、キャンセルされるか、全ワーカーが終了して受信側が
/// 閉じられた時点で終了する。work_txのドロップが「作業終了」の合図になる。
pub fn spawn_producer(
    identifiers: Vec<String>,
    work_tx: mpsc::Sender<String>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let total = identifiers.len();
        let mut dispatched = 0usize;

        for identifier in identifiers {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                sent = work_tx.send(identifier) => {
                    if sent.is_err() {
                        // 受信側が閉じられた場合は正常終了
                        break;
                    }
                    dispatched += 1;
                }
            }
        }

        tracing::debug!(dispatched, total, "producer finished");
    })
}
