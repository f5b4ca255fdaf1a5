// 一括変換に関連するデータ型定義

use super::error::ConvertError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Converterに渡す変換オプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// 変数や未知の関数を含まない式を評価して単純化する
    pub simplify: bool,
}

/// 実効並列度
///
/// 要求値を `[1, 入力件数]` に収めたワーカー数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyDegree(usize);

impl ConcurrencyDegree {
    /// 要求された並列度を入力件数に合わせて丸める
    pub fn resolve(requested: i64, item_count: usize) -> Self {
        let upper = i64::try_from(item_count).unwrap_or(i64::MAX).max(1);
        // upper >= 1 なので結果は常に usize に収まる
        Self(requested.clamp(1, upper) as usize)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// 1件分の変換成功結果
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub identifier: String,
    pub payload: Vec<u8>,
}

/// 1件分の変換失敗
#[derive(Debug)]
pub struct ConversionFailure {
    pub identifier: String,
    pub error: ConvertError,
}

/// ワーカーからAggregatorへ送られる個別処理の結果
#[derive(Debug)]
pub enum WorkerOutcome {
    Converted(ConversionResult),
    Failed(ConversionFailure),
}

/// バッチ全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_items: usize,
    pub worker_count: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// バッチの最終結果
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// 識別子をキーとするJSONオブジェクト
    pub output: Vec<u8>,
    pub summary: BatchSummary,
}
