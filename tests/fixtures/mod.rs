// 統合テスト用のフェイク実装とヘルパー

#![allow(dead_code)]

use hcl2json::converter::Converter;
use hcl2json::core::{ConversionOptions, ConvertError, ConvertResult};
use hcl2json::services::{DefaultBulkConfig, NoOpProgressReporter};
use hcl2json::storage::MemorySource;
use hcl2json::BulkEngine;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 呼び出し回数と同時実行数の記録
#[derive(Debug, Default)]
pub struct CallStats {
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl CallStats {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    fn enter(&self, label: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(label.to_string());
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// 内容をそのままJSONとして返すフェイク変換器
///
/// `failing` に含まれるラベルはフォーマットエラーになる。遅延を設定すると
/// ラベルとシードから決まる時間だけブロックする。
pub struct EchoConverter {
    failing: HashSet<String>,
    panicking: HashSet<String>,
    delay: Option<(u64, u64)>,
    stats: Arc<CallStats>,
}

impl EchoConverter {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            panicking: HashSet::new(),
            delay: None,
            stats: Arc::new(CallStats::default()),
        }
    }

    pub fn failing_on(mut self, label: &str) -> Self {
        self.failing.insert(label.to_string());
        self
    }

    pub fn panicking_on(mut self, label: &str) -> Self {
        self.panicking.insert(label.to_string());
        self
    }

    /// 1件あたり最大 `max_millis` ミリ秒の遅延をシードごとに変えて入れる
    pub fn with_jitter(mut self, seed: u64, max_millis: u64) -> Self {
        self.delay = Some((seed, max_millis));
        self
    }

    pub fn stats(&self) -> Arc<CallStats> {
        Arc::clone(&self.stats)
    }

    fn delay_for(&self, label: &str) -> Option<Duration> {
        let (seed, max_millis) = self.delay?;
        // FNV-1a
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325 ^ seed;
        for byte in label.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Some(Duration::from_millis(hash % (max_millis + 1)))
    }
}

impl Converter for EchoConverter {
    fn convert(
        &self,
        content: &[u8],
        label: &str,
        _options: &ConversionOptions,
    ) -> ConvertResult<Vec<u8>> {
        self.stats.enter(label);
        if let Some(delay) = self.delay_for(label) {
            std::thread::sleep(delay);
        }
        self.stats.leave();

        if self.panicking.contains(label) {
            panic!("converter blew up");
        }
        if self.failing.contains(label) {
            return Err(ConvertError::format(label, "rejected by test converter"));
        }
        Ok(content.to_vec())
    }

    fn format_name(&self) -> &'static str {
        "echo"
    }
}

/// `item-000` 形式の識別子を生成
pub fn item_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item-{i:03}")).collect()
}

/// 識別子ごとに `{"index":N}` を返すソース
pub fn indexed_source(ids: &[String]) -> MemorySource {
    ids.iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), format!(r#"{{"index":{i}}}"#).into_bytes()))
        .collect()
}

pub type EchoEngine = BulkEngine<EchoConverter, MemorySource, DefaultBulkConfig, NoOpProgressReporter>;

pub fn echo_engine(converter: EchoConverter, source: MemorySource) -> EchoEngine {
    BulkEngine::new(
        converter,
        source,
        DefaultBulkConfig::new(2),
        NoOpProgressReporter::new(),
    )
}
