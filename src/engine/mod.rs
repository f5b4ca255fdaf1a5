// エンジン層 - 並列変換とオーケストレーション
// Producer、Consumer、Aggregatorを組み合わせて1バッチを実行する

pub mod aggregator;
pub mod api;
pub mod bulk_engine;
pub mod consumer;
mod pipeline;
pub mod producer;

// 公開API
pub use aggregator::ResultAggregator;
pub use api::{bulk_convert, create_default_engine, create_quiet_engine, HclFileEngine};
pub use bulk_engine::BulkEngine;
pub use consumer::WorkerGauge;
