// 高レベル公開API
// HCLファイルをローカルから読む構成のエンジンを簡単に使うための関数

use super::BulkEngine;
use crate::{
    converter::HclConverter,
    core::{ConversionOptions, ConvertResult},
    services::{DefaultBulkConfig, LoggingProgressReporter, NoOpProgressReporter},
    storage::LocalFileSource,
};

/// 標準構成のエンジン（tracingで進捗報告）
pub type HclFileEngine<R> = BulkEngine<HclConverter, LocalFileSource, DefaultBulkConfig, R>;

/// デフォルト設定でエンジンを作成
pub fn create_default_engine() -> HclFileEngine<LoggingProgressReporter> {
    BulkEngine::new(
        HclConverter::new(),
        LocalFileSource::new(),
        DefaultBulkConfig::default(),
        LoggingProgressReporter::new(),
    )
}

/// 静音版のエンジンを作成（テスト・組み込み用）
pub fn create_quiet_engine() -> HclFileEngine<NoOpProgressReporter> {
    BulkEngine::new(
        HclConverter::new(),
        LocalFileSource::new(),
        DefaultBulkConfig::default(),
        NoOpProgressReporter::new(),
    )
}

/// 複数のHCLファイルを並列に変換し、パスをキーとするJSONオブジェクトを返す
///
/// ```text
/// {
///   "path/to/file.tf": {"resource": {"aws_route53_record": {...}}},
///   "path/to/otherfile.tf": {"variable": {"foo": {"value": "bar"}}}
/// }
/// ```
pub async fn bulk_convert(
    concurrency: i64,
    paths: Vec<String>,
    options: ConversionOptions,
) -> ConvertResult<Vec<u8>> {
    create_quiet_engine()
        .bulk_convert(concurrency, paths, options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::Converter;
    use crate::core::{BulkConfig, ConvertError};
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bulk_convert_files() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.tf");
        let b = temp_dir.path().join("b.tf");
        fs::write(&a, "x = 1\n").unwrap();
        fs::write(&b, "y = 2\n").unwrap();

        let a = a.to_str().unwrap().to_string();
        let b = b.to_str().unwrap().to_string();
        let output = bulk_convert(10, vec![a.clone(), b.clone()], ConversionOptions::default())
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[&a], serde_json::json!({"x": 1}));
        assert_eq!(value[&b], serde_json::json!({"y": 2}));
    }

    #[tokio::test]
    async fn test_bulk_convert_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("main.tf");
        fs::write(&present, "x = 1\n").unwrap();
        let missing = temp_dir.path().join("nonexistent.tf");

        let missing = missing.to_str().unwrap().to_string();
        let error = bulk_convert(
            10,
            vec![present.to_str().unwrap().to_string(), missing.clone()],
            ConversionOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(error, ConvertError::Access { .. }));
        assert!(error
            .to_string()
            .starts_with(&format!("failed to open file: {missing}")));
    }

    #[tokio::test]
    async fn test_bulk_convert_empty() {
        let output = bulk_convert(10, vec![], ConversionOptions::default())
            .await
            .unwrap();
        assert_eq!(output, b"{}".to_vec());
    }

    #[test]
    fn test_create_engines() {
        let engine = create_default_engine();
        assert!(engine.config().enable_progress_reporting());
        assert_eq!(engine.live_workers(), 0);

        let quiet = create_quiet_engine();
        assert_eq!(quiet.converter().format_name(), "hcl");
    }
}
