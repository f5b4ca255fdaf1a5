// 設定管理の具象実装

use crate::core::{BulkConfig, ConvertError, ConvertResult};

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultBulkConfig {
    concurrency: i64,
    buffer_size: usize,
    enable_progress: bool,
}

impl DefaultBulkConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            concurrency: Self::concurrency_for(cpu_count),
            buffer_size: 100,
            enable_progress: true,
        }
    }

    fn concurrency_for(cpu_count: usize) -> i64 {
        i64::try_from(cpu_count.max(1) * 2).unwrap_or(i64::MAX)
    }

    /// 並列度を上書き（0以下は実行時に1として扱われる）
    pub fn with_concurrency(mut self, concurrency: i64) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 設定値の検証
    pub fn validate(&self) -> ConvertResult<()> {
        validate_config(self)
    }
}

impl Default for DefaultBulkConfig {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl BulkConfig for DefaultBulkConfig {
    fn requested_concurrency(&self) -> i64 {
        self.concurrency
    }

    fn channel_buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// 任意のBulkConfigの検証
pub fn validate_config<C: BulkConfig + ?Sized>(config: &C) -> ConvertResult<()> {
    if config.channel_buffer_size() == 0 {
        return Err(ConvertError::configuration(
            "channel buffer size must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bulk_config() {
        let config = DefaultBulkConfig::default();

        assert_eq!(
            config.requested_concurrency(),
            (num_cpus::get().max(1) * 2) as i64
        );
        assert_eq!(config.channel_buffer_size(), 100);
        assert!(config.enable_progress_reporting());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bulk_config_builder() {
        let config = DefaultBulkConfig::new(4)
            .with_concurrency(-1)
            .with_buffer_size(8)
            .with_progress_reporting(false);

        assert_eq!(config.requested_concurrency(), -1);
        assert_eq!(config.channel_buffer_size(), 8);
        assert!(!config.enable_progress_reporting());
    }

    #[test]
    fn test_zero_cpu_count_still_yields_workers() {
        assert_eq!(DefaultBulkConfig::new(0).requested_concurrency(), 2);
    }

    #[test]
    fn test_zero_buffer_is_rejected() {
        let result = DefaultBulkConfig::new(1).with_buffer_size(0).validate();

        assert!(matches!(result, Err(ConvertError::Configuration { .. })));
    }
}
