use super::ContentSource;
use anyhow::Result;
use async_trait::async_trait;

/// ローカルファイルシステム用のContentSource
///
/// 識別子はそのままファイルパスとして扱う。
#[derive(Clone, Debug, Default)]
pub struct LocalFileSource;

impl LocalFileSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentSource for LocalFileSource {
    async fn read_item(&self, id: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(id).await?)
    }
}
