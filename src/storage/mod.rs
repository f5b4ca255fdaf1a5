use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;

pub mod local;
pub mod memory;

pub use local::LocalFileSource;
pub use memory::MemorySource;

/// 識別子から変換対象の内容を取得するバックエンドのトレイト
#[automock]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// アイテムのデータを読み込む
    async fn read_item(&self, id: &str) -> Result<Vec<u8>>;
}

// ContentSource for Box<dyn ContentSource>
#[async_trait]
impl ContentSource for Box<dyn ContentSource> {
    async fn read_item(&self, id: &str) -> Result<Vec<u8>> {
        self.as_ref().read_item(id).await
    }
}

// ContentSource for Arc<S>
#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Arc<S> {
    async fn read_item(&self, id: &str) -> Result<Vec<u8>> {
        self.as_ref().read_item(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_boxed_source_delegates() {
        let mut mock_source = MockContentSource::new();
        mock_source
            .expect_read_item()
            .with(eq("a.tf"))
            .times(1)
            .returning(|_| Ok(b"a = 1".to_vec()));

        let boxed: Box<dyn ContentSource> = Box::new(mock_source);
        assert_eq!(boxed.read_item("a.tf").await.unwrap(), b"a = 1".to_vec());
    }
}
