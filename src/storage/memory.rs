use super::ContentSource;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// メモリ上の内容を返すContentSource
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    items: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.items.insert(id.into(), content.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MemorySource
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn read_item(&self, id: &str) -> Result<Vec<u8>> {
        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("no such item"))
    }
}
