//! The persisted "last spec" slot.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Key under which the last spec string is stored.
pub const LAST_SPEC_KEY: &str = "lastSpec";

/// Reads and writes the last spec string a user entered.
#[derive(Clone)]
pub struct LastSpec {
    store: Arc<dyn KeyValueStore>,
}

impl LastSpec {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The saved spec, if any. Blank values count as unset.
    pub async fn load(&self) -> Result<Option<String>, StoreError> {
        let value = self.store.get(LAST_SPEC_KEY).await?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }

    /// Save `spec`, trimmed. Blank specs are ignored.
    pub async fn save(&self, spec: &str) -> Result<(), StoreError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(());
        }
        self.store.set(LAST_SPEC_KEY, spec).await?;
        debug!("Saved last spec '{}'", spec);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_load_empty() {
        let last = LastSpec::new(Arc::new(MemoryStore::new()));
        assert!(last.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_trimmed() {
        let store = Arc::new(MemoryStore::new());
        let last = LastSpec::new(store.clone());

        last.save("  1-3;5:2  ").await.unwrap();
        assert_eq!(last.load().await.unwrap().as_deref(), Some("1-3;5:2"));
        assert_eq!(store.get(LAST_SPEC_KEY).await.unwrap().as_deref(), Some("1-3;5:2"));
    }

    #[tokio::test]
    async fn test_blank_save_keeps_previous() {
        let last = LastSpec::new(Arc::new(MemoryStore::new()));
        last.save("4").await.unwrap();
        last.save("   ").await.unwrap();
        assert_eq!(last.load().await.unwrap().as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_blank_stored_value_is_unset() {
        let store = Arc::new(MemoryStore::new());
        store.set(LAST_SPEC_KEY, " ").await.unwrap();
        let last = LastSpec::new(store);
        assert!(last.load().await.unwrap().is_none());
    }
}
