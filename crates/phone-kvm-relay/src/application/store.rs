//! `ContentStore`: the single in-memory slot behind `/content`.

use phone_kvm_core::ContentPayload;
use tokio::sync::Mutex;

/// Holds the latest payload.  Starts as empty text.
///
/// Writers replace the whole value and readers clone it, so a reader never
/// observes half of an update.
#[derive(Debug, Default)]
pub struct ContentStore {
    latest: Mutex<ContentPayload>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored payload and returns a copy of what is now stored.
    pub async fn set(&self, payload: ContentPayload) -> ContentPayload {
        let mut latest = self.latest.lock().await;
        *latest = payload;
        latest.clone()
    }

    pub async fn get(&self) -> ContentPayload {
        self.latest.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_new_store_holds_empty_text() {
        let store = ContentStore::new();
        assert_eq!(store.get().await, ContentPayload::text(""));
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        // Arrange
        let store = ContentStore::new();

        // Act
        store.set(ContentPayload::text("first")).await;
        let echoed = store.set(ContentPayload::launch("weixin://")).await;

        // Assert
        assert_eq!(echoed, ContentPayload::launch("weixin://"));
        assert_eq!(store.get().await, ContentPayload::launch("weixin://"));
    }

    #[tokio::test]
    async fn test_concurrent_writers_leave_one_whole_payload() {
        // Arrange
        let store = Arc::new(ContentStore::new());
        let writers: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store.set(ContentPayload::text(format!("payload-{i}"))).await;
                })
            })
            .collect();

        // Act
        for writer in writers {
            writer.await.unwrap();
        }

        // Assert: whichever write landed last is intact
        let latest = store.get().await;
        assert!(latest.content.starts_with("payload-"));
        assert!(!latest.launch_app);
    }
}
