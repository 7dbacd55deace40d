//! In-process implementation of the link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{StoreError, UniqueField};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Link>,
    by_token: HashMap<String, usize>,
    by_long_url: HashMap<String, usize>,
}

/// Link storage held in process memory.
///
/// Both unique indexes and the rows sit behind a single lock, so the
/// uniqueness check and the insert happen as one step and increments are
/// never lost. Data does not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    table: RwLock<Table>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let mut table = self.table.write().await;

        if table.by_long_url.contains_key(&new_link.long_url) {
            return Err(StoreError::UniqueViolation(UniqueField::LongUrl));
        }
        if table.by_token.contains_key(&new_link.token) {
            return Err(StoreError::UniqueViolation(UniqueField::Token));
        }

        let index = table.rows.len();
        let now = Utc::now();
        let link = Link::new(
            index as i64 + 1,
            new_link.long_url,
            new_link.token,
            0,
            now,
            now,
        );

        table.by_long_url.insert(link.long_url.clone(), index);
        table.by_token.insert(link.token.clone(), index);
        table.rows.push(link.clone());

        Ok(link)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, StoreError> {
        let table = self.table.read().await;
        Ok(table.by_token.get(token).map(|&i| table.rows[i].clone()))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, StoreError> {
        let table = self.table.read().await;
        Ok(table.by_long_url.get(long_url).map(|&i| table.rows[i].clone()))
    }

    async fn increment_usage(&self, token: &str) -> Result<Option<Link>, StoreError> {
        let mut table = self.table.write().await;

        let Some(&index) = table.by_token.get(token) else {
            return Ok(None);
        };

        let link = &mut table.rows[index];
        link.usage_count += 1;
        link.updated_at = Utc::now();

        Ok(Some(link.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        let mut rows = self.table.read().await.rows.clone();
        rows.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(url: &str, token: &str) -> NewLink {
        NewLink {
            long_url: url.to_string(),
            token: token.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryLinkRepository::new();

        let created = repo
            .create(new_link("http://example.com", "abc123"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.usage_count, 0);

        let by_token = repo.find_by_token("abc123").await.unwrap().unwrap();
        let by_url = repo
            .find_by_long_url("http://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_token, created);
        assert_eq!(by_url, created);
    }

    #[tokio::test]
    async fn test_duplicate_long_url_is_rejected() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("http://example.com", "first1"))
            .await
            .unwrap();

        let result = repo.create(new_link("http://example.com", "second")).await;
        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation(UniqueField::LongUrl))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_token_is_rejected() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("http://one.com", "same01"))
            .await
            .unwrap();

        let result = repo.create(new_link("http://two.com", "same01")).await;
        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation(UniqueField::Token))
        ));
        assert!(repo.find_by_long_url("http://two.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_increment_usage_refreshes_updated_at() {
        let repo = MemoryLinkRepository::new();
        let created = repo
            .create(new_link("http://example.com", "abc123"))
            .await
            .unwrap();

        let updated = repo.increment_usage("abc123").await.unwrap().unwrap();
        assert_eq!(updated.usage_count, 1);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_increment_unknown_token_writes_nothing() {
        let repo = MemoryLinkRepository::new();
        assert!(repo.increment_usage("nope").await.unwrap().is_none());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_orders_by_updated_at() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("http://one.com", "one111")).await.unwrap();
        repo.create(new_link("http://two.com", "two222")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.increment_usage("one111").await.unwrap();

        let tokens: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.token)
            .collect();
        assert_eq!(tokens, vec!["two222", "one111"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(MemoryLinkRepository::new());
        repo.create(new_link("http://example.com", "abc123"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_usage("abc123").await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let link = repo.find_by_token("abc123").await.unwrap().unwrap();
        assert_eq!(link.usage_count, 50);
    }
}
