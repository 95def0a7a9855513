use crate::core::interests::model::InterestRow;
use crate::core::interests::store::InterestStore;
use anyhow::Error;
use async_trait::async_trait;
use dashmap::DashMap;

/// In-process interest store for development and tests, used when
/// no hosted backend is configured. Rows are appended as-is, so like
/// the hosted store it performs no duplicate checks
#[derive(Default)]
pub struct LocalInterestStore {
    /// user id -> rows in insertion order
    rows: DashMap<String, Vec<InterestRow>>,
}

impl LocalInterestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of raw rows held for a user, duplicates included
    pub fn row_count(&self, user_id: &str) -> usize {
        self.rows.get(user_id).map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl InterestStore for LocalInterestStore {
    async fn insert(&self, row: InterestRow) -> Result<(), Error> {
        self.rows.entry(row.user_id.clone()).or_default().push(row);

        Ok(())
    }

    async fn delete(&self, user_id: &str, entity_id: &str) -> Result<(), Error> {
        if let Some(mut rows) = self.rows.get_mut(user_id) {
            rows.retain(|r| r.entity_id != entity_id);
        }

        Ok(())
    }

    async fn select(&self, user_id: &str) -> Result<Vec<String>, Error> {
        let ids = match self.rows.get(user_id) {
            Some(rows) => rows.iter().map(|r| r.entity_id.clone()).collect(),
            None => Vec::new(),
        };

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_select_delete() {
        let store = LocalInterestStore::new();

        store.insert(InterestRow::new("u1", "p1")).await.unwrap();
        store.insert(InterestRow::new("u1", "p2")).await.unwrap();
        store.insert(InterestRow::new("u2", "p1")).await.unwrap();

        assert_eq!(store.select("u1").await.unwrap(), vec!["p1", "p2"]);

        store.delete("u1", "p1").await.unwrap();
        assert_eq!(store.select("u1").await.unwrap(), vec!["p2"]);
        assert_eq!(
            store.select("u2").await.unwrap(),
            vec!["p1"],
            "Deletes are scoped to the user"
        );
    }

    #[tokio::test]
    async fn test_no_uniqueness_enforced() {
        let store = LocalInterestStore::new();

        store.insert(InterestRow::new("u1", "p1")).await.unwrap();
        store.insert(InterestRow::new("u1", "p1")).await.unwrap();
        assert_eq!(store.row_count("u1"), 2);

        store.delete("u1", "p1").await.unwrap();
        assert_eq!(store.row_count("u1"), 0, "Delete removes every match");
        assert!(store.select("missing").await.unwrap().is_empty());
    }
}
