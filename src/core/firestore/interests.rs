use crate::core::interests::constants::{FIELD_ENTITY_ID, FIELD_USER_ID};
use crate::core::interests::{InterestRow, InterestStore};
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use firestore::FirestoreDb;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

/// Document shape of a single interest row
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InterestDoc {
    user_id: String,
    entity_id: String,
    #[serde(with = "firestore::serialize_as_timestamp")]
    created_at: DateTime<Utc>,
}

impl From<InterestRow> for InterestDoc {
    fn from(row: InterestRow) -> Self {
        Self {
            user_id: row.user_id,
            entity_id: row.entity_id,
            created_at: row.created_at,
        }
    }
}

/// Interest rows kept in a Firestore collection, one document per
/// like under a random document id. Firestore has no uniqueness
/// constraint on (user_id, entity_id) so neither does this store
pub struct FirestoreInterestStore {
    db: Arc<FirestoreDb>,
    collection: String,
}

impl FirestoreInterestStore {
    pub fn new(db: Arc<FirestoreDb>, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }

    /// Document ids of every row matching the user and entity
    async fn matching_doc_ids(&self, user_id: &str, entity_id: &str) -> Result<Vec<String>, Error> {
        let docs = self
            .db
            .fluent()
            .select()
            .from(self.collection.as_str())
            .filter(|q| {
                q.for_all([
                    q.field(FIELD_USER_ID).eq(user_id),
                    q.field(FIELD_ENTITY_ID).eq(entity_id),
                ])
            })
            .query()
            .await?;

        Ok(docs
            .iter()
            .map(|doc| {
                doc.name
                    .rsplit('/')
                    .next()
                    .unwrap_or(&doc.name)
                    .to_string()
            })
            .collect())
    }
}

#[async_trait]
impl InterestStore for FirestoreInterestStore {
    async fn insert(&self, row: InterestRow) -> Result<(), Error> {
        let doc_id = Uuid::new_v4().to_string();
        let doc = InterestDoc::from(row);

        let _: InterestDoc = self
            .db
            .fluent()
            .insert()
            .into(self.collection.as_str())
            .document_id(&doc_id)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| {
                error!(
                    "Firestore insert failed for collection {}: {}",
                    self.collection, e
                );
                anyhow!(e)
            })?;

        debug!(
            "Inserted interest doc {} for user {} entity {}",
            doc_id, doc.user_id, doc.entity_id
        );

        Ok(())
    }

    async fn delete(&self, user_id: &str, entity_id: &str) -> Result<(), Error> {
        let doc_ids = self.matching_doc_ids(user_id, entity_id).await?;

        for doc_id in &doc_ids {
            self.db
                .fluent()
                .delete()
                .from(self.collection.as_str())
                .document_id(doc_id)
                .execute()
                .await
                .map_err(|e| {
                    error!(
                        "Firestore delete of {} failed for collection {}: {}",
                        doc_id, self.collection, e
                    );
                    anyhow!(e)
                })?;
        }

        debug!(
            "Deleted {} interest docs for user {} entity {}",
            doc_ids.len(),
            user_id,
            entity_id
        );

        Ok(())
    }

    async fn select(&self, user_id: &str) -> Result<Vec<String>, Error> {
        let docs: Vec<InterestDoc> = self
            .db
            .fluent()
            .select()
            .from(self.collection.as_str())
            .filter(|q| q.for_all([q.field(FIELD_USER_ID).eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| {
                error!(
                    "Firestore query failed for collection {}: {}",
                    self.collection, e
                );
                anyhow!(e)
            })?;

        // duplicate rows are possible, the caller only needs the id set
        let mut seen = HashSet::with_capacity(docs.len());
        let ids = docs
            .into_iter()
            .filter(|doc| seen.insert(doc.entity_id.clone()))
            .map(|doc| doc.entity_id)
            .collect::<Vec<_>>();

        debug!(
            "Loaded {} liked ids for user {} from {}",
            ids.len(),
            user_id,
            self.collection
        );

        Ok(ids)
    }
}
