//! SurrealDB implementation of [`PartitionStore`].
//!
//! Partitions are plain schemaless tables whose names are computed at
//! runtime. Reads and writes address them through `type::table($tb)`
//! binds; `REMOVE TABLE` does not accept a computed expression, so the
//! drop path quotes the name as an escaped identifier instead.

use chrono::Utc;
use orgman_core::error::OrgResult;
use orgman_core::repository::PartitionStore;
use serde_json::{Value, json};
use surrealdb::{Connection, Surreal};
use tracing::{info, warn};

use crate::error::DbError;

/// Quote a computed table name as a SurrealQL identifier.
fn quoted_table(name: &str) -> String {
    format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
}

/// SurrealDB-backed store for per-organization data partitions.
#[derive(Clone)]
pub struct SurrealPartitionStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPartitionStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn insert_documents(&self, partition_name: &str, documents: Vec<Value>) -> OrgResult<()> {
        // INSERT INTO rejects a computed table name; CREATE accepts one.
        for document in documents {
            self.db
                .query("CREATE type::table($tb) CONTENT $document")
                .bind(("tb", partition_name.to_string()))
                .bind(("document", document))
                .await
                .map_err(DbError::from)?
                .check()
                .map_err(|e| DbError::Query(e.to_string()))?;
        }

        Ok(())
    }
}

impl<C: Connection> PartitionStore for SurrealPartitionStore<C> {
    async fn create(&self, partition_name: &str) -> OrgResult<()> {
        // The table comes into being with its first record. The marker
        // document makes creation observable even before any tenant
        // data arrives.
        let marker = json!({
            "initialized": true,
            "type": "initialization",
            "created_at": Utc::now().to_rfc3339(),
        });

        self.insert_documents(partition_name, vec![marker]).await?;

        info!(partition = partition_name, "Partition created");

        Ok(())
    }

    async fn rename(&self, old_name: &str, new_name: &str) -> OrgResult<()> {
        // Copy-then-drop; there is no atomic table rename. A crash
        // between the copy and the drop leaves both tables present.
        let documents = self.documents(old_name).await?;
        let count = documents.len();

        if documents.is_empty() {
            warn!(partition = old_name, "Source partition has no documents");
        } else {
            self.insert_documents(new_name, documents).await?;
        }

        self.drop(old_name).await?;

        info!(
            from = old_name,
            to = new_name,
            documents = count,
            "Partition migrated"
        );

        Ok(())
    }

    async fn drop(&self, partition_name: &str) -> OrgResult<()> {
        let statement = format!("REMOVE TABLE IF EXISTS {}", quoted_table(partition_name));
        self.db
            .query(statement)
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        info!(partition = partition_name, "Partition dropped");

        Ok(())
    }

    async fn insert(&self, partition_name: &str, document: Value) -> OrgResult<()> {
        self.insert_documents(partition_name, vec![document]).await
    }

    async fn documents(&self, partition_name: &str) -> OrgResult<Vec<Value>> {
        // Record ids embed the source table name, so they are omitted;
        // copies into another partition get fresh ids there.
        let mut result = self
            .db
            .query("SELECT * OMIT id FROM type::table($tb)")
            .bind(("tb", partition_name.to_string()))
            .await
            .map_err(DbError::from)?;

        let documents: Vec<Value> = result.take(0).map_err(DbError::from)?;

        Ok(documents)
    }

    async fn exists(&self, partition_name: &str) -> OrgResult<bool> {
        let mut result = self
            .db
            .query("INFO FOR DB")
            .await
            .map_err(DbError::from)?;

        let info: Option<Value> = result.take(0).map_err(DbError::from)?;

        let present = info
            .as_ref()
            .and_then(|v| v.get("tables"))
            .and_then(|t| t.get(partition_name))
            .is_some();

        Ok(present)
    }
}
