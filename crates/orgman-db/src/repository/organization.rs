//! SurrealDB implementation of [`OrganizationRepository`].

use chrono::{DateTime, Utc};
use orgman_core::error::OrgResult;
use orgman_core::models::organization::{CreateOrganization, OrgStatus, Organization};
use orgman_core::repository::OrganizationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct OrganizationRow {
    organization_name: String,
    partition_name: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct OrganizationRowWithId {
    record_id: String,
    organization_name: String,
    partition_name: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<OrgStatus, DbError> {
    match s {
        "active" => Ok(OrgStatus::Active),
        other => Err(DbError::Query(format!(
            "unknown organization status: {other}"
        ))),
    }
}

impl OrganizationRow {
    fn into_organization(self, id: Uuid) -> Result<Organization, DbError> {
        Ok(Organization {
            id,
            organization_name: self.organization_name,
            partition_name: self.partition_name,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrganizationRowWithId {
    fn try_into_organization(self) -> Result<Organization, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        Ok(Organization {
            id,
            organization_name: self.organization_name,
            partition_name: self.partition_name,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the master organization registry.
#[derive(Clone)]
pub struct SurrealOrganizationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrganizationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OrganizationRepository for SurrealOrganizationRepository<C> {
    async fn create(&self, input: CreateOrganization) -> OrgResult<Organization> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('organization', $id) SET \
                 organization_name = $name, partition_name = $partition, \
                 status = 'active'",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.organization_name))
            .bind(("partition", input.partition_name))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| {
            let msg = e.to_string();
            // Name collisions on either unique key surface the same way:
            // two names that derive the same partition are equivalent.
            if msg.contains("idx_organization_name") || msg.contains("idx_partition_name") {
                DbError::Duplicate {
                    entity: "Organization name".into(),
                }
            } else {
                DbError::Query(msg)
            }
        })?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Organization".into(),
            key: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn get_by_name(&self, organization_name: &str) -> OrgResult<Organization> {
        let name = organization_name.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM organization WHERE organization_name = $name",
            )
            .bind(("name", name))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Organization".into(),
            key: organization_name.to_string(),
        })?;

        Ok(row.try_into_organization()?)
    }

    async fn rename(
        &self,
        old_name: &str,
        new_name: &str,
        new_partition_name: &str,
    ) -> OrgResult<Organization> {
        let mut result = self
            .db
            .query(
                "UPDATE organization SET \
                 organization_name = $new_name, \
                 partition_name = $partition, \
                 updated_at = time::now() \
                 WHERE organization_name = $old_name \
                 RETURN meta::id(id) AS record_id, organization_name, \
                 partition_name, status, created_at, updated_at",
            )
            .bind(("old_name", old_name.to_string()))
            .bind(("new_name", new_name.to_string()))
            .bind(("partition", new_partition_name.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("idx_organization_name") || msg.contains("idx_partition_name") {
                    DbError::Duplicate {
                        entity: "New organization name".into(),
                    }
                } else {
                    DbError::Query(msg)
                }
            })?;

        let rows: Vec<OrganizationRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Organization".into(),
            key: old_name.to_string(),
        })?;

        Ok(row.try_into_organization()?)
    }

    async fn delete_by_name(&self, organization_name: &str) -> OrgResult<()> {
        self.db
            .query("DELETE organization WHERE organization_name = $name")
            .bind(("name", organization_name.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
