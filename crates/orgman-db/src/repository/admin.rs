//! SurrealDB implementation of [`AdminRepository`].

use chrono::{DateTime, Utc};
use orgman_core::error::OrgResult;
use orgman_core::models::admin::{ADMIN_ROLE, Admin, CreateAdmin};
use orgman_core::repository::AdminRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AdminRow {
    email: String,
    password_hash: String,
    organization_id: String,
    organization_name: String,
    role: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct AdminRowWithId {
    record_id: String,
    email: String,
    password_hash: String,
    organization_id: String,
    organization_name: String,
    role: String,
    created_at: DateTime<Utc>,
}

/// Projection used to count deleted rows via `RETURN BEFORE`.
#[derive(Debug, SurrealValue)]
struct DeletedAdmin {
    #[allow(dead_code)]
    email: String,
}

fn parse_uuid(s: &str, field: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Query(format!("invalid {field} UUID: {e}")))
}

impl AdminRow {
    fn into_admin(self, id: Uuid) -> Result<Admin, DbError> {
        Ok(Admin {
            id,
            email: self.email,
            password_hash: self.password_hash,
            organization_id: parse_uuid(&self.organization_id, "organization_id")?,
            organization_name: self.organization_name,
            role: self.role,
            created_at: self.created_at,
        })
    }
}

impl AdminRowWithId {
    fn try_into_admin(self) -> Result<Admin, DbError> {
        let id = parse_uuid(&self.record_id, "record")?;
        Ok(Admin {
            id,
            email: self.email,
            password_hash: self.password_hash,
            organization_id: parse_uuid(&self.organization_id, "organization_id")?,
            organization_name: self.organization_name,
            role: self.role,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the master admin credential table.
#[derive(Clone)]
pub struct SurrealAdminRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAdminRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AdminRepository for SurrealAdminRepository<C> {
    async fn create(&self, input: CreateAdmin) -> OrgResult<Admin> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('admin', $id) SET \
                 email = $email, password_hash = $password_hash, \
                 organization_id = $organization_id, \
                 organization_name = $organization_name, \
                 role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("password_hash", input.password_hash))
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("organization_name", input.organization_name))
            .bind(("role", ADMIN_ROLE.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| {
            let msg = e.to_string();
            if msg.contains("idx_admin_email") {
                DbError::Duplicate {
                    entity: "Admin email".into(),
                }
            } else {
                DbError::Query(msg)
            }
        })?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Admin".into(),
            key: id_str,
        })?;

        Ok(row.into_admin(id)?)
    }

    async fn get_by_email(&self, email: &str) -> OrgResult<Admin> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM admin WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Admin".into(),
            key: email.to_string(),
        })?;

        Ok(row.try_into_admin()?)
    }

    async fn set_organization_name(&self, email: &str, organization_name: &str) -> OrgResult<()> {
        self.db
            .query(
                "UPDATE admin SET organization_name = $organization_name \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .bind(("organization_name", organization_name.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete_by_organization_name(&self, organization_name: &str) -> OrgResult<u64> {
        let mut result = self
            .db
            .query(
                "DELETE admin WHERE organization_name = $organization_name \
                 RETURN BEFORE",
            )
            .bind(("organization_name", organization_name.to_string()))
            .await
            .map_err(DbError::from)?;

        let deleted: Vec<DeletedAdmin> = result.take(0).map_err(DbError::from)?;

        Ok(deleted.len() as u64)
    }
}
