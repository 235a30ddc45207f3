//! Admin domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role string stored for every admin. The system is
/// single-admin-per-organization, so no other role exists.
pub const ADMIN_ROLE: &str = "admin";

/// An admin credential record (one per organization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    /// Unique login email.
    pub email: String,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
    /// Id of the organization this admin belongs to. Established at
    /// creation and never re-validated afterwards.
    pub organization_id: Uuid,
    /// Denormalized organization name, kept in sync on rename.
    pub organization_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new admin record. The password must
/// already be hashed by the credential layer.
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub email: String,
    pub password_hash: String,
    pub organization_id: Uuid,
    pub organization_name: String,
}
