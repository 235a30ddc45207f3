//! Organization domain model.
//!
//! An organization is a tenant: it owns exactly one data partition and
//! exactly one admin identity in the current design.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an organization.
///
/// Only `Active` is produced today; the enum exists because the registry
/// schema constrains the field and future states would extend it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgStatus {
    Active,
}

impl OrgStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgStatus::Active => "active",
        }
    }
}

/// A registered organization (one record in the master registry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Unique human-facing name (3–50 characters).
    pub organization_name: String,
    /// Name of the organization's data partition, derived from the
    /// organization name.
    pub partition_name: String,
    pub status: OrgStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a new registry record.
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    pub organization_name: String,
    pub partition_name: String,
}
