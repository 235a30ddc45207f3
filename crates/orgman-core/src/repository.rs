//! Store trait definitions for data access abstraction.
//!
//! All operations are async and return `Send` futures so the stores can
//! be shared across concurrent request tasks. No operation takes a lock:
//! multi-step workflows in the lifecycle layer interleave freely (see
//! the lifecycle service for the consequences).

use serde_json::Value;

use crate::error::OrgResult;
use crate::models::admin::{Admin, CreateAdmin};
use crate::models::organization::{CreateOrganization, Organization};

/// Master registry of organizations (unique on `organization_name`).
pub trait OrganizationRepository: Send + Sync {
    /// Insert a new registry record. A store-level uniqueness violation
    /// surfaces as `AlreadyExists`, which is the real enforcement point
    /// behind the lifecycle layer's pre-checks.
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = OrgResult<Organization>> + Send;

    fn get_by_name(
        &self,
        organization_name: &str,
    ) -> impl Future<Output = OrgResult<Organization>> + Send;

    /// Point update of name, partition name and `updated_at`.
    fn rename(
        &self,
        old_name: &str,
        new_name: &str,
        new_partition_name: &str,
    ) -> impl Future<Output = OrgResult<Organization>> + Send;

    fn delete_by_name(
        &self,
        organization_name: &str,
    ) -> impl Future<Output = OrgResult<()>> + Send;
}

/// Master table of admin credentials (unique on `email`).
pub trait AdminRepository: Send + Sync {
    fn create(&self, input: CreateAdmin) -> impl Future<Output = OrgResult<Admin>> + Send;

    fn get_by_email(&self, email: &str) -> impl Future<Output = OrgResult<Admin>> + Send;

    /// Re-point the denormalized organization name after a rename.
    fn set_organization_name(
        &self,
        email: &str,
        organization_name: &str,
    ) -> impl Future<Output = OrgResult<()>> + Send;

    /// Delete every admin associated with an organization name; returns
    /// the number of records removed.
    fn delete_by_organization_name(
        &self,
        organization_name: &str,
    ) -> impl Future<Output = OrgResult<u64>> + Send;
}

/// Dynamically named, schemaless per-organization data containers.
pub trait PartitionStore: Send + Sync {
    /// Create a partition holding a single initialization marker.
    fn create(&self, partition_name: &str) -> impl Future<Output = OrgResult<()>> + Send;

    /// Copy every document from `old_name` into `new_name`, then drop
    /// `old_name`. Not transactional: a failure mid-sequence can leave
    /// both partitions present or `new_name` partially populated.
    fn rename(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> impl Future<Output = OrgResult<()>> + Send;

    /// Drop a partition and all of its documents irrecoverably.
    fn drop(&self, partition_name: &str) -> impl Future<Output = OrgResult<()>> + Send;

    /// Insert one opaque document.
    fn insert(
        &self,
        partition_name: &str,
        document: Value,
    ) -> impl Future<Output = OrgResult<()>> + Send;

    /// All documents currently in the partition (record ids omitted).
    fn documents(
        &self,
        partition_name: &str,
    ) -> impl Future<Output = OrgResult<Vec<Value>>> + Send;

    /// Whether the partition currently exists in the store.
    fn exists(&self, partition_name: &str) -> impl Future<Output = OrgResult<bool>> + Send;
}
