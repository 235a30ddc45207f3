//! Shared application state injected into all handlers.

use std::sync::Arc;

use orgman_db::repository::{
    SurrealAdminRepository, SurrealOrganizationRepository, SurrealPartitionStore,
};
use orgman_lifecycle::OrgService;
use surrealdb::Connection;

/// Lifecycle service wired to the SurrealDB store implementations.
pub type SurrealOrgService<C> = OrgService<
    SurrealOrganizationRepository<C>,
    SurrealAdminRepository<C>,
    SurrealPartitionStore<C>,
>;

/// Shared server state. Cheap to clone; the service is behind an `Arc`.
pub struct AppState<C: Connection> {
    pub service: Arc<SurrealOrgService<C>>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(service: SurrealOrgService<C>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
