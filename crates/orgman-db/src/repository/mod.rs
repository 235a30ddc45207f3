//! SurrealDB store implementations.

mod admin;
mod organization;
mod partition;

pub use admin::SurrealAdminRepository;
pub use organization::SurrealOrganizationRepository;
pub use partition::SurrealPartitionStore;
