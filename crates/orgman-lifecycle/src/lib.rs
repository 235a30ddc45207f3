//! orgman lifecycle — orchestration of organization create, get, rename,
//! delete, and admin login across the registry, admin, and partition
//! stores.

pub mod service;
pub mod validate;

pub use service::{CreateOutput, DeleteOutput, LoginOutput, OrgService, RenameOutput};
