//! orgman core — domain models, store contracts, and the shared error
//! type for the organization management service.

pub mod error;
pub mod models;
pub mod partition;
pub mod repository;
