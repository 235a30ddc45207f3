//! Deterministic partition naming.
//!
//! Partition names are persisted in the registry, so the transform is a
//! compatibility contract: lowercase the organization name, replace each
//! space and hyphen with an underscore, and prefix with `org_`.

/// Prefix applied to every partition name.
pub const PARTITION_PREFIX: &str = "org_";

/// Derive the partition name for an organization name.
///
/// Names that differ only by case or space/hyphen punctuation collide on
/// the same partition name; the registry's uniqueness pre-checks are what
/// keep such organizations from coexisting.
pub fn partition_name(organization_name: &str) -> String {
    let sanitized: String = organization_name
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();
    format!("{PARTITION_PREFIX}{sanitized}")
}
