//! Request and response shapes for the HTTP API.

use orgman_core::models::organization::Organization;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub organization_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CreateOrganizationResponse {
    pub message: String,
    pub organization_id: String,
    pub organization_name: String,
    pub partition_name: String,
    pub admin_email: String,
}

#[derive(Debug, Deserialize)]
pub struct GetOrganizationQuery {
    pub organization_name: String,
}

/// Registry metadata with timestamps rendered as ISO-8601 strings.
#[derive(Debug, Serialize)]
pub struct OrganizationSummary {
    pub organization_name: String,
    pub partition_name: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Organization> for OrganizationSummary {
    fn from(org: Organization) -> Self {
        Self {
            organization_name: org.organization_name,
            partition_name: org.partition_name,
            status: org.status.as_str().to_string(),
            created_at: org.created_at.to_rfc3339(),
            updated_at: org.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetOrganizationResponse {
    pub message: String,
    pub organization: OrganizationSummary,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub organization_name: String,
    pub new_organization_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateOrganizationResponse {
    pub message: String,
    pub old_name: String,
    pub new_name: String,
    pub new_partition_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteOrganizationRequest {
    pub organization_name: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteOrganizationResponse {
    pub message: String,
    pub organization_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
