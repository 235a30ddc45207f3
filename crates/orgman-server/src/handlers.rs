//! HTTP request handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use orgman_core::error::OrgError;
use surrealdb::Connection;

use crate::dto::{
    CreateOrganizationRequest, CreateOrganizationResponse, DeleteOrganizationRequest,
    DeleteOrganizationResponse, GetOrganizationQuery, GetOrganizationResponse, HealthResponse,
    LoginRequest, TokenResponse, UpdateOrganizationRequest, UpdateOrganizationResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, OrgError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| OrgError::Unauthorized {
            reason: "Invalid authentication credentials".into(),
        })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        service: "Organization Management Service".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub async fn create_organization<C: Connection>(
    State(state): State<AppState<C>>,
    Json(body): Json<CreateOrganizationRequest>,
) -> ApiResult<(StatusCode, Json<CreateOrganizationResponse>)> {
    let out = state
        .service
        .create(&body.organization_name, &body.email, &body.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrganizationResponse {
            message: "Organization created successfully".into(),
            organization_id: out.organization_id.to_string(),
            organization_name: out.organization_name,
            partition_name: out.partition_name,
            admin_email: out.admin_email,
        }),
    ))
}

pub async fn get_organization<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<GetOrganizationQuery>,
) -> ApiResult<Json<GetOrganizationResponse>> {
    let organization = state.service.get(&query.organization_name).await?;

    Ok(Json(GetOrganizationResponse {
        message: "Organization retrieved successfully".into(),
        organization: organization.into(),
    }))
}

pub async fn update_organization<C: Connection>(
    State(state): State<AppState<C>>,
    Json(body): Json<UpdateOrganizationRequest>,
) -> ApiResult<Json<UpdateOrganizationResponse>> {
    let out = state
        .service
        .rename(
            &body.organization_name,
            &body.new_organization_name,
            &body.email,
            &body.password,
        )
        .await?;

    Ok(Json(UpdateOrganizationResponse {
        message: "Organization updated successfully".into(),
        old_name: out.old_name,
        new_name: out.organization.organization_name,
        new_partition_name: out.organization.partition_name,
    }))
}

pub async fn delete_organization<C: Connection>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    Json(body): Json<DeleteOrganizationRequest>,
) -> ApiResult<Json<DeleteOrganizationResponse>> {
    let token = bearer_token(&headers)?;
    let claims = state.service.authenticate(token)?;

    let out = state
        .service
        .delete(&body.organization_name, &claims)
        .await?;

    Ok(Json(DeleteOrganizationResponse {
        message: "Organization deleted successfully".into(),
        organization_name: out.organization_name,
    }))
}

pub async fn admin_login<C: Connection>(
    State(state): State<AppState<C>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let out = state.service.login(&body.email, &body.password).await?;

    Ok(Json(TokenResponse {
        access_token: out.access_token,
        token_type: "bearer".into(),
    }))
}
