//! Integration tests for the organization lifecycle service using
//! in-memory SurrealDB.

use orgman_auth::AuthConfig;
use orgman_core::error::{OrgError, OrgResult};
use orgman_core::models::admin::{Admin, CreateAdmin};
use orgman_core::models::organization::{CreateOrganization, OrgStatus, Organization};
use orgman_core::repository::{AdminRepository, OrganizationRepository, PartitionStore};
use orgman_db::repository::{
    SurrealAdminRepository, SurrealOrganizationRepository, SurrealPartitionStore,
};
use orgman_lifecycle::OrgService;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

type Service = OrgService<
    SurrealOrganizationRepository<Db>,
    SurrealAdminRepository<Db>,
    SurrealPartitionStore<Db>,
>;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".into(),
        ..AuthConfig::default()
    }
}

async fn setup() -> (Service, Surreal<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    orgman_db::run_migrations(&db).await.unwrap();

    let svc = OrgService::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealAdminRepository::new(db.clone()),
        SurrealPartitionStore::new(db.clone()),
        test_config(),
    );
    (svc, db)
}

#[tokio::test]
async fn create_happy_path() {
    let (svc, db) = setup().await;

    let out = svc
        .create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();

    assert_eq!(out.organization_name, "Acme Corp");
    assert_eq!(out.partition_name, "org_acme_corp");
    assert_eq!(out.admin_email, "a@x.com");

    // The partition exists and holds the initialization marker.
    let partitions = SurrealPartitionStore::new(db);
    assert!(partitions.exists("org_acme_corp").await.unwrap());
    let docs = partitions.documents("org_acme_corp").await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["type"], json!("initialization"));
}

#[tokio::test]
async fn create_duplicate_name_conflicts() {
    let (svc, _db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    let err = svc
        .create("Acme Corp", "b@x.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Organization name already exists");
}

#[tokio::test]
async fn create_duplicate_email_conflicts() {
    let (svc, _db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    let err = svc
        .create("Beta LLC", "a@x.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Admin email already exists");
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let (svc, _db) = setup().await;

    let err = svc.create("ab", "a@x.com", "password123").await.unwrap_err();
    assert!(matches!(err, OrgError::Validation { .. }));

    let err = svc
        .create("Acme Corp", "not-an-email", "password123")
        .await
        .unwrap_err();
    assert!(matches!(err, OrgError::Validation { .. }));

    let err = svc.create("Acme Corp", "a@x.com", "short").await.unwrap_err();
    assert!(matches!(err, OrgError::Validation { .. }));
}

#[tokio::test]
async fn names_colliding_on_partition_conflict_at_the_store() {
    let (svc, _db) = setup().await;

    // "Acme-Corp" and "Acme Corp" derive the same partition name; the
    // second create must fail even though the organization names differ.
    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    let err = svc
        .create("Acme-Corp", "b@x.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Organization name already exists");
}

#[tokio::test]
async fn get_returns_metadata() {
    let (svc, _db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    let org = svc.get("Acme Corp").await.unwrap();
    assert_eq!(org.partition_name, "org_acme_corp");
    assert_eq!(org.status, OrgStatus::Active);
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let (svc, _db) = setup().await;
    let err = svc.get("Nope Inc").await.unwrap_err();
    assert_eq!(err.to_string(), "Organization not found");
}

#[tokio::test]
async fn login_issues_decodable_token() {
    let (svc, _db) = setup().await;

    let created = svc
        .create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();

    let out = svc.login("a@x.com", "password123").await.unwrap();
    assert_eq!(out.expires_in, 1800);

    let claims = svc.authenticate(&out.access_token).unwrap();
    assert_eq!(claims.sub, "a@x.com");
    assert_eq!(claims.org_id, created.organization_id.to_string());
    assert_eq!(claims.org_name, "Acme Corp");
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn login_failures_do_not_reveal_which_field_was_wrong() {
    let (svc, _db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();

    let unknown = svc.login("nobody@x.com", "password123").await.unwrap_err();
    let wrong_pw = svc.login("a@x.com", "wrong-password").await.unwrap_err();

    assert_eq!(unknown.to_string(), "Invalid email or password");
    assert_eq!(wrong_pw.to_string(), unknown.to_string());
}

#[tokio::test]
async fn rename_migrates_partition_and_repoints_admin() {
    let (svc, db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();

    // Seed some tenant data into the partition.
    let partitions = SurrealPartitionStore::new(db.clone());
    partitions
        .insert("org_acme_corp", json!({"kind": "note", "n": 1}))
        .await
        .unwrap();
    partitions
        .insert("org_acme_corp", json!({"kind": "note", "n": 2}))
        .await
        .unwrap();

    let out = svc
        .rename("Acme Corp", "Acme Inc", "a@x.com", "password123")
        .await
        .unwrap();
    assert_eq!(out.old_name, "Acme Corp");
    assert_eq!(out.organization.organization_name, "Acme Inc");
    assert_eq!(out.organization.partition_name, "org_acme_inc");

    // Every record moved; the old partition is gone.
    assert!(!partitions.exists("org_acme_corp").await.unwrap());
    let docs = partitions.documents("org_acme_inc").await.unwrap();
    assert_eq!(docs.len(), 3); // marker + two notes

    // Old name is gone from the registry; the new one resolves.
    assert!(svc.get("Acme Corp").await.is_err());
    svc.get("Acme Inc").await.unwrap();

    // Login under the new organization carries the new name.
    let login = svc.login("a@x.com", "password123").await.unwrap();
    let claims = svc.authenticate(&login.access_token).unwrap();
    assert_eq!(claims.org_name, "Acme Inc");
}

#[tokio::test]
async fn rename_requires_matching_admin() {
    let (svc, _db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    svc.create("Beta LLC", "b@x.com", "password123")
        .await
        .unwrap();

    // Unknown admin.
    let err = svc
        .rename("Acme Corp", "Acme Inc", "nobody@x.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized: Invalid admin credentials");

    // Admin of a different organization.
    let err = svc
        .rename("Acme Corp", "Acme Inc", "b@x.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized: Invalid admin credentials");

    // Wrong password.
    let err = svc
        .rename("Acme Corp", "Acme Inc", "a@x.com", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized: Invalid password");
}

#[tokio::test]
async fn rename_to_taken_name_conflicts() {
    let (svc, _db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    svc.create("Beta LLC", "b@x.com", "password123")
        .await
        .unwrap();

    let err = svc
        .rename("Acme Corp", "Beta LLC", "a@x.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "New organization name already exists");
}

#[tokio::test]
async fn rename_missing_organization_is_not_found() {
    let (svc, _db) = setup().await;
    let err = svc
        .rename("Nope Inc", "Acme Inc", "a@x.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Organization not found");
}

#[tokio::test]
async fn rename_to_equivalent_name_keeps_partition_data() {
    let (svc, db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();

    let partitions = SurrealPartitionStore::new(db);
    partitions
        .insert("org_acme_corp", json!({"kind": "note"}))
        .await
        .unwrap();

    // "Acme-Corp" derives the same partition name as "Acme Corp".
    let out = svc
        .rename("Acme Corp", "Acme-Corp", "a@x.com", "password123")
        .await
        .unwrap();
    assert_eq!(out.organization.partition_name, "org_acme_corp");

    let docs = partitions.documents("org_acme_corp").await.unwrap();
    assert_eq!(docs.len(), 2);
}

#[tokio::test]
async fn delete_removes_registry_partition_and_admins() {
    let (svc, db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    let login = svc.login("a@x.com", "password123").await.unwrap();
    let claims = svc.authenticate(&login.access_token).unwrap();

    let out = svc.delete("Acme Corp", &claims).await.unwrap();
    assert_eq!(out.organization_name, "Acme Corp");
    assert_eq!(out.partition_name, "org_acme_corp");
    assert_eq!(out.admins_removed, 1);

    let err = svc.get("Acme Corp").await.unwrap_err();
    assert_eq!(err.to_string(), "Organization not found");

    let partitions = SurrealPartitionStore::new(db);
    assert!(!partitions.exists("org_acme_corp").await.unwrap());

    // The admin is gone too, so login now fails.
    let err = svc.login("a@x.com", "password123").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
}

#[tokio::test]
async fn delete_of_another_organization_is_forbidden() {
    let (svc, _db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    svc.create("Beta LLC", "b@x.com", "password123")
        .await
        .unwrap();

    let login = svc.login("b@x.com", "password123").await.unwrap();
    let claims = svc.authenticate(&login.access_token).unwrap();

    let err = svc.delete("Acme Corp", &claims).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unauthorized: You can only delete your own organization"
    );

    // Acme is untouched.
    svc.get("Acme Corp").await.unwrap();
}

#[tokio::test]
async fn delete_missing_organization_is_not_found() {
    let (svc, _db) = setup().await;

    svc.create("Acme Corp", "a@x.com", "password123")
        .await
        .unwrap();
    let login = svc.login("a@x.com", "password123").await.unwrap();
    let claims = svc.authenticate(&login.access_token).unwrap();

    let err = svc.delete("Nope Inc", &claims).await.unwrap_err();
    assert_eq!(err.to_string(), "Organization not found");
}

#[tokio::test]
async fn authenticate_rejects_garbage_tokens() {
    let (svc, _db) = setup().await;
    let err = svc.authenticate("not-a-jwt").unwrap_err();
    assert_eq!(err.to_string(), "Could not validate credentials");
}

/// Store whose every operation fails as if the database were down.
struct UnavailableStore;

fn unavailable<T>() -> OrgResult<T> {
    Err(OrgError::Database("store unavailable".into()))
}

impl OrganizationRepository for UnavailableStore {
    async fn create(&self, _input: CreateOrganization) -> OrgResult<Organization> {
        unavailable()
    }
    async fn get_by_name(&self, _organization_name: &str) -> OrgResult<Organization> {
        unavailable()
    }
    async fn rename(
        &self,
        _old_name: &str,
        _new_name: &str,
        _new_partition_name: &str,
    ) -> OrgResult<Organization> {
        unavailable()
    }
    async fn delete_by_name(&self, _organization_name: &str) -> OrgResult<()> {
        unavailable()
    }
}

impl AdminRepository for UnavailableStore {
    async fn create(&self, _input: CreateAdmin) -> OrgResult<Admin> {
        unavailable()
    }
    async fn get_by_email(&self, _email: &str) -> OrgResult<Admin> {
        unavailable()
    }
    async fn set_organization_name(&self, _email: &str, _organization_name: &str) -> OrgResult<()> {
        unavailable()
    }
    async fn delete_by_organization_name(&self, _organization_name: &str) -> OrgResult<u64> {
        unavailable()
    }
}

impl PartitionStore for UnavailableStore {
    async fn create(&self, _partition_name: &str) -> OrgResult<()> {
        unavailable()
    }
    async fn rename(&self, _old_name: &str, _new_name: &str) -> OrgResult<()> {
        unavailable()
    }
    async fn drop(&self, _partition_name: &str) -> OrgResult<()> {
        unavailable()
    }
    async fn insert(&self, _partition_name: &str, _document: serde_json::Value) -> OrgResult<()> {
        unavailable()
    }
    async fn documents(&self, _partition_name: &str) -> OrgResult<Vec<serde_json::Value>> {
        unavailable()
    }
    async fn exists(&self, _partition_name: &str) -> OrgResult<bool> {
        unavailable()
    }
}

#[tokio::test]
async fn login_propagates_store_failures() {
    // A backend outage must surface as a database error, not as the
    // generic invalid-credentials rejection.
    let svc = OrgService::new(
        UnavailableStore,
        UnavailableStore,
        UnavailableStore,
        test_config(),
    );

    let err = svc.login("a@x.com", "password123").await.unwrap_err();
    assert!(matches!(err, OrgError::Database(_)), "got {err:?}");
}
