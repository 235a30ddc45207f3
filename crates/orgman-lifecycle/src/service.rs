//! Organization lifecycle service — create, get, rename, delete, login.
//!
//! The multi-step workflows here span independent store writes with no
//! surrounding transaction. Pre-checks reduce the window for duplicate
//! keys but the unique indexes in the store layer are the true
//! enforcement point; a create that loses the race still fails with the
//! same conflict error, just from the insert instead of the pre-check.

use orgman_auth::{AccessTokenClaims, AuthConfig, TokenIdentity, password, token};
use orgman_core::error::{OrgError, OrgResult};
use orgman_core::models::admin::{ADMIN_ROLE, CreateAdmin};
use orgman_core::models::organization::{CreateOrganization, Organization};
use orgman_core::partition::partition_name;
use orgman_core::repository::{AdminRepository, OrganizationRepository, PartitionStore};
use tracing::{info, warn};
use uuid::Uuid;

/// Successful create result.
#[derive(Debug)]
pub struct CreateOutput {
    pub organization_id: Uuid,
    pub organization_name: String,
    pub partition_name: String,
    pub admin_email: String,
}

/// Successful rename result.
#[derive(Debug)]
pub struct RenameOutput {
    pub old_name: String,
    pub organization: Organization,
}

/// Successful delete result.
#[derive(Debug)]
pub struct DeleteOutput {
    pub organization_name: String,
    pub partition_name: String,
    pub admins_removed: u64,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Organization lifecycle service.
///
/// Generic over store implementations so that the lifecycle layer has
/// no dependency on the database crate.
pub struct OrgService<O, A, P>
where
    O: OrganizationRepository,
    A: AdminRepository,
    P: PartitionStore,
{
    org_repo: O,
    admin_repo: A,
    partitions: P,
    config: AuthConfig,
}

impl<O, A, P> OrgService<O, A, P>
where
    O: OrganizationRepository,
    A: AdminRepository,
    P: PartitionStore,
{
    pub fn new(org_repo: O, admin_repo: A, partitions: P, config: AuthConfig) -> Self {
        Self {
            org_repo,
            admin_repo,
            partitions,
            config,
        }
    }

    /// Register a new organization with its admin and data partition.
    pub async fn create(&self, name: &str, email: &str, pwd: &str) -> OrgResult<CreateOutput> {
        crate::validate::organization_name(name)?;
        crate::validate::email(email)?;
        crate::validate::password(pwd, self.config.min_password_length)?;

        // 1. Pre-check organization name uniqueness.
        match self.org_repo.get_by_name(name).await {
            Ok(_) => {
                return Err(OrgError::AlreadyExists {
                    entity: "Organization name".into(),
                });
            }
            Err(OrgError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 2. Pre-check admin email uniqueness.
        match self.admin_repo.get_by_email(email).await {
            Ok(_) => {
                return Err(OrgError::AlreadyExists {
                    entity: "Admin email".into(),
                });
            }
            Err(OrgError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 3. Derive the partition name.
        let partition = partition_name(name);

        // 4. Insert the registry record.
        let organization = self
            .org_repo
            .create(CreateOrganization {
                organization_name: name.to_string(),
                partition_name: partition.clone(),
            })
            .await?;

        // 5. Hash the password and insert the admin record.
        let password_hash = password::hash_password(pwd, self.config.pepper.as_deref())
            .map_err(|e| OrgError::Crypto(e.to_string()))?;

        let admin = self
            .admin_repo
            .create(CreateAdmin {
                email: email.to_string(),
                password_hash,
                organization_id: organization.id,
                organization_name: organization.organization_name.clone(),
            })
            .await?;

        // 6. Create the data partition. A failure here leaves a registry
        //    entry with no usable partition; there is no compensating
        //    rollback of steps 4 and 5.
        self.partitions.create(&partition).await?;

        info!(
            organization = %organization.organization_name,
            partition = %partition,
            "Organization created"
        );

        Ok(CreateOutput {
            organization_id: organization.id,
            organization_name: organization.organization_name,
            partition_name: partition,
            admin_email: admin.email,
        })
    }

    /// Point lookup of an organization by name.
    pub async fn get(&self, name: &str) -> OrgResult<Organization> {
        self.org_repo.get_by_name(name).await
    }

    /// Rename an organization and migrate its partition.
    ///
    /// Physical migration runs before the registry update; if the
    /// registry write fails afterwards the old partition is already
    /// gone while the registry still points at it.
    pub async fn rename(
        &self,
        old_name: &str,
        new_name: &str,
        email: &str,
        pwd: &str,
    ) -> OrgResult<RenameOutput> {
        crate::validate::organization_name(new_name)?;

        // 1. The organization must exist.
        let organization = self.org_repo.get_by_name(old_name).await?;

        // 2. The caller must be the organization's admin.
        let admin = self.admin_repo.get_by_email(email).await.map_err(|e| {
            if matches!(e, OrgError::NotFound { .. }) {
                OrgError::Forbidden {
                    reason: "Invalid admin credentials".into(),
                }
            } else {
                e
            }
        })?;
        if admin.organization_name != old_name {
            return Err(OrgError::Forbidden {
                reason: "Invalid admin credentials".into(),
            });
        }

        // 3. The password must verify.
        let valid = password::verify_password(pwd, &admin.password_hash, self.config.pepper.as_deref())
            .map_err(|e| OrgError::Crypto(e.to_string()))?;
        if !valid {
            return Err(OrgError::Forbidden {
                reason: "Invalid password".into(),
            });
        }

        // 4. The target name must be free.
        if new_name != old_name {
            match self.org_repo.get_by_name(new_name).await {
                Ok(_) => {
                    return Err(OrgError::AlreadyExists {
                        entity: "New organization name".into(),
                    });
                }
                Err(OrgError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        // 5. Migrate the partition. Skipped when the derived name is
        //    unchanged: copying a table onto itself and then dropping it
        //    would destroy the data.
        let new_partition = partition_name(new_name);
        if new_partition != organization.partition_name {
            self.partitions
                .rename(&organization.partition_name, &new_partition)
                .await?;
        } else {
            warn!(
                partition = %new_partition,
                "Rename produced an identical partition name; skipping migration"
            );
        }

        // 6. Update the registry record.
        let renamed = self
            .org_repo
            .rename(old_name, new_name, &new_partition)
            .await?;

        // 7. Re-point the admin's denormalized organization name.
        self.admin_repo
            .set_organization_name(&admin.email, new_name)
            .await?;

        info!(
            old_name = %old_name,
            new_name = %new_name,
            partition = %new_partition,
            "Organization renamed"
        );

        Ok(RenameOutput {
            old_name: old_name.to_string(),
            organization: renamed,
        })
    }

    /// Delete an organization, its partition, and its admin records.
    ///
    /// `claims` is the validated bearer token of the caller; only the
    /// organization's own admin may delete it.
    pub async fn delete(&self, name: &str, claims: &AccessTokenClaims) -> OrgResult<DeleteOutput> {
        // 1. The organization must exist.
        let organization = self.org_repo.get_by_name(name).await?;

        // 2. The caller's admin record must belong to this organization.
        let admin = self.admin_repo.get_by_email(&claims.sub).await.map_err(|e| {
            if matches!(e, OrgError::NotFound { .. }) {
                OrgError::Forbidden {
                    reason: "You can only delete your own organization".into(),
                }
            } else {
                e
            }
        })?;
        if admin.organization_name != name {
            return Err(OrgError::Forbidden {
                reason: "You can only delete your own organization".into(),
            });
        }

        // 3. Drop the partition first, then the registry and admin
        //    records. Order mirrors create in reverse.
        self.partitions.drop(&organization.partition_name).await?;
        self.org_repo.delete_by_name(name).await?;
        let admins_removed = self.admin_repo.delete_by_organization_name(name).await?;

        info!(
            organization = %name,
            partition = %organization.partition_name,
            admins_removed,
            "Organization deleted"
        );

        Ok(DeleteOutput {
            organization_name: organization.organization_name,
            partition_name: organization.partition_name,
            admins_removed,
        })
    }

    /// Authenticate an admin and issue an access token.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response does not reveal which field was wrong.
    pub async fn login(&self, email: &str, pwd: &str) -> OrgResult<LoginOutput> {
        let admin = self.admin_repo.get_by_email(email).await.map_err(|e| {
            if matches!(e, OrgError::NotFound { .. }) {
                OrgError::Unauthorized {
                    reason: "Invalid email or password".into(),
                }
            } else {
                e
            }
        })?;

        let valid = password::verify_password(pwd, &admin.password_hash, self.config.pepper.as_deref())
            .map_err(|e| OrgError::Crypto(e.to_string()))?;
        if !valid {
            return Err(OrgError::Unauthorized {
                reason: "Invalid email or password".into(),
            });
        }

        let identity = TokenIdentity {
            email: admin.email,
            org_id: admin.organization_id.to_string(),
            org_name: admin.organization_name,
            role: ADMIN_ROLE.to_string(),
        };
        let access_token = token::issue_access_token(
            &identity,
            Some(self.config.login_token_ttl_secs),
            &self.config,
        )?;

        Ok(LoginOutput {
            access_token,
            expires_in: self.config.login_token_ttl_secs,
        })
    }

    /// Decode and verify a bearer token.
    pub fn authenticate(&self, bearer: &str) -> OrgResult<AccessTokenClaims> {
        Ok(token::validate_access_token(bearer, &self.config)?)
    }
}
