//! Coordinator and teacher record service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use clickaulas_auth::password::{CredentialGenerator, PasswordHasher};
use clickaulas_auth::rbac::Capability;
use clickaulas_core::error::AppError;
use clickaulas_database::{StaffFilter, UserStore};
use clickaulas_entity::{CreateUser, StaffMember, User, UserRole};

use super::input::StaffInput;
use crate::context::RequestContext;

/// Result of an upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpsert {
    /// The stored record.
    pub member: User,
    /// Whether a new record was created.
    pub created: bool,
    /// One-time credential, present only on creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_password: Option<String>,
}

/// Manages users of a single role: coordinators or teachers.
#[derive(Clone)]
pub struct StaffService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    generator: CredentialGenerator,
    role: UserRole,
    capability: Capability,
}

impl std::fmt::Debug for StaffService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffService")
            .field("role", &self.role)
            .finish()
    }
}

impl StaffService {
    /// Service for coordinators (ADMIN only).
    pub fn coordinators(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        generator: CredentialGenerator,
    ) -> Self {
        Self {
            users,
            hasher,
            generator,
            role: UserRole::Coordinator,
            capability: Capability::CoordinatorManage,
        }
    }

    /// Service for teachers (ADMIN and COORDINATOR).
    pub fn teachers(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        generator: CredentialGenerator,
    ) -> Self {
        Self {
            users,
            hasher,
            generator,
            role: UserRole::Teacher,
            capability: Capability::TeacherManage,
        }
    }

    /// The role this service manages.
    pub fn role(&self) -> UserRole {
        self.role
    }

    fn label(&self) -> &'static str {
        match self.role {
            UserRole::Coordinator => "Coordinator",
            UserRole::Teacher => "Teacher",
            UserRole::Admin => "Administrator",
        }
    }

    /// Lists records of this role.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &StaffFilter,
    ) -> Result<Vec<StaffMember>, AppError> {
        ctx.require(self.capability)?;
        self.users.list_staff(self.role, filter).await
    }

    /// Creates or updates a record.
    ///
    /// Creation generates a one-time credential, stores only its hash and
    /// returns the plaintext once. Updates never change role or password.
    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        input: StaffInput,
    ) -> Result<StaffUpsert, AppError> {
        ctx.require(self.capability)?;

        let id = input.id;
        let profile = input.into_profile(self.role == UserRole::Teacher)?;

        if let Some(id) = id {
            let member = self
                .users
                .update_staff(id, self.role, &profile)
                .await?
                .ok_or_else(|| AppError::not_found(format!("{} not found", self.label())))?;

            info!(
                actor_id = %ctx.user_id,
                target_id = %member.id,
                role = %self.role,
                "Staff record updated"
            );

            return Ok(StaffUpsert {
                member,
                created: false,
                created_password: None,
            });
        }

        let credential = self.generator.generate();
        let password_hash = self.hasher.hash(&credential)?;

        let member = self
            .users
            .insert_user(&CreateUser {
                name: profile.name,
                email: profile.email,
                password_hash: Some(password_hash),
                image: None,
                role: self.role,
                institution_id: profile.institution_id,
                department: profile.department,
                phone: profile.phone,
                hourly_rate: profile.hourly_rate,
                hiring_date: profile.hiring_date,
            })
            .await?;

        info!(
            actor_id = %ctx.user_id,
            target_id = %member.id,
            role = %self.role,
            "Staff record created"
        );

        Ok(StaffUpsert {
            member,
            created: true,
            created_password: Some(credential),
        })
    }

    /// Deletes a record of this role.
    ///
    /// Fails with an in-use error while class schedules reference it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require(self.capability)?;

        if !self.users.delete_staff(id, self.role).await? {
            return Err(AppError::not_found(format!("{} not found", self.label())));
        }

        info!(
            actor_id = %ctx.user_id,
            target_id = %id,
            role = %self.role,
            "Staff record deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clickaulas_core::error::ErrorKind;
    use clickaulas_database::Stores;
    use clickaulas_entity::NewInstitution;

    use super::*;
    use crate::context::testing::context;

    struct Fixture {
        stores: Stores,
        coordinators: StaffService,
        teachers: StaffService,
        institution_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let stores = Stores::memory();
        let hasher = Arc::new(PasswordHasher::new());
        let institution = stores
            .institutions
            .insert_institution(&NewInstitution {
                name: "Central".to_string(),
                address: None,
            })
            .await
            .unwrap();
        Fixture {
            coordinators: StaffService::coordinators(
                stores.users.clone(),
                hasher.clone(),
                CredentialGenerator::new(8),
            ),
            teachers: StaffService::teachers(
                stores.users.clone(),
                hasher,
                CredentialGenerator::new(8),
            ),
            institution_id: institution.id,
            stores,
        }
    }

    fn input(institution_id: Uuid, email: &str) -> StaffInput {
        StaffInput {
            name: "Gabi".to_string(),
            email: email.to_string(),
            institution_id: institution_id.to_string(),
            department: "Languages".to_string(),
            hourly_rate: Some(30.0),
            ..StaffInput::default()
        }
    }

    #[tokio::test]
    async fn test_created_credential_matches_stored_hash() {
        let fx = fixture().await;
        let ctx = context(UserRole::Admin);
        let result = fx
            .teachers
            .upsert(&ctx, input(fx.institution_id, "gabi@school.org"))
            .await
            .unwrap();

        assert!(result.created);
        let credential = result.created_password.expect("credential returned");
        assert_eq!(credential.len(), 8);

        let stored = fx.stores.users.find_user(result.member.id).await.unwrap().unwrap();
        assert_eq!(stored.role, UserRole::Teacher);
        let hash = stored.password_hash.expect("hash stored");
        assert_ne!(hash, credential);
        assert!(PasswordHasher::new().verify(&credential, &hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_role_and_password() {
        let fx = fixture().await;
        let ctx = context(UserRole::Coordinator);
        let created = fx
            .teachers
            .upsert(&ctx, input(fx.institution_id, "gabi@school.org"))
            .await
            .unwrap();
        let before = fx
            .stores
            .users
            .find_user(created.member.id)
            .await
            .unwrap()
            .unwrap();

        let mut update = input(fx.institution_id, "gabi@school.org");
        update.id = Some(created.member.id);
        update.name = "Gabriela".to_string();
        let updated = fx.teachers.upsert(&ctx, update).await.unwrap();

        assert!(!updated.created);
        assert!(updated.created_password.is_none());
        assert_eq!(updated.member.name, "Gabriela");
        let after = fx
            .stores
            .users
            .find_user(created.member.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.password_hash, before.password_hash);
        assert_eq!(after.role, UserRole::Teacher);
    }

    #[tokio::test]
    async fn test_update_cannot_reach_other_roles() {
        let fx = fixture().await;
        let admin = context(UserRole::Admin);
        let coordinator = fx
            .coordinators
            .upsert(&admin, input(fx.institution_id, "coord@school.org"))
            .await
            .unwrap();

        let mut update = input(fx.institution_id, "coord@school.org");
        update.id = Some(coordinator.member.id);
        let err = fx.teachers.upsert(&admin, update).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = fx
            .teachers
            .delete(&admin, coordinator.member.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_role_matrix() {
        let fx = fixture().await;
        let err = fx
            .coordinators
            .upsert(
                &context(UserRole::Coordinator),
                input(fx.institution_id, "x@school.org"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = fx
            .teachers
            .list(&context(UserRole::Teacher), &StaffFilter::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(fx.stores.users.list_users(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let fx = fixture().await;
        let ctx = context(UserRole::Admin);
        fx.teachers
            .upsert(&ctx, input(fx.institution_id, "gabi@school.org"))
            .await
            .unwrap();
        let err = fx
            .coordinators
            .upsert(&ctx, input(fx.institution_id, "Gabi@School.org"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}
