//! Settings service: institutions and rooms, ADMIN only.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use clickaulas_auth::rbac::Capability;
use clickaulas_core::error::AppError;
use clickaulas_database::{InstitutionStore, RoomStore};
use clickaulas_entity::{Institution, Room};

use super::input::{InstitutionInput, RoomInput};
use crate::context::RequestContext;

/// Manages institutions and rooms.
#[derive(Clone)]
pub struct SettingsService {
    institutions: Arc<dyn InstitutionStore>,
    rooms: Arc<dyn RoomStore>,
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService").finish_non_exhaustive()
    }
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(institutions: Arc<dyn InstitutionStore>, rooms: Arc<dyn RoomStore>) -> Self {
        Self {
            institutions,
            rooms,
        }
    }

    /// Lists institutions by name.
    pub async fn list_institutions(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Institution>, AppError> {
        ctx.require(Capability::SettingsManage)?;
        self.institutions.list_institutions().await
    }

    /// Creates or updates an institution.
    pub async fn upsert_institution(
        &self,
        ctx: &RequestContext,
        input: InstitutionInput,
    ) -> Result<Institution, AppError> {
        ctx.require(Capability::SettingsManage)?;
        let id = input.id;
        let record = input.into_record()?;

        let institution = match id {
            Some(id) => self
                .institutions
                .update_institution(id, &record)
                .await?
                .ok_or_else(|| AppError::not_found("Institution not found"))?,
            None => self.institutions.insert_institution(&record).await?,
        };

        info!(
            actor_id = %ctx.user_id,
            institution_id = %institution.id,
            created = id.is_none(),
            "Institution saved"
        );
        Ok(institution)
    }

    /// Deletes an institution no user or room references.
    pub async fn delete_institution(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require(Capability::SettingsManage)?;
        if !self.institutions.delete_institution(id).await? {
            return Err(AppError::not_found("Institution not found"));
        }
        info!(actor_id = %ctx.user_id, institution_id = %id, "Institution deleted");
        Ok(())
    }

    /// Lists rooms by name.
    pub async fn list_rooms(&self, ctx: &RequestContext) -> Result<Vec<Room>, AppError> {
        ctx.require(Capability::SettingsManage)?;
        self.rooms.list_rooms().await
    }

    /// Creates or updates a room.
    pub async fn upsert_room(
        &self,
        ctx: &RequestContext,
        input: RoomInput,
    ) -> Result<Room, AppError> {
        ctx.require(Capability::SettingsManage)?;
        let id = input.id;
        let record = input.into_record()?;

        let room = match id {
            Some(id) => self
                .rooms
                .update_room(id, &record)
                .await?
                .ok_or_else(|| AppError::not_found("Room not found"))?,
            None => self.rooms.insert_room(&record).await?,
        };

        info!(
            actor_id = %ctx.user_id,
            room_id = %room.id,
            created = id.is_none(),
            "Room saved"
        );
        Ok(room)
    }

    /// Deletes a room no schedule references.
    pub async fn delete_room(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require(Capability::SettingsManage)?;
        if !self.rooms.delete_room(id).await? {
            return Err(AppError::not_found("Room not found"));
        }
        info!(actor_id = %ctx.user_id, room_id = %id, "Room deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clickaulas_core::error::ErrorKind;
    use clickaulas_database::Stores;
    use clickaulas_entity::{CreateUser, UserRole};

    use super::*;
    use crate::context::testing::context;

    fn service(stores: &Stores) -> SettingsService {
        SettingsService::new(stores.institutions.clone(), stores.rooms.clone())
    }

    fn room(name: &str) -> RoomInput {
        RoomInput {
            name: name.to_string(),
            capacity: Some(30),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_non_admin_cannot_touch_settings() {
        let stores = Stores::memory();
        let settings = service(&stores);
        let admin = context(UserRole::Admin);
        let existing = settings.upsert_room(&admin, room("101")).await.unwrap();

        for role in [UserRole::Coordinator, UserRole::Teacher] {
            let ctx = context(role);
            let err = settings.upsert_room(&ctx, room("102")).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
            let err = settings.delete_room(&ctx, existing.id).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
            let err = settings
                .upsert_institution(
                    &ctx,
                    InstitutionInput {
                        name: "Escola".to_string(),
                        ..Default::default()
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authorization);
        }

        assert_eq!(stores.rooms.list_rooms().await.unwrap().len(), 1);
        assert!(stores.institutions.list_institutions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_updates_existing_room() {
        let stores = Stores::memory();
        let settings = service(&stores);
        let admin = context(UserRole::Admin);
        let created = settings.upsert_room(&admin, room("101")).await.unwrap();

        let mut update = room("101-B");
        update.id = Some(created.id);
        let updated = settings.upsert_room(&admin, update).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "101-B");

        let mut missing = room("x");
        missing.id = Some(Uuid::new_v4());
        let err = settings.upsert_room(&admin, missing).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_referenced_institution_is_in_use() {
        let stores = Stores::memory();
        let settings = service(&stores);
        let admin = context(UserRole::Admin);
        let institution = settings
            .upsert_institution(
                &admin,
                InstitutionInput {
                    name: "Escola Sul".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let mut teacher = CreateUser::account("Ana", "ana@school.org", UserRole::Teacher);
        teacher.institution_id = Some(institution.id);
        let teacher = stores.users.insert_user(&teacher).await.unwrap();

        let err = settings
            .delete_institution(&admin, institution.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InUse);

        assert!(stores.institutions.find_institution(institution.id).await.unwrap().is_some());
        let teacher = stores.users.find_user(teacher.id).await.unwrap().unwrap();
        assert_eq!(teacher.institution_id, Some(institution.id));
    }

    #[tokio::test]
    async fn test_delete_missing_room_is_not_found() {
        let stores = Stores::memory();
        let settings = service(&stores);
        let err = settings
            .delete_room(&context(UserRole::Admin), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
