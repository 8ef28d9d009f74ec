use chrono::Utc;
use entity::{room::RoomType, user::UserRole};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn occupancy<'a>(&'a mut self) -> OccupancyFixtures<'a> {
        OccupancyFixtures { setup: self }
    }
}

pub struct OccupancyFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> OccupancyFixtures<'a> {
    pub async fn insert_room(
        &self,
        hostel_id: i32,
        number: &str,
        capacity: i32,
    ) -> Result<entity::room::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Room::insert(entity::room::ActiveModel {
                hostel_id: ActiveValue::Set(hostel_id),
                number: ActiveValue::Set(number.to_string()),
                floor: ActiveValue::Set(1),
                room_type: ActiveValue::Set(RoomType::Double),
                capacity: ActiveValue::Set(capacity),
                description: ActiveValue::Set(None),
                is_deleted: ActiveValue::Set(false),
                deleted_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a vacant bed into `room`.
    pub async fn insert_bed(
        &self,
        room: &entity::room::Model,
        number: &str,
    ) -> Result<entity::bed::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Bed::insert(entity::bed::ActiveModel {
                room_id: ActiveValue::Set(room.id),
                hostel_id: ActiveValue::Set(room.hostel_id),
                number: ActiveValue::Set(number.to_string()),
                is_occupied: ActiveValue::Set(false),
                tenant_id: ActiveValue::Set(None),
                is_deleted: ActiveValue::Set(false),
                deleted_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a TENANT user together with a tenant profile in `hostel_id`.
    pub async fn insert_tenant(
        &mut self,
        hostel_id: i32,
    ) -> Result<entity::tenant_profile::Model, TestError> {
        let user = self
            .setup
            .user()
            .insert_user(UserRole::Tenant, Some(hostel_id))
            .await?;
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::TenantProfile::insert(entity::tenant_profile::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                hostel_id: ActiveValue::Set(hostel_id),
                full_name: ActiveValue::Set(format!("Tenant {}", user.id)),
                guardian_name: ActiveValue::Set(None),
                guardian_phone: ActiveValue::Set(None),
                emergency_contact: ActiveValue::Set(None),
                current_bed_id: ActiveValue::Set(None),
                check_in_date: ActiveValue::Set(None),
                check_out_date: ActiveValue::Set(None),
                is_deleted: ActiveValue::Set(false),
                deleted_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Link `bed` and `tenant` on both sides without going through the occupancy service.
    pub async fn occupy_bed(
        &self,
        bed: &entity::bed::Model,
        tenant: &entity::tenant_profile::Model,
    ) -> Result<(entity::bed::Model, entity::tenant_profile::Model), TestError> {
        let mut bed_am = bed.clone().into_active_model();
        bed_am.is_occupied = ActiveValue::Set(true);
        bed_am.tenant_id = ActiveValue::Set(Some(tenant.id));
        let bed = bed_am.update(&self.setup.db).await?;

        let mut tenant_am = tenant.clone().into_active_model();
        tenant_am.current_bed_id = ActiveValue::Set(Some(bed.id));
        let tenant = tenant_am.update(&self.setup.db).await?;

        Ok((bed, tenant))
    }
}
