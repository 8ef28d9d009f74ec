use entity::room::RoomType;
use hostel::server::{
    config::PolicyConfig,
    data::room::NewRoom,
    error::{
        resource::{ConflictError, ValidationError},
        Error,
    },
    service::occupancy::OccupancyService,
};
use hostel_test_utils::prelude::*;
use sea_orm::EntityTrait;

use crate::util::{admin_of, date};

fn new_room(hostel_id: i32, number: &str, capacity: i32) -> NewRoom {
    NewRoom {
        hostel_id,
        number: number.to_string(),
        floor: 1,
        room_type: RoomType::Double,
        capacity,
        description: None,
    }
}

/// Expect the first assignment to link both sides and the second to conflict
#[tokio::test]
async fn assigning_an_occupied_bed_conflicts() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let tenant1 = test.occupancy().insert_tenant(1).await?;
    let tenant2 = test.occupancy().insert_tenant(1).await?;
    let actor = admin_of(admin.id, vec![1]);
    let policy = PolicyConfig::default();
    let service = OccupancyService::new(&test.db, &policy);

    let room = service.create_room(&actor, new_room(1, "101", 2)).await.unwrap();
    let bed_a = service.create_bed(&actor, room.id, "A".to_string()).await.unwrap();
    service.create_bed(&actor, room.id, "B".to_string()).await.unwrap();

    let (bed, tenant) = service.assign_bed(&actor, bed_a.id, tenant1.id).await.unwrap();
    assert!(bed.is_occupied);
    assert_eq!(bed.tenant_id, Some(tenant1.id));
    assert_eq!(tenant.current_bed_id, Some(bed_a.id));

    let result = service.assign_bed(&actor, bed_a.id, tenant2.id).await;
    assert!(matches!(
        result,
        Err(Error::Conflict(ConflictError::BedOccupied(id))) if id == bed_a.id
    ));

    let tenant2 = entity::prelude::TenantProfile::find_by_id(tenant2.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(tenant2.current_bed_id, None);

    Ok(())
}

/// Expect exactly one of two simultaneous assignments of the same bed to succeed
#[tokio::test]
async fn concurrent_assignment_has_one_winner() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let room = test.occupancy().insert_room(1, "101", 2).await?;
    let bed = test.occupancy().insert_bed(&room, "A").await?;
    let tenant1 = test.occupancy().insert_tenant(1).await?;
    let tenant2 = test.occupancy().insert_tenant(1).await?;
    let actor = admin_of(admin.id, vec![1]);
    let policy = PolicyConfig::default();
    let service = OccupancyService::new(&test.db, &policy);

    let (first, second) = futures::future::join(
        service.assign_bed(&actor, bed.id, tenant1.id),
        service.assign_bed(&actor, bed.id, tenant2.id),
    )
    .await;

    assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);

    let bed = entity::prelude::Bed::find_by_id(bed.id)
        .one(&test.db)
        .await?
        .unwrap();
    let holders: Vec<_> = entity::prelude::TenantProfile::find()
        .all(&test.db)
        .await?
        .into_iter()
        .filter(|t| t.current_bed_id == Some(bed.id))
        .collect();

    assert_eq!(holders.len(), 1);
    assert_eq!(bed.tenant_id, Some(holders[0].id));

    Ok(())
}

/// Expect check-out of a tenant without a bed to fail as not checked in
#[tokio::test]
async fn check_out_without_bed_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let tenant = test.occupancy().insert_tenant(1).await?;
    let policy = PolicyConfig::default();
    let service = OccupancyService::new(&test.db, &policy);

    let result = service
        .check_out(&admin_of(admin.id, vec![1]), tenant.id, date(2025, 6, 30), None)
        .await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::TenantNotCheckedIn(id))) if id == tenant.id
    ));

    Ok(())
}

/// Expect a room to refuse deletion while a bed is occupied, then delete and restore cleanly
#[tokio::test]
async fn room_delete_waits_for_vacancy() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let room = test.occupancy().insert_room(1, "101", 2).await?;
    let bed = test.occupancy().insert_bed(&room, "A").await?;
    test.occupancy().insert_bed(&room, "B").await?;
    let tenant = test.occupancy().insert_tenant(1).await?;
    test.occupancy().occupy_bed(&bed, &tenant).await?;
    let actor = admin_of(admin.id, vec![1]);
    let policy = PolicyConfig::default();
    let service = OccupancyService::new(&test.db, &policy);

    let error = match service.delete_room(&actor, room.id).await {
        Err(Error::Validation(error @ ValidationError::RoomHasOccupiedBeds { count: 1, .. })) => {
            error
        }
        other => panic!("expected occupied-bed refusal, got {:?}", other),
    };
    assert!(error.to_string().contains('1'));

    // Nothing was soft-deleted by the refused attempt
    let beds = entity::prelude::Bed::find().all(&test.db).await?;
    assert!(beds.iter().all(|b| !b.is_deleted));

    service.vacate_bed(&actor, bed.id).await.unwrap();
    service.delete_room(&actor, room.id).await.unwrap();

    let deleted = entity::prelude::Room::find_by_id(room.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert!(deleted.is_deleted);
    assert!(deleted.deleted_at.is_some());

    let restored = service.restore_room(&actor, room.id).await.unwrap();
    assert!(!restored.is_deleted);
    assert!(restored.deleted_at.is_none());

    let beds = entity::prelude::Bed::find().all(&test.db).await?;
    assert!(beds.iter().all(|b| !b.is_deleted));

    Ok(())
}

/// Expect a full stay to leave one closed record and a vacant bed behind
#[tokio::test]
async fn check_in_then_out_records_stay() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let room = test.occupancy().insert_room(1, "101", 1).await?;
    let bed = test.occupancy().insert_bed(&room, "A").await?;
    let tenant = test.occupancy().insert_tenant(1).await?;
    let actor = admin_of(admin.id, vec![1]);
    let policy = PolicyConfig::default();
    let service = OccupancyService::new(&test.db, &policy);

    let checked_in = service
        .check_in(&actor, tenant.id, bed.id, date(2025, 6, 1))
        .await
        .unwrap();
    assert_eq!(checked_in.current_bed_id, Some(bed.id));
    assert_eq!(checked_in.check_in_date, Some(date(2025, 6, 1)));

    let checked_out = service
        .check_out(&actor, tenant.id, date(2025, 6, 30), Some("Left keys".to_string()))
        .await
        .unwrap();
    assert_eq!(checked_out.current_bed_id, None);
    assert_eq!(checked_out.check_out_date, Some(date(2025, 6, 30)));

    let history = service.stay_history(&actor, tenant.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].check_out_date, Some(date(2025, 6, 30)));

    let available = service.list_available_beds(&actor, 1).await.unwrap();
    assert_eq!(available.len(), 1);

    Ok(())
}
