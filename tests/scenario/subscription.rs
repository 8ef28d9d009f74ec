use entity::{plan::PlanTier, room::RoomType};
use hostel::server::{
    config::PolicyConfig,
    data::room::NewRoom,
    error::{subscription::SubscriptionLimitError, Error},
    model::principal::Principal,
    service::{occupancy::OccupancyService, subscription::SubscriptionService},
};
use hostel_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::util::admin_of;

fn room(number: &str) -> NewRoom {
    NewRoom {
        hostel_id: 1,
        number: number.to_string(),
        floor: 0,
        room_type: RoomType::Single,
        capacity: 1,
        description: None,
    }
}

/// Expect five rooms on the free plan and a limit error naming the cap and plan on the sixth
#[tokio::test]
async fn free_plan_caps_rooms_at_five() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let actor = admin_of(admin.id, vec![1]);
    let policy = PolicyConfig::default();
    let occupancy = OccupancyService::new(&test.db, &policy);
    let subscriptions = SubscriptionService::new(&test.db, &policy);

    for number in ["101", "102", "103", "104", "105"] {
        occupancy.create_room(&actor, room(number)).await.unwrap();
    }

    let result = subscriptions.check_room_limit(1).await;
    let Err(Error::SubscriptionLimit(error)) = result else {
        panic!("expected the room limit to be reached");
    };
    assert_eq!(
        error,
        SubscriptionLimitError::Rooms {
            max: 5,
            plan: "Free Plan".to_string()
        }
    );
    let message = error.to_string();
    assert!(message.contains('5'));
    assert!(message.contains("Free Plan"));

    let sixth = occupancy.create_room(&actor, room("106")).await;
    assert!(matches!(sixth, Err(Error::SubscriptionLimit(_))));

    Ok(())
}

/// Expect repeated limit checks to provision exactly one subscription
#[tokio::test]
async fn provisions_free_subscription_once() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let policy = PolicyConfig::default();
    let subscriptions = SubscriptionService::new(&test.db, &policy);

    subscriptions.check_room_limit(1).await.unwrap();
    subscriptions.check_tenant_limit(1).await.unwrap();
    subscriptions.check_room_limit(1).await.unwrap();

    let count = entity::prelude::Subscription::find().count(&test.db).await?;
    assert_eq!(count, 1);

    let (_, plan) = subscriptions.get_subscription(1).await.unwrap();
    assert_eq!(plan.tier, PlanTier::Free);

    Ok(())
}

/// Expect limit checks to pass when no free plan exists to provision
#[tokio::test]
async fn passes_without_free_plan() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let policy = PolicyConfig::default();

    let result = SubscriptionService::new(&test.db, &policy)
        .check_room_limit(1)
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Expect an upgrade to premium to lift the room cap
#[tokio::test]
async fn premium_plan_lifts_room_cap() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_plans()
        .with_hostel("H1")
        .build()
        .await?;
    let super_admin = test.user().insert_super_admin().await?;
    let actor = Principal::SuperAdmin {
        user_id: super_admin.id,
    };
    let policy = PolicyConfig::default();
    let occupancy = OccupancyService::new(&test.db, &policy);
    let subscriptions = SubscriptionService::new(&test.db, &policy);

    for number in ["101", "102", "103", "104", "105"] {
        occupancy.create_room(&actor, room(number)).await.unwrap();
    }

    subscriptions
        .assign_plan(&actor, 1, PlanTier::Premium, None, true)
        .await
        .unwrap();

    assert!(occupancy.create_room(&actor, room("106")).await.is_ok());

    let usage = subscriptions.get_feature_usage(&actor, 1).await.unwrap();
    assert_eq!(usage.plan, "Premium Plan");
    assert_eq!(usage.rooms.current, 6);
    assert_eq!(usage.rooms.max, None);

    let count = entity::prelude::Subscription::find().count(&test.db).await?;
    assert_eq!(count, 1);

    Ok(())
}
