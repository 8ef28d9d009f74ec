use chrono::Duration;
use entity::user::UserRole;
use hostel::server::{
    config::PolicyConfig,
    error::{access::AuthorizationError, auth::AuthError, Error},
    service::{
        access::AccessControl, identity::IdentityService, occupancy::OccupancyService,
    },
};
use hostel_test_utils::prelude::*;
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::util::t0;

/// Expect an admin of hostels 1 and 2 to reach hostel 1 and be denied hostel 3
#[tokio::test]
async fn admin_is_scoped_to_associated_hostels() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .with_hostel("H2")
        .with_hostel("H3")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1, 2]).await?;

    let principal = IdentityService::new(&test.db)
        .resolve_principal(admin.id)
        .await
        .unwrap();
    let access = AccessControl::new();

    assert!(access.check_hostel_access(&principal, 1).is_ok());
    assert!(matches!(
        access.check_hostel_access(&principal, 3),
        Err(AuthorizationError::HostelAccessDenied { hostel_id: 3, .. })
    ));

    Ok(())
}

/// Expect an admin to be refused the room list of a hostel outside their scope
#[tokio::test]
async fn admin_cannot_list_foreign_rooms() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .with_hostel("H2")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    test.occupancy().insert_room(2, "201", 2).await?;
    let principal = IdentityService::new(&test.db)
        .resolve_principal(admin.id)
        .await
        .unwrap();
    let policy = PolicyConfig::default();

    let result = OccupancyService::new(&test.db, &policy)
        .list_rooms(&principal, 2)
        .await;

    assert!(matches!(
        result,
        Err(Error::Authorization(AuthorizationError::HostelAccessDenied { .. }))
    ));

    Ok(())
}

/// Expect an expired visitor to fail both the hostel and the role check
#[tokio::test]
async fn expired_visitor_is_denied_everywhere() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let (visitor, _) = test
        .user()
        .insert_visitor(1, t0() - Duration::hours(1))
        .await?;

    let principal = IdentityService::new(&test.db)
        .resolve_principal(visitor.id)
        .await
        .unwrap();
    let access = AccessControl::at(t0());

    assert!(matches!(
        access.check_hostel_access(&principal, 1),
        Err(AuthorizationError::VisitorExpired { .. })
    ));
    assert!(matches!(
        access.require_role(&principal, &[UserRole::Visitor]),
        Err(AuthorizationError::VisitorExpired { .. })
    ));

    Ok(())
}

/// Expect a deactivated tenant to no longer resolve to a principal
#[tokio::test]
async fn inactive_tenant_does_not_resolve() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let tenant = test.occupancy().insert_tenant(1).await?;
    let mut user = entity::prelude::User::find_by_id(tenant.user_id)
        .one(&test.db)
        .await?
        .unwrap()
        .into_active_model();
    user.is_active = ActiveValue::Set(false);
    user.update(&test.db).await?;

    let result = IdentityService::new(&test.db)
        .resolve_principal(tenant.user_id)
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::AccountInactive(_)))
    ));

    Ok(())
}
