use chrono::Duration;
use entity::user::UserRole;
use hostel::{
    model::visitor::CreateVisitorDto,
    server::{
        config::PolicyConfig,
        error::access::AuthorizationError,
        model::principal::Principal,
        notify::LogNotifier,
        service::{
            access::AccessControl, identity::IdentityService, visitor::VisitorService,
        },
    },
};
use hostel_test_utils::prelude::*;

use crate::util::{admin_of, t0};

fn visitor(email: &str, duration_days: Option<i64>) -> CreateVisitorDto {
    CreateVisitorDto {
        email: Some(email.to_string()),
        phone: None,
        full_name: Some("Guest".to_string()),
        hostel_id: 1,
        duration_days,
        password: None,
    }
}

/// Expect a 30 day visitor to pass on day 29, fail on day 31, and extend from day 31
#[tokio::test]
async fn visitor_expires_and_extends_from_now() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let admin = test.user().insert_hostel_admin(&[1]).await?;
    let actor = admin_of(admin.id, vec![1]);
    let policy = PolicyConfig::default();
    let notifier = LogNotifier;

    let created = VisitorService::new(&test.db, &policy, &notifier)
        .with_access(AccessControl::at(t0()))
        .create_visitor(&actor, visitor("guest@hostel.test", Some(30)))
        .await
        .unwrap();
    assert_eq!(created.expires_at, t0() + Duration::days(30));
    assert!(created.temporary_password.is_some());

    let principal = IdentityService::new(&test.db)
        .resolve_principal(created.user_id)
        .await
        .unwrap();
    assert_eq!(principal.role(), UserRole::Visitor);

    let day_29 = AccessControl::at(t0() + Duration::days(29));
    assert!(day_29.check_hostel_access(&principal, 1).is_ok());

    let day_31 = AccessControl::at(t0() + Duration::days(31));
    let denied = day_31.check_hostel_access(&principal, 1).unwrap_err();
    assert!(matches!(denied, AuthorizationError::VisitorExpired { .. }));
    assert!(denied.to_string().contains("expired"));
    assert!(day_31
        .require_role(&principal, &[UserRole::Visitor])
        .is_err());

    let extended = VisitorService::new(&test.db, &policy, &notifier)
        .with_access(day_31)
        .extend_visitor_access(&actor, created.user_id, 10)
        .await
        .unwrap();
    assert_eq!(extended.expires_at, t0() + Duration::days(41));
    assert!(extended.is_active);

    Ok(())
}

/// Expect cleanup to deactivate only expired visitors and revocation to end access at once
#[tokio::test]
async fn cleanup_and_revoke_end_access() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_hostel("H1")
        .build()
        .await?;
    let super_admin = test.user().insert_super_admin().await?;
    let actor = Principal::SuperAdmin {
        user_id: super_admin.id,
    };
    let (expired, _) = test
        .user()
        .insert_visitor(1, t0() - Duration::days(1))
        .await?;
    let (current, _) = test
        .user()
        .insert_visitor(1, t0() + Duration::days(30))
        .await?;
    let (revoked, _) = test
        .user()
        .insert_visitor(1, t0() + Duration::days(30))
        .await?;
    let policy = PolicyConfig::default();
    let notifier = LogNotifier;
    let service = VisitorService::new(&test.db, &policy, &notifier)
        .with_access(AccessControl::at(t0()));

    let deactivated = service.cleanup_expired_visitors().await.unwrap();
    assert_eq!(deactivated, 1);

    service
        .revoke_visitor_access(&actor, revoked.id)
        .await
        .unwrap();

    let active = service.get_active_visitors(&actor, 1).await.unwrap();
    let ids: Vec<i32> = active.iter().map(|v| v.user_id).collect();

    assert_eq!(ids, vec![current.id]);
    assert!(!ids.contains(&expired.id));

    Ok(())
}
