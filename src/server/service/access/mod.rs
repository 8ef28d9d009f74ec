//! Access control decisions.
//!
//! [`AccessControl`] is a pure decision component: it evaluates a resolved [`Principal`]
//! against a hostel, a role set, a resource owner or the permission matrix and never
//! touches the database. The evaluation instant is fixed at construction so that a
//! visitor's expiry is judged consistently across every check of one request, and so
//! tests can pin time with [`AccessControl::at`].
//!
//! Visitor expiry is folded into every check. An expired visitor is denied hostel access,
//! role gates, ownership checks and permissions alike, independent of `is_active`.

pub mod permission;

use chrono::{NaiveDateTime, Utc};
use entity::user::UserRole;

use crate::server::{
    error::access::AuthorizationError,
    model::principal::Principal,
    service::access::permission::{has_permission, Action, Resource},
};

#[derive(Debug, Clone, Copy)]
pub struct AccessControl {
    now: NaiveDateTime,
}

impl AccessControl {
    /// Access control evaluated at the current time
    pub fn new() -> Self {
        Self::at(Utc::now().naive_utc())
    }

    /// Access control evaluated at `now`
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// The instant checks are evaluated at
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Whether `principal` is a visitor past their expiry
    pub fn is_visitor_expired(&self, principal: &Principal) -> bool {
        match principal {
            Principal::Visitor { expires_at, .. } => self.now > *expires_at,
            _ => false,
        }
    }

    /// Denies expired visitors
    ///
    /// # Returns
    /// - `Ok(())` - Principal is not a visitor, or the visitor has not expired
    /// - `Err(AuthorizationError::VisitorExpired)` - Visitor expiry has passed
    pub fn ensure_not_expired(&self, principal: &Principal) -> Result<(), AuthorizationError> {
        if self.is_visitor_expired(principal) {
            return Err(AuthorizationError::VisitorExpired {
                user_id: principal.user_id(),
            });
        }

        Ok(())
    }

    /// Checks that `principal` may act on `hostel_id`
    ///
    /// # Logic
    /// - Super admins are allowed everywhere
    /// - Expired visitors are denied regardless of hostel
    /// - Hostel admins are allowed on hostels in their resolved hostel set
    /// - Tenants and visitors are allowed on their single hostel
    pub fn check_hostel_access(
        &self,
        principal: &Principal,
        hostel_id: i32,
    ) -> Result<(), AuthorizationError> {
        self.ensure_not_expired(principal)?;

        let allowed = match principal {
            Principal::SuperAdmin { .. } => true,
            Principal::HostelAdmin { hostel_ids, .. } => hostel_ids.contains(&hostel_id),
            Principal::Tenant {
                hostel_id: own_hostel_id,
                ..
            }
            | Principal::Visitor {
                hostel_id: own_hostel_id,
                ..
            } => *own_hostel_id == hostel_id,
        };

        if !allowed {
            return Err(AuthorizationError::HostelAccessDenied {
                user_id: principal.user_id(),
                hostel_id,
            });
        }

        Ok(())
    }

    /// Checks that `principal` holds one of `allowed` and, if a visitor, has not expired
    pub fn require_role<'p>(
        &self,
        principal: &'p Principal,
        allowed: &[UserRole],
    ) -> Result<&'p Principal, AuthorizationError> {
        self.ensure_not_expired(principal)?;

        let role = principal.role();
        if !allowed.contains(&role) {
            return Err(AuthorizationError::RoleNotAllowed {
                user_id: principal.user_id(),
                role,
                allowed: allowed.to_vec(),
            });
        }

        Ok(principal)
    }

    /// Checks that `principal` owns a resource; super admins bypass the check
    pub fn check_resource_ownership(
        &self,
        principal: &Principal,
        owner_user_id: i32,
    ) -> Result<(), AuthorizationError> {
        self.ensure_not_expired(principal)?;

        match principal {
            Principal::SuperAdmin { .. } => Ok(()),
            _ if principal.user_id() == owner_user_id => Ok(()),
            _ => Err(AuthorizationError::NotResourceOwner {
                user_id: principal.user_id(),
                owner_id: owner_user_id,
            }),
        }
    }

    /// Checks the static permission matrix for the principal's role
    pub fn check_permission(
        &self,
        principal: &Principal,
        action: Action,
        resource: Resource,
    ) -> Result<(), AuthorizationError> {
        self.ensure_not_expired(principal)?;

        let role = principal.role();
        if !has_permission(role, action, resource) {
            return Err(AuthorizationError::PermissionDenied {
                role,
                action: action.to_string(),
                resource: resource.to_string(),
            });
        }

        Ok(())
    }

    /// Runs the permission and hostel checks every hostel-scoped mutation needs
    pub fn authorize(
        &self,
        principal: &Principal,
        action: Action,
        resource: Resource,
        hostel_id: i32,
    ) -> Result<(), AuthorizationError> {
        self.check_permission(principal, action, resource)?;
        self.check_hostel_access(principal, hostel_id)
    }
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn visitor(expires_at: NaiveDateTime) -> Principal {
        Principal::Visitor {
            user_id: 7,
            hostel_id: 1,
            expires_at,
        }
    }

    mod check_hostel_access {
        use super::*;

        /// Expect super admins to access any hostel
        #[test]
        fn allows_super_admin_everywhere() {
            let access = AccessControl::at(t0());
            let principal = Principal::SuperAdmin { user_id: 1 };

            assert!(access.check_hostel_access(&principal, 99).is_ok());
        }

        /// Expect a hostel admin to access only associated hostels
        #[test]
        fn scopes_hostel_admin_to_associations() {
            let access = AccessControl::at(t0());
            let principal = Principal::HostelAdmin {
                user_id: 2,
                hostel_ids: vec![1, 2],
            };

            assert!(access.check_hostel_access(&principal, 1).is_ok());
            assert_eq!(
                access.check_hostel_access(&principal, 3),
                Err(AuthorizationError::HostelAccessDenied {
                    user_id: 2,
                    hostel_id: 3
                })
            );
        }

        /// Expect a hostel admin without any hostel to be denied everywhere
        #[test]
        fn denies_admin_without_hostels() {
            let access = AccessControl::at(t0());
            let principal = Principal::HostelAdmin {
                user_id: 2,
                hostel_ids: Vec::new(),
            };

            assert!(access.check_hostel_access(&principal, 1).is_err());
        }

        /// Expect tenants to be limited to their own hostel
        #[test]
        fn scopes_tenant_to_primary_hostel() {
            let access = AccessControl::at(t0());
            let principal = Principal::Tenant {
                user_id: 3,
                hostel_id: 1,
            };

            assert!(access.check_hostel_access(&principal, 1).is_ok());
            assert!(access.check_hostel_access(&principal, 2).is_err());
        }

        /// Expect a visitor to pass on day 29 and fail with an expiry denial on day 31
        #[test]
        fn denies_expired_visitor() {
            let principal = visitor(t0() + Duration::days(30));

            let day_29 = AccessControl::at(t0() + Duration::days(29));
            let day_31 = AccessControl::at(t0() + Duration::days(31));

            assert!(day_29.check_hostel_access(&principal, 1).is_ok());
            let result = day_31.check_hostel_access(&principal, 1);
            assert_eq!(result, Err(AuthorizationError::VisitorExpired { user_id: 7 }));
            assert!(result.unwrap_err().to_string().contains("expired"));
        }

        /// Expect a visitor at the exact expiry instant to still be allowed
        #[test]
        fn allows_visitor_at_expiry_instant() {
            let principal = visitor(t0());

            assert!(AccessControl::at(t0())
                .check_hostel_access(&principal, 1)
                .is_ok());
        }
    }

    mod require_role {
        use super::*;

        /// Expect the principal to be returned when its role is allowed
        #[test]
        fn returns_principal_for_allowed_role() {
            let access = AccessControl::at(t0());
            let principal = Principal::Tenant {
                user_id: 3,
                hostel_id: 1,
            };

            let result = access.require_role(&principal, &[UserRole::Tenant, UserRole::HostelAdmin]);

            assert_eq!(result, Ok(&principal));
        }

        /// Expect a role outside the allowed set to be denied
        #[test]
        fn denies_other_roles() {
            let access = AccessControl::at(t0());
            let principal = Principal::Tenant {
                user_id: 3,
                hostel_id: 1,
            };

            let result = access.require_role(&principal, &[UserRole::SuperAdmin]);

            assert!(matches!(
                result,
                Err(AuthorizationError::RoleNotAllowed {
                    role: UserRole::Tenant,
                    ..
                })
            ));
        }

        /// Expect an expired visitor to fail even a visitor-only gate
        #[test]
        fn denies_expired_visitor_with_allowed_role() {
            let access = AccessControl::at(t0() + Duration::days(1));
            let principal = visitor(t0());

            let result = access.require_role(&principal, &[UserRole::Visitor]);

            assert_eq!(result, Err(AuthorizationError::VisitorExpired { user_id: 7 }));
        }
    }

    mod check_resource_ownership {
        use super::*;

        /// Expect super admins to bypass ownership and others to need a matching id
        #[test]
        fn requires_matching_owner() {
            let access = AccessControl::at(t0());
            let admin = Principal::SuperAdmin { user_id: 1 };
            let tenant = Principal::Tenant {
                user_id: 3,
                hostel_id: 1,
            };

            assert!(access.check_resource_ownership(&admin, 3).is_ok());
            assert!(access.check_resource_ownership(&tenant, 3).is_ok());
            assert_eq!(
                access.check_resource_ownership(&tenant, 4),
                Err(AuthorizationError::NotResourceOwner {
                    user_id: 3,
                    owner_id: 4
                })
            );
        }
    }

    mod check_permission {
        use super::*;

        /// Expect a visitor write to be denied with the action and resource named
        #[test]
        fn denies_visitor_write() {
            let access = AccessControl::at(t0());
            let principal = visitor(t0() + Duration::days(1));

            let result = access.check_permission(&principal, Action::Write, Resource::Rooms);

            assert_eq!(
                result,
                Err(AuthorizationError::PermissionDenied {
                    role: UserRole::Visitor,
                    action: "write".to_string(),
                    resource: "rooms".to_string(),
                })
            );
        }
    }
}
