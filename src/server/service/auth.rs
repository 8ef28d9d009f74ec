//! Password login and logout.

use chrono::Utc;
use entity::audit_log::AuditAction;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{audit::NewAuditEntry, user::UserRepository},
    error::{auth::AuthError, Error},
    model::db::UserModel,
    service::audit::AuditService,
    util::password::verify_password,
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifies credentials and records the login
    ///
    /// Unknown identifiers, users without a password and wrong passwords all yield the
    /// same [`AuthError::InvalidCredentials`], so callers cannot enumerate accounts.
    ///
    /// # Arguments
    /// - `identifier` - Email address or phone number
    /// - `password` - Plaintext password
    ///
    /// # Returns
    /// - `Ok(UserModel)` - Authenticated user
    /// - `Err(Error::AuthError(InvalidCredentials))` - Unknown user or wrong password
    /// - `Err(Error::AuthError(AccountInactive))` - Correct password on a deactivated account
    pub async fn login(&self, identifier: &str, password: &str) -> Result<UserModel, Error> {
        let user_repo = UserRepository::new(self.db);

        let user = user_repo
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::AccountInactive(user.id).into());
        }

        user_repo
            .update_last_login(user.id, Utc::now().naive_utc())
            .await?;

        let mut entry = NewAuditEntry::new(AuditAction::Login, "user", user.id).by(user.id);
        if let Some(hostel_id) = user.primary_hostel_id {
            entry = entry.in_hostel(hostel_id);
        }
        AuditService::new(self.db).record(entry).await;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(user)
    }

    pub async fn logout(&self, user_id: i32) {
        AuditService::new(self.db)
            .record(NewAuditEntry::new(AuditAction::Logout, "user", user_id).by(user_id))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use entity::user::UserRole;
    use hostel_test_utils::prelude::*;

    use super::*;
    use crate::server::{data::audit::AuditRepository, util::password::hash_password};

    async fn insert_with_password(test: &mut TestContext) -> Result<UserModel, TestError> {
        let hash = hash_password("s3cret").unwrap();

        test.user()
            .insert_user_with_credentials(UserRole::HostelAdmin, None, "ana@hostel.test", Some(hash))
            .await
    }

    /// Expect a correct password to log in, set last_login and write a LOGIN entry
    #[tokio::test]
    async fn logs_in_with_correct_password() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_core_tables().build().await?;
        let user = insert_with_password(&mut test).await?;

        let service = AuthService::new(&test.db);
        let result = service.login("ana@hostel.test", "s3cret").await;

        assert_eq!(result.unwrap().id, user.id);
        let stored = UserRepository::new(&test.db).find_by_id(user.id).await?.unwrap();
        assert!(stored.last_login.is_some());
        let entries = AuditRepository::new(&test.db)
            .list_for_entity("user", user.id)
            .await?;
        assert_eq!(entries[0].action, AuditAction::Login);

        Ok(())
    }

    /// Expect wrong password and unknown user to fail identically
    #[tokio::test]
    async fn rejects_bad_credentials() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_core_tables().build().await?;
        insert_with_password(&mut test).await?;

        let service = AuthService::new(&test.db);
        let wrong_password = service.login("ana@hostel.test", "guess").await;
        let unknown_user = service.login("nobody@hostel.test", "s3cret").await;

        assert!(matches!(
            wrong_password,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            unknown_user,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));

        Ok(())
    }

    /// Expect a deactivated account to be refused after password verification
    #[tokio::test]
    async fn rejects_inactive_account() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_core_tables().build().await?;
        let user = insert_with_password(&mut test).await?;
        UserRepository::new(&test.db)
            .set_active(user.id, false)
            .await?;

        let service = AuthService::new(&test.db);
        let result = service.login("ana@hostel.test", "s3cret").await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::AccountInactive(_)))
        ));

        Ok(())
    }
}
