use async_trait::async_trait;

use super::domain::User;
use super::errors::AuthError;

/// Persistence for user accounts.
///
/// Implementations must enforce email uniqueness among live users at the
/// storage level and report a violation as [`AuthError::Conflict`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Live (not soft-deleted) user with this normalized email.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
    async fn create(&self, user: User) -> Result<User, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<HashMap<Uuid, User>>, // key: user id
    }

    impl MockUserRepository {
        fn users(&self) -> Result<MutexGuard<'_, HashMap<Uuid, User>>, AuthError> {
            self.users
                .lock()
                .map_err(|_| AuthError::Repository("in-memory store poisoned".into()))
        }

        /// Insert without the uniqueness check, e.g. legacy or odd records.
        pub fn seed(&self, user: User) -> Result<(), AuthError> {
            self.users()?.insert(user.id, user);
            Ok(())
        }

        pub fn count(&self) -> usize {
            self.users().map(|u| u.len()).unwrap_or(0)
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
            let users = self.users()?;
            Ok(users.values().find(|u| !u.is_deleted && u.email == email).cloned())
        }

        async fn create(&self, user: User) -> Result<User, AuthError> {
            let mut users = self.users()?;
            if users.values().any(|u| !u.is_deleted && u.email == user.email) {
                return Err(AuthError::Conflict);
            }
            users.insert(user.id, user.clone());
            Ok(user)
        }
    }
}
