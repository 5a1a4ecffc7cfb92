//! Account business logic on top of the `models` entities.
//! - `auth` holds the user aggregate, its collaborators and `AuthService`.
//! - Storage is reached only through the `UserRepository` trait.

pub mod auth;
#[cfg(test)]
pub mod test_support;
