//! Account registration and login, split into domain, repository and service
//! layers. Hashing, token signing, time and ids are injected collaborators.

pub mod domain;
pub mod errors;
pub mod hasher;
pub mod repo;
pub mod repository;
pub mod service;
pub mod system;
pub mod token;

pub use service::AuthService;
