//! SeaORM entities and connection helpers for the account store.

pub mod errors;
pub mod db;
pub mod user;

#[cfg(test)]
mod tests;
