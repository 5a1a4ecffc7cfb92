//! Cross-cutting helpers shared by the server crates.

pub mod utils;
