//! CLI command implementations.

pub mod monitor;
pub mod pages;
pub mod plans;
pub mod users;
pub mod verification;
