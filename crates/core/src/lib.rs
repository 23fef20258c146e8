//! MyTrack Core - Shared domain types.
//!
//! This crate provides the vocabulary shared by the MyTrack admin tooling:
//! - `admin` - Dashboard controller and REST client for the admin API
//! - `cli` - Command-line front end for administrators
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, roles, plans, statuses and page limits

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
