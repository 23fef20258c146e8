//! Core types for MyTrack.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod limit;
pub mod status;

pub use id::*;
pub use limit::{PageLimit, PageLimitError};
pub use status::*;
