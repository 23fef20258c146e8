//! REST client for the MyTrack backend admin surface.

mod client;
mod error;
mod types;

pub use client::AdminApi;
pub use error::ApiError;
pub use types::LoginResponse;
