//! # Postboard Shared
//!
//! Wire types shared between the server and its clients.
//! Deliberately free of server-side crates so clients can depend on it alone.

pub mod dto;
pub mod response;

pub use dto::{HealthResponse, PostRequest, PostResponse};
pub use response::ErrorResponse;
