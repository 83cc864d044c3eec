//! # Postboard Core
//!
//! The domain layer of the Postboard API.
//! This crate contains the post rules (validation, ownership, the CRUD
//! operations) with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod service;
pub mod validation;

pub use error::DomainError;
pub use service::PostService;
