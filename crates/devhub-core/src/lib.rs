//! # DevHub Core
//!
//! The domain layer of the DevHub backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, ownership policy, pagination rules and the ports infrastructure implements.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod ports;

pub use error::DomainError;
pub use pagination::Page;
