//! # DevHub Shared
//!
//! Wire types shared between the server and its clients: the response
//! envelope, request DTOs with their validation rules, and response payloads.

pub mod dto;
pub mod response;

pub use response::Envelope;
