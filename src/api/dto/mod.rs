//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire.

pub mod generation_dto;
pub mod sequence_dto;

pub use generation_dto::*;
pub use sequence_dto::*;
