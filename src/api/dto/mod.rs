//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names follow the browser client's camelCase convention, except
//! GitHub-derived shapes, which keep GitHub's snake_case.

pub mod common_dto;
pub mod github_dto;
pub mod settings_dto;
pub mod webhook_dto;

pub use common_dto::*;
pub use github_dto::*;
pub use settings_dto::*;
pub use webhook_dto::*;
