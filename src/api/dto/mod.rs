//! Data Transfer Objects for REST request/response serialization.
//!
//! Query parameter groups are separate `IntoParams` structs so a handler
//! can take several `Query` extractors over the same query string.

pub mod analytics_dto;
pub mod common_dto;
pub mod listing_dto;

pub use analytics_dto::*;
pub use common_dto::*;
pub use listing_dto::*;
