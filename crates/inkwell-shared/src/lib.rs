//! # Inkwell Shared
//!
//! Types that cross the HTTP boundary: request and response bodies for the
//! post endpoints, plus the RFC 7807 error body.

pub mod dto;
pub mod response;

pub use dto::{MessageResponse, PageQuery, PostCreate, PostDb, PostPartialUpdate, ResourceId};
pub use response::ErrorResponse;
