//! Domain entities - the core business objects.

mod page;
mod post;

pub use page::{DEFAULT_LIMIT, MAX_LIMIT, Page};
pub use post::{NewPost, Post, PostId};
