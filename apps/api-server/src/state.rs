//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::PostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        tracing::info!(storage = %posts.backend(), "Application state initialized");
        Self { posts }
    }
}
