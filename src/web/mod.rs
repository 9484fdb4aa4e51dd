//! Web API module for whisperbox.
//!
//! This module provides the REST API: DTOs, the uniform response envelope,
//! JWT middleware, handlers, and the server itself.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
