//! Mailbox module for whisperbox.
//!
//! This module provides anonymous message functionality including:
//! - Anonymous delivery gated on the recipient's accept flag
//! - Owner-scoped listing, newest first
//! - Owner-scoped deletion

mod repository;
mod service;
mod types;

pub use repository::MessageRepository;
pub use service::{MailboxService, NOT_ACCEPTING};
pub use types::{Message, NewMessage, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH};
