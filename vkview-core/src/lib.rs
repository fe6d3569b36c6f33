//! VKView Core Library
//!
//! Wire-level API types, configuration, and errors shared by the VKView
//! CLI and its test server.

pub mod api;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use api::{Album, ApiError, Envelope, ItemsPayload, UserRecord};
pub use config::{AppConfig, MenuOption};
pub use error::{Result, VkViewError};
