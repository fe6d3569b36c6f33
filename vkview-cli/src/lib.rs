//! VKView CLI Library
//!
//! Interactive console client for a VK-style social network API. The
//! binary resolves a user by id/screen name, prints the profile, and
//! serves a configurable menu of secondary views (friends list, photo
//! albums).
//!
//! The primary public API is [`client::ApiClient`] (the blocking HTTP
//! transport) and [`session::Session`] (the interactive loop, generic
//! over its input/output streams so it can be driven from tests).

/// Blocking HTTP transport for the remote API.
pub mod client;

/// Message prefixes and fixed-width output blocks.
pub mod format;

/// Chunked batch lookup of user identifiers.
pub mod resolver;

/// Dispatch of option payloads to their formatters.
pub mod router;

/// The interactive session state machine.
pub mod session;

// Mock API server shared by the unit and integration test suites
#[doc(hidden)]
pub mod test_utils;
