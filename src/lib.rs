//! Smart-home energy optimizer demo API.

/// HTTP routes, handlers and the server loop.
pub mod api;
pub mod cli;
pub mod config;
/// Device records and the in-memory registry.
pub mod devices;
/// Synthetic predictions, analytics and recommendations.
pub mod generators;
