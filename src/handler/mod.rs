//! Request handler module
//!
//! Authenticates requests and dispatches GET, PUT, PROPFIND and OPTIONS to
//! storage and response building.

pub mod files;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
