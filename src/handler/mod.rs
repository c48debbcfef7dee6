//! Request handler module
//!
//! Maps requests onto files under the root and performs GET and PUT.

pub mod content;
pub mod resolve;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
