//! Request handler module
//!
//! Request entry and the static file responder.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
