//! A small HTTP/1.1 static file server.
//!
//! Serves a configured document root: directory listings for directories,
//! streamed bodies for files, with conditional-request (304) and byte-range
//! (206) support. Built on Tokio and Hyper; one task per connection, no
//! shared mutable state between requests beyond the read-only
//! configuration.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
