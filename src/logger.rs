use crate::config::Config;
use hyper::{Method, StatusCode, Uri, Version};
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Static file server started");
    println!("Listening on: http://{addr}");
    println!("Document root: {}", config.files.root);
    println!("Log level: {}", config.logging.level);
    println!(
        "Cache headers: cache-control={} expires={} etag={} last-modified={} (max-age {}s)",
        config.cache.enable_cache_control,
        config.cache.enable_expires,
        config.cache.enable_etag,
        config.cache.enable_last_modified,
        config.cache.max_age
    );
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[Request] {method} {uri} {version:?}");
}

pub fn log_response(status: StatusCode) {
    println!("[Response] {status}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}
