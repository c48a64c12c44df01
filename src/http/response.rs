//! HTTP response building module
//!
//! Builders for every response the server produces, decoupled from the
//! dispatch logic. All bodies share one boxed type so full, bounded, and
//! empty bodies flow through the same connection plumbing.

use std::io;

use futures::StreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::http::response::Builder;
use hyper::Response;

use crate::http::body::FileChunkStream;
use crate::http::cache::CacheHeaders;
use crate::http::range::ByteInterval;
use crate::logger;

/// Body type shared by every response.
pub type ResponseBody = BoxBody<Bytes, io::Error>;

/// Box an in-memory body.
pub fn full_body(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).map_err(|never| match never {}).boxed()
}

/// Box an empty body.
pub fn empty_body() -> ResponseBody {
    Empty::new().map_err(|never| match never {}).boxed()
}

/// Box a streaming file body.
pub fn file_body(stream: FileChunkStream) -> ResponseBody {
    BodyExt::boxed(StreamBody::new(stream.map(|chunk| chunk.map(Frame::data))))
}

/// Build 200 OK response for a complete file.
///
/// `Accept-Ranges` is advertised even on full responses so a client can
/// resume later with a Range request.
pub fn build_file_response(
    body: ResponseBody,
    size: u64,
    content_type: Option<&str>,
    cache: &CacheHeaders,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(200)
        .header("Content-Length", size)
        .header("Accept-Ranges", "bytes");
    builder = apply_content_type(builder, content_type);
    builder = apply_cache_headers(builder, cache);

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(empty_body())
    })
}

/// Build 206 Partial Content response for a byte interval of a file.
pub fn build_partial_response(
    body: ResponseBody,
    interval: &ByteInterval,
    content_type: Option<&str>,
    cache: &CacheHeaders,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(206)
        .header("Content-Length", interval.len())
        .header("Content-Range", interval.content_range())
        .header("Accept-Ranges", "bytes");
    builder = apply_content_type(builder, content_type);
    builder = apply_cache_headers(builder, cache);

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("206", &e);
        Response::new(empty_body())
    })
}

/// Build 304 Not Modified response.
///
/// Repeats the composed cache headers; no body.
pub fn build_not_modified_response(cache: &CacheHeaders) -> Response<ResponseBody> {
    let builder = apply_cache_headers(Response::builder().status(304), cache);
    builder.body(empty_body()).unwrap_or_else(|e| {
        log_build_error("304", &e);
        Response::new(empty_body())
    })
}

/// Build 200 OK response carrying a directory listing.
pub fn build_listing_response(html: String, is_head: bool) -> Response<ResponseBody> {
    let length = html.len();
    let body = if is_head { empty_body() } else { full_body(html) };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html;charset=UTF-8")
        .header("Content-Length", length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(empty_body())
        })
}

/// Build 404 Not Found response.
pub fn build_not_found_response(is_head: bool) -> Response<ResponseBody> {
    const MESSAGE: &str = "404 Not Found";
    let body = if is_head {
        empty_body()
    } else {
        full_body(MESSAGE)
    };

    Response::builder()
        .status(404)
        .header("Content-Type", "text/html;charset=UTF-8")
        .header("Content-Length", MESSAGE.len())
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(empty_body())
        })
}

/// Build 500 Internal Server Error response carrying the raw error detail.
pub fn build_error_response(detail: &str, is_head: bool) -> Response<ResponseBody> {
    let length = detail.len();
    let body = if is_head {
        empty_body()
    } else {
        full_body(detail.to_owned())
    };

    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .header("Content-Length", length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(empty_body())
        })
}

/// Build 416 Range Not Satisfiable response. No body.
pub fn build_range_not_satisfiable_response(total: u64) -> Response<ResponseBody> {
    Response::builder()
        .status(416)
        .header("Content-Range", format!("bytes */{total}"))
        .body(empty_body())
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(empty_body())
        })
}

/// Build 405 Method Not Allowed response.
pub fn build_method_not_allowed_response() -> Response<ResponseBody> {
    const MESSAGE: &str = "405 Method Not Allowed";

    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(full_body(MESSAGE))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(empty_body())
        })
}

/// Build OPTIONS response.
pub fn build_options_response() -> Response<ResponseBody> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(empty_body())
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(empty_body())
        })
}

fn apply_content_type(builder: Builder, content_type: Option<&str>) -> Builder {
    match content_type {
        Some(mime) => builder.header("Content-Type", format!("{mime};charset=UTF-8")),
        None => builder,
    }
}

fn apply_cache_headers(mut builder: Builder, cache: &CacheHeaders) -> Builder {
    if let Some(value) = &cache.cache_control {
        builder = builder.header("Cache-Control", value);
    }
    if let Some(value) = &cache.expires {
        builder = builder.header("Expires", value);
    }
    if let Some(value) = &cache.etag {
        builder = builder.header("ETag", value);
    }
    if let Some(value) = &cache.last_modified {
        builder = builder.header("Last-Modified", value);
    }
    builder
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
