//! Request entry module
//!
//! Entry point for HTTP request processing: method validation, request-path
//! decoding, and header extraction before dispatch to the file responder.

use crate::config::Config;
use crate::handler::static_files;
use crate::http::{response, ResponseBody};
use crate::logger;
use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating what the responder needs from a request.
pub struct RequestContext<'a> {
    /// Percent-decoded request path.
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
) -> Result<Response<ResponseBody>, Infallible> {
    let method = req.method();
    let is_head = *method == Method::HEAD;

    if config.logging.access_log {
        logger::log_request(method, req.uri(), req.version());
    }

    if let Some(resp) = check_http_method(method) {
        return Ok(resp);
    }

    let path = decode_path(req.uri().path());
    let ctx = RequestContext {
        path: &path,
        is_head,
        if_none_match: header_value(&req, "if-none-match"),
        if_modified_since: header_value(&req, "if-modified-since"),
        range_header: header_value(&req, "range"),
    };

    let response = static_files::serve(&ctx, &config).await;

    if config.logging.access_log {
        logger::log_response(response.status());
    }
    Ok(response)
}

/// Reject anything but GET, HEAD, and OPTIONS.
fn check_http_method(method: &Method) -> Option<Response<ResponseBody>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(response::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(response::build_method_not_allowed_response())
        }
    }
}

/// Percent-decode the raw URI path.
///
/// Sequences that do not decode to UTF-8 leave the path as received.
fn decode_path(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map_or_else(|_| raw.to_string(), |decoded| decoded.into_owned())
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}
