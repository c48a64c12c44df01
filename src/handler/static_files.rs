//! File responder module
//!
//! Resolves a request path inside the document root and turns the
//! filesystem's answer into exactly one response: a directory listing, a
//! full or partial file body, 304, 404, or 500. Metadata is read fresh per
//! request and never cached across requests.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use hyper::Response;
use tokio::fs::{self, File};
use tokio::io::{AsyncSeekExt, SeekFrom};

use crate::config::Config;
use crate::handler::router::RequestContext;
use crate::http::body::FileChunkStream;
use crate::http::cache::{self, FileInfo};
use crate::http::{mime, response, resolve_range, ByteInterval, RangeOutcome, ResponseBody};
use crate::logger;

/// Filesystem classification of a resolved path.
#[derive(Debug)]
pub enum PathKind {
    Directory,
    File(std::fs::Metadata),
    Missing,
    Error(io::Error),
}

/// Stat a path and classify the result.
///
/// A plain not-found is [`PathKind::Missing`] (404); every other stat
/// failure is [`PathKind::Error`] (500).
pub async fn classify(path: &Path) -> PathKind {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => PathKind::Directory,
        Ok(metadata) => PathKind::File(metadata),
        Err(err) if err.kind() == io::ErrorKind::NotFound => PathKind::Missing,
        Err(err) => PathKind::Error(err),
    }
}

/// Serve a request path from the document root.
pub async fn serve(ctx: &RequestContext<'_>, config: &Config) -> Response<ResponseBody> {
    let Some(fs_path) = resolve_path(&config.files.root, ctx.path) else {
        logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
        return response::build_not_found_response(ctx.is_head);
    };

    match classify(&fs_path).await {
        PathKind::Missing => response::build_not_found_response(ctx.is_head),
        PathKind::Error(err) => {
            logger::log_error(&format!("Failed to stat '{}': {err}", fs_path.display()));
            response::build_error_response(&err.to_string(), ctx.is_head)
        }
        PathKind::Directory => serve_listing(ctx, config, &fs_path).await,
        PathKind::File(metadata) => serve_file(ctx, config, &fs_path, &metadata).await,
    }
}

/// Resolve a decoded request path against the document root.
///
/// Any `..` segment is rejected outright so the resolved path cannot
/// escape the root.
fn resolve_path(root: &str, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return None;
    }
    Some(Path::new(root).join(relative))
}

async fn serve_listing(
    ctx: &RequestContext<'_>,
    config: &Config,
    dir: &Path,
) -> Response<ResponseBody> {
    match render_listing(dir, ctx.path, &config.files.ignore_prefixes).await {
        Ok(html) => response::build_listing_response(html, ctx.is_head),
        Err(err) => {
            logger::log_error(&format!("Failed to list '{}': {err}", dir.display()));
            response::build_error_response(&err.to_string(), ctx.is_head)
        }
    }
}

/// Render a directory as an HTML fragment of links.
///
/// Entries whose names start with an ignored prefix are left out.
async fn render_listing(
    dir: &Path,
    request_path: &str,
    ignore_prefixes: &[String],
) -> io::Result<String> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if ignore_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
        {
            continue;
        }
        names.push(name);
    }
    names.sort();

    let mut html = format!("<h1>Index of {request_path}</h1>");
    for name in &names {
        let href = if request_path.ends_with('/') {
            format!("{request_path}{name}")
        } else {
            format!("{request_path}/{name}")
        };
        html.push_str(&format!("<p><a href=\"{href}\">{name}</a></p>"));
    }
    Ok(html)
}

async fn serve_file(
    ctx: &RequestContext<'_>,
    config: &Config,
    path: &Path,
    metadata: &std::fs::Metadata,
) -> Response<ResponseBody> {
    let modified = match metadata.modified() {
        Ok(time) => DateTime::<Utc>::from(time),
        Err(err) => {
            logger::log_error(&format!(
                "Failed to read mtime of '{}': {err}",
                path.display()
            ));
            return response::build_error_response(&err.to_string(), ctx.is_head);
        }
    };
    let info = FileInfo {
        size: metadata.len(),
        modified,
    };

    let headers = cache::compose_headers(&info, &config.cache, Utc::now());
    if cache::is_fresh(
        ctx.if_none_match.as_deref(),
        ctx.if_modified_since.as_deref(),
        &headers,
    ) {
        return response::build_not_modified_response(&headers);
    }

    let content_type = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(mime::content_type);

    match resolve_range(ctx.range_header.as_deref(), info.size) {
        RangeOutcome::Unsatisfiable => response::build_range_not_satisfiable_response(info.size),
        RangeOutcome::Satisfiable(interval) => {
            let body = if ctx.is_head {
                Ok(response::empty_body())
            } else {
                open_interval(path, &interval).await
            };
            match body {
                Ok(body) => {
                    response::build_partial_response(body, &interval, content_type, &headers)
                }
                Err(err) => open_failure(ctx, path, &err),
            }
        }
        RangeOutcome::None => {
            let body = if ctx.is_head {
                Ok(response::empty_body())
            } else {
                open_full(path, info.size).await
            };
            match body {
                Ok(body) => {
                    response::build_file_response(body, info.size, content_type, &headers)
                }
                Err(err) => open_failure(ctx, path, &err),
            }
        }
    }
}

/// Open a file and stream it whole.
async fn open_full(path: &Path, size: u64) -> io::Result<ResponseBody> {
    let file = File::open(path).await?;
    Ok(response::file_body(FileChunkStream::new(file, size)))
}

/// Open a file, seek to the interval start, and stream its length.
async fn open_interval(path: &Path, interval: &ByteInterval) -> io::Result<ResponseBody> {
    let mut file = File::open(path).await?;
    file.seek(SeekFrom::Start(interval.start())).await?;
    Ok(response::file_body(FileChunkStream::new(
        file,
        interval.len(),
    )))
}

/// An open failure after classification follows the same taxonomy as stat:
/// a vanished file is 404, anything else is 500.
fn open_failure(
    ctx: &RequestContext<'_>,
    path: &Path,
    err: &io::Error,
) -> Response<ResponseBody> {
    if err.kind() == io::ErrorKind::NotFound {
        return response::build_not_found_response(ctx.is_head);
    }
    logger::log_error(&format!("Failed to open '{}': {err}", path.display()));
    response::build_error_response(&err.to_string(), ctx.is_head)
}
