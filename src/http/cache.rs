//! HTTP cache control module
//!
//! Derives cache validators from file metadata and evaluates conditional
//! request headers against them.

use chrono::{DateTime, Duration, Utc};

use crate::config::CacheConfig;

/// Metadata snapshot of a regular file, taken once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Cache-related headers composed for one response.
///
/// Each field is `Some` only when the corresponding switch in
/// [`CacheConfig`] is enabled. The set is computed up front and passed
/// around by value; response state is never read back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheHeaders {
    pub cache_control: Option<String>,
    pub expires: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

/// Compose the cache headers for a file.
///
/// Pure function of the metadata, the configuration, and `now` (only the
/// `Expires` header depends on `now`).
pub fn compose_headers(info: &FileInfo, config: &CacheConfig, now: DateTime<Utc>) -> CacheHeaders {
    CacheHeaders {
        cache_control: config
            .enable_cache_control
            .then(|| format!("public, max-age={}", config.max_age)),
        expires: config
            .enable_expires
            .then(|| http_date(now + Duration::seconds(i64::from(config.max_age)))),
        etag: config.enable_etag.then(|| weak_etag(info)),
        last_modified: config
            .enable_last_modified
            .then(|| http_date(info.modified)),
    }
}

/// Weak validator derived from size and mtime.
///
/// Content equality is approximated by (size, mtime), not a content hash,
/// hence the `W/` prefix.
pub fn weak_etag(info: &FileInfo) -> String {
    format!("W/\"{:x}-{:x}\"", info.size, info.modified.timestamp())
}

/// Format a timestamp as an HTTP-date (IMF-fixdate).
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Evaluate the conditional request headers against the composed headers.
///
/// `If-None-Match` alone decides when present; otherwise `If-Modified-Since`
/// decides. Both comparisons are exact string equality: no wildcard or list
/// handling for the tag, and no "not modified after" date arithmetic. A
/// request carrying neither header is never fresh.
pub fn is_fresh(
    if_none_match: Option<&str>,
    if_modified_since: Option<&str>,
    headers: &CacheHeaders,
) -> bool {
    if let Some(client_tag) = if_none_match {
        return headers.etag.as_deref() == Some(client_tag);
    }
    if let Some(client_date) = if_modified_since {
        return headers.last_modified.as_deref() == Some(client_date);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn info() -> FileInfo {
        FileInfo {
            size: 0x50,
            modified: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn all_enabled() -> CacheConfig {
        CacheConfig {
            enable_cache_control: true,
            enable_expires: true,
            enable_etag: true,
            enable_last_modified: true,
            max_age: 600,
        }
    }

    #[test]
    fn test_weak_etag_format() {
        let etag = weak_etag(&info());
        assert!(etag.starts_with("W/\""));
        assert!(etag.ends_with('"'));
        assert_eq!(etag, format!("W/\"50-{:x}\"", info().modified.timestamp()));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let first = compose_headers(&info(), &all_enabled(), now);
        let second = compose_headers(&info(), &all_enabled(), now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_compose_respects_switches() {
        let config = CacheConfig {
            enable_cache_control: false,
            enable_expires: false,
            enable_etag: true,
            enable_last_modified: false,
            max_age: 600,
        };
        let headers = compose_headers(&info(), &config, Utc::now());
        assert!(headers.cache_control.is_none());
        assert!(headers.expires.is_none());
        assert!(headers.etag.is_some());
        assert!(headers.last_modified.is_none());
    }

    #[test]
    fn test_header_values() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let headers = compose_headers(&info(), &all_enabled(), now);
        assert_eq!(headers.cache_control.as_deref(), Some("public, max-age=600"));
        assert_eq!(
            headers.expires.as_deref(),
            Some("Fri, 01 Mar 2024 12:10:00 GMT")
        );
        assert_eq!(
            headers.last_modified.as_deref(),
            Some("Fri, 01 Mar 2024 12:00:00 GMT")
        );
    }

    #[test]
    fn test_unconditional_request_is_never_fresh() {
        let headers = compose_headers(&info(), &all_enabled(), Utc::now());
        assert!(!is_fresh(None, None, &headers));
    }

    #[test]
    fn test_matching_etag_is_fresh() {
        let headers = compose_headers(&info(), &all_enabled(), Utc::now());
        let etag = headers.etag.clone().unwrap();
        assert!(is_fresh(Some(&etag), None, &headers));

        // Any single-character mutation makes it stale.
        let mutated = etag.replace('5', "6");
        assert_ne!(etag, mutated);
        assert!(!is_fresh(Some(&mutated), None, &headers));
    }

    #[test]
    fn test_etag_takes_priority() {
        let headers = compose_headers(&info(), &all_enabled(), Utc::now());
        let last_modified = headers.last_modified.clone().unwrap();
        // Mismatched tag decides alone even when the date would match.
        assert!(!is_fresh(Some("W/\"other\""), Some(&last_modified), &headers));
    }

    #[test]
    fn test_last_modified_exact_match_only() {
        let headers = compose_headers(&info(), &all_enabled(), Utc::now());
        let last_modified = headers.last_modified.clone().unwrap();
        assert!(is_fresh(None, Some(&last_modified), &headers));

        // One second earlier is a different string, therefore stale.
        let earlier = http_date(info().modified - Duration::seconds(1));
        assert!(!is_fresh(None, Some(&earlier), &headers));
    }

    #[test]
    fn test_disabled_etag_never_matches() {
        let config = CacheConfig {
            enable_etag: false,
            ..all_enabled()
        };
        let headers = compose_headers(&info(), &config, Utc::now());
        assert!(!is_fresh(Some(&weak_etag(&info())), None, &headers));
    }
}
