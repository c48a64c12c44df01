//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing against a known total size. Parsing fails
//! closed: a Range header that is present but unusable resolves to
//! `Unsatisfiable` (416), never to a clamped best-effort interval.

/// A validated byte interval within a resource.
///
/// Invariant: `start <= end < total`. Intervals violating this cannot be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteInterval {
    start: u64,
    end: u64,
    total: u64,
}

impl ByteInterval {
    /// Construct an interval, or `None` if `start <= end < total` does not hold.
    pub fn new(start: u64, end: u64, total: u64) -> Option<Self> {
        if start <= end && end < total {
            Some(Self { start, end, total })
        } else {
            None
        }
    }

    /// First byte position (inclusive).
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last byte position (inclusive).
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Total size of the underlying resource.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of bytes covered by the interval.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value for a 206 response.
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total)
    }
}

/// Range header resolution result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No Range header present: respond 200 with the full body.
    None,
    /// Valid single range: respond 206 bounded to the interval.
    Satisfiable(ByteInterval),
    /// Present but malformed or outside the resource: respond 416.
    Unsatisfiable,
}

/// Resolve an HTTP Range header against the total resource size.
///
/// Supported forms (inclusive, 0-based):
/// - `bytes=start-end`
/// - `bytes=start-` (from `start` to end of resource)
/// - `bytes=-suffix` (last `suffix` bytes)
///
/// An absent header yields [`RangeOutcome::None`]. Anything present that
/// cannot be turned into a valid interval, including a suffix longer than
/// the resource, yields [`RangeOutcome::Unsatisfiable`].
pub fn resolve_range(header: Option<&str>, total: u64) -> RangeOutcome {
    let Some(header) = header else {
        return RangeOutcome::None;
    };

    let Some(value) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Unsatisfiable;
    };

    // Single range only
    if value.contains(',') {
        return RangeOutcome::Unsatisfiable;
    }

    let Some((start_str, end_str)) = value.split_once('-') else {
        return RangeOutcome::Unsatisfiable;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    let interval = match (start_str.is_empty(), end_str.is_empty()) {
        // "-suffix": the last `suffix` bytes. A suffix longer than the
        // resource would place the start before byte zero; reject it.
        (true, false) => end_str.parse::<u64>().ok().and_then(|suffix| {
            let start = total.checked_sub(suffix)?;
            ByteInterval::new(start, total.checked_sub(1)?, total)
        }),
        // "start-": from `start` to the end of the resource.
        (false, true) => start_str
            .parse::<u64>()
            .ok()
            .and_then(|start| ByteInterval::new(start, total.checked_sub(1)?, total)),
        // "start-end": as given.
        (false, false) => match (start_str.parse::<u64>(), end_str.parse::<u64>()) {
            (Ok(start), Ok(end)) => ByteInterval::new(start, end, total),
            _ => None,
        },
        (true, true) => None,
    };

    interval.map_or(RangeOutcome::Unsatisfiable, RangeOutcome::Satisfiable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satisfiable(header: &str, total: u64) -> ByteInterval {
        match resolve_range(Some(header), total) {
            RangeOutcome::Satisfiable(interval) => interval,
            other => panic!("expected Satisfiable, got {other:?}"),
        }
    }

    #[test]
    fn test_no_header() {
        assert_eq!(resolve_range(None, 1000), RangeOutcome::None);
    }

    #[test]
    fn test_fixed_range() {
        let interval = satisfiable("bytes=0-99", 1000);
        assert_eq!(interval.start(), 0);
        assert_eq!(interval.end(), 99);
        assert_eq!(interval.total(), 1000);
        assert_eq!(interval.len(), 100);
        assert_eq!(interval.content_range(), "bytes 0-99/1000");
    }

    #[test]
    fn test_suffix_range() {
        let interval = satisfiable("bytes=-100", 1000);
        assert_eq!(interval.start(), 900);
        assert_eq!(interval.end(), 999);
    }

    #[test]
    fn test_open_range() {
        let interval = satisfiable("bytes=900-", 1000);
        assert_eq!(interval.start(), 900);
        assert_eq!(interval.end(), 999);
    }

    #[test]
    fn test_whole_resource_is_valid() {
        let interval = satisfiable("bytes=0-999", 1000);
        assert_eq!(interval.len(), 1000);
    }

    #[test]
    fn test_inverted_range() {
        assert_eq!(
            resolve_range(Some("bytes=500-100"), 1000),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn test_end_past_resource() {
        assert_eq!(
            resolve_range(Some("bytes=0-1000"), 1000),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn test_start_past_resource() {
        assert_eq!(
            resolve_range(Some("bytes=1000-"), 1000),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn test_suffix_longer_than_resource() {
        assert_eq!(
            resolve_range(Some("bytes=-1500"), 1000),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn test_zero_suffix() {
        assert_eq!(
            resolve_range(Some("bytes=-0"), 1000),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn test_empty_resource() {
        assert_eq!(
            resolve_range(Some("bytes=0-"), 0),
            RangeOutcome::Unsatisfiable
        );
        assert_eq!(resolve_range(None, 0), RangeOutcome::None);
    }

    #[test]
    fn test_malformed_is_unsatisfiable() {
        // Present but unusable headers are 416, not ignored and not 400.
        for header in [
            "bytes=a-b",
            "bytes=",
            "bytes=-",
            "items=0-99",
            "bytes=0-9,20-29",
            "0-99",
        ] {
            assert_eq!(
                resolve_range(Some(header), 1000),
                RangeOutcome::Unsatisfiable,
                "header {header:?}"
            );
        }
    }

    #[test]
    fn test_interval_invariant() {
        assert!(ByteInterval::new(0, 0, 1).is_some());
        assert!(ByteInterval::new(5, 4, 10).is_none());
        assert!(ByteInterval::new(0, 10, 10).is_none());
        assert!(ByteInterval::new(0, 0, 0).is_none());
    }
}
