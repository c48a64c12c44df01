//! MIME type detection module
//!
//! Maps a file name to a Content-Type based on its extension.

/// Look up the Content-Type for a file name.
///
/// The lookup key is the segment immediately after the *first* dot of the
/// name, so `archive.tar.gz` is keyed on `tar`. Case-sensitive. Names
/// without a table entry carry no Content-Type at all.
pub fn content_type(file_name: &str) -> Option<&'static str> {
    lookup(file_name.split('.').nth(1)?)
}

fn lookup(extension: &str) -> Option<&'static str> {
    match extension {
        // Text
        "html" | "htm" => Some("text/html"),
        "css" => Some("text/css"),
        "txt" | "md" => Some("text/plain"),
        "xml" => Some("application/xml"),

        // JavaScript
        "js" | "mjs" => Some("application/javascript"),
        "json" => Some("application/json"),

        // Images
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        "webp" => Some("image/webp"),

        // Media
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),

        // Documents
        "pdf" => Some("application/pdf"),
        "zip" => Some("application/zip"),
        "gz" | "gzip" => Some("application/gzip"),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type("index.html"), Some("text/html"));
        assert_eq!(content_type("style.css"), Some("text/css"));
        assert_eq!(content_type("a.txt"), Some("text/plain"));
        assert_eq!(content_type("photo.jpeg"), Some("image/jpeg"));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type("data.xyz"), None);
        assert_eq!(content_type("Makefile"), None);
    }

    #[test]
    fn test_first_dot_segment_wins() {
        // Only the segment after the first dot is consulted.
        assert_eq!(content_type("archive.tar.gz"), None);
        assert_eq!(content_type("notes.txt.bak"), Some("text/plain"));
    }

    #[test]
    fn test_leading_dot() {
        // ".gitignore" splits into ["", "gitignore"]; no table entry.
        assert_eq!(content_type(".gitignore"), None);
    }
}
