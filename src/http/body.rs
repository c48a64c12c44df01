//! Streaming file body module
//!
//! Wraps an open `tokio::fs::File` in a stream of byte chunks bounded to a
//! fixed length, so response bodies are read under the connection's
//! backpressure instead of being buffered whole.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use hyper::body::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncRead, ReadBuf};

const CHUNK_SIZE: usize = 64 * 1024;

/// Stream of `Bytes` chunks read from a file.
///
/// Yields at most `len` bytes starting at the file's current position. The
/// caller seeks before constructing the stream when serving a byte
/// interval. Dropping the stream closes the file; a read error ends the
/// stream and aborts the transfer.
pub struct FileChunkStream {
    file: File,
    remaining: u64,
    buf: Box<[u8]>,
}

impl FileChunkStream {
    pub fn new(file: File, len: u64) -> Self {
        Self {
            file,
            remaining: len,
            buf: vec![0; CHUNK_SIZE].into_boxed_slice(),
        }
    }
}

impl Stream for FileChunkStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(None);
        }

        let want = usize::try_from(this.remaining)
            .unwrap_or(usize::MAX)
            .min(this.buf.len());
        let mut read_buf = ReadBuf::new(&mut this.buf[..want]);

        match Pin::new(&mut this.file).poll_read(cx, &mut read_buf) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(err)) => {
                this.remaining = 0;
                Poll::Ready(Some(Err(err)))
            }
            Poll::Ready(Ok(())) => {
                let chunk = read_buf.filled();
                if chunk.is_empty() {
                    // File shrank underneath us; end the stream short.
                    this.remaining = 0;
                    Poll::Ready(None)
                } else {
                    this.remaining -= chunk.len() as u64;
                    Poll::Ready(Some(Ok(Bytes::copy_from_slice(chunk))))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::io::Write;

    async fn collect(mut stream: FileChunkStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_reads_exactly_len_bytes() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello world").unwrap();

        let file = File::open(tmp.path()).await.unwrap();
        let data = collect(FileChunkStream::new(file, 5)).await;
        assert_eq!(data, b"hello");
    }

    #[tokio::test]
    async fn test_reads_from_seek_position() {
        use tokio::io::{AsyncSeekExt, SeekFrom};

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"0123456789").unwrap();

        let mut file = File::open(tmp.path()).await.unwrap();
        file.seek(SeekFrom::Start(4)).await.unwrap();
        let data = collect(FileChunkStream::new(file, 3)).await;
        assert_eq!(data, b"456");
    }

    #[tokio::test]
    async fn test_zero_len_yields_nothing() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let file = File::open(tmp.path()).await.unwrap();
        assert!(collect(FileChunkStream::new(file, 0)).await.is_empty());
    }
}
