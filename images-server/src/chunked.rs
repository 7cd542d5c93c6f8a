//! Chunked response bodies built from an arbitrary byte source.
//!
//! Every frame handed to the HTTP layer goes out as one chunk, so the
//! streamer controls the chunk sizes: each frame is filled to the full
//! quantum unless the source runs dry, and no frame is empty.

use std::num::NonZeroUsize;

use axum::body::{Body, Bytes};
use futures_util::stream::{self, Stream};
use tokio::io::{AsyncRead, AsyncReadExt};

#[derive(Debug, Clone, Copy)]
pub struct ChunkedStreamer {
    quantum: NonZeroUsize,
}

impl ChunkedStreamer {
    pub fn new(quantum: NonZeroUsize) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> usize {
        self.quantum.get()
    }

    /// Frames of `source`, `quantum` bytes each except possibly the last.
    ///
    /// The stream owns the source and drops it as soon as it is exhausted,
    /// fails, or the stream itself is dropped (client gone mid-body). A
    /// missing source yields no frames, leaving only the terminating chunk.
    pub fn frames<S>(&self, source: Option<S>) -> impl Stream<Item = std::io::Result<Bytes>> + Send + 'static
    where
        S: AsyncRead + Send + Unpin + 'static,
    {
        let quantum = self.quantum.get();
        stream::try_unfold(source, move |source| async move {
            let Some(mut source) = source else {
                return Ok(None);
            };
            let mut buf = vec![0u8; quantum];
            let filled = fill(&mut source, &mut buf).await?;
            if filled == 0 {
                return Ok(None);
            }
            buf.truncate(filled);
            // A short read means the source is exhausted.
            let rest = (filled == quantum).then_some(source);
            Ok::<_, std::io::Error>(Some((Bytes::from(buf), rest)))
        })
    }

    pub fn body<S>(&self, source: Option<S>) -> Body
    where
        S: AsyncRead + Send + Unpin + 'static,
    {
        Body::from_stream(self.frames(source))
    }
}

/// Read until `buf` is full or the source is exhausted.
async fn fill<S: AsyncRead + Unpin>(source: &mut S, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]).await? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
