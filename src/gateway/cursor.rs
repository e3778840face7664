//! MovieCursor - a scoped, single-pass sequence of stored documents.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::{BoxStream, Stream, StreamExt};
use mongodb::bson::Document;

use super::GatewayError;

/// Lazy, forward-only result set from `MovieGateway::find_all`.
///
/// The storage-side resource lives exactly as long as this value: dropping
/// it (after exhaustion, on an error, or when the consumer goes away)
/// releases the cursor.
pub struct MovieCursor {
    inner: BoxStream<'static, Result<Document, GatewayError>>,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl MovieCursor {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Document, GatewayError>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
            on_release: None,
        }
    }

    /// Run `hook` when the cursor is dropped.
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }
}

impl Stream for MovieCursor {
    type Item = Result<Document, GatewayError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl Drop for MovieCursor {
    fn drop(&mut self) {
        if let Some(hook) = self.on_release.take() {
            hook();
        }
        tracing::trace!("movie cursor released");
    }
}
