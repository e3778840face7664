//! MovieStream - the incremental response of `ListMovies`.

use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures_util::stream::{Stream, StreamExt};

use super::HandlerError;
use crate::gateway::MovieCursor;
use crate::grpc::Movie;
use crate::model::MovieRecord;

/// Decodes documents from a cursor one at a time, only when polled.
///
/// The transport polls for the next item after the previous one has been
/// handed off, so at most one record is in flight. The first failure ends
/// the stream with exactly one error item. The cursor is dropped as soon as
/// the stream finishes or fails, or when the stream itself is dropped.
pub struct MovieStream {
    cursor: Option<MovieCursor>,
    sent: usize,
}

impl MovieStream {
    pub fn new(cursor: MovieCursor) -> Self {
        Self {
            cursor: Some(cursor),
            sent: 0,
        }
    }

    /// Records yielded so far.
    #[doc(hidden)]
    pub fn sent(&self) -> usize {
        self.sent
    }

    fn release(&mut self) {
        self.cursor = None;
    }
}

impl Stream for MovieStream {
    type Item = Result<Movie, HandlerError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        let Some(cursor) = this.cursor.as_mut() else {
            return Poll::Ready(None);
        };

        let failure = match ready!(cursor.poll_next_unpin(cx)) {
            Some(Ok(document)) => match MovieRecord::from_document(document) {
                Ok(record) => {
                    this.sent += 1;
                    return Poll::Ready(Some(Ok(record.into())));
                }
                Err(e) => HandlerError::StreamDecode(e),
            },
            Some(Err(e)) => HandlerError::Cursor(e),
            None => {
                tracing::debug!(sent = this.sent, "movie list complete");
                this.release();
                return Poll::Ready(None);
            }
        };

        tracing::warn!(sent = this.sent, error = %failure, "movie list aborted");
        this.release();
        Poll::Ready(Some(Err(failure)))
    }
}
