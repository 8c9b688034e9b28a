// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tokenizes chunks from an asynchronous [`Stream`].
//!
//! Requires the `stream` feature.

use core::{
    pin::Pin,
    task::{ready, Context, Poll},
};

use futures_core::{FusedStream, Stream};
use log::debug;

use crate::{
    config::Config,
    error::Error,
    scanner::{Scanner, Step},
    token::OwnedToken,
};

/// A stream of owned tokens from a stream of chunks.
///
/// The inner stream is polled only when every token which can be completed
/// from the already received chunks has been returned. If the inner stream is
/// pending, so is the token stream.
///
/// Dropping the token stream drops the inner stream.
///
/// # Example
///
/// ```
/// # futures::executor::block_on(async {
/// use chunked_xml::{token::OwnedToken, TokenStream};
/// use futures::{stream, StreamExt};
///
/// let chunks = stream::iter(vec![Ok::<_, std::io::Error>("<a>he"), Ok("llo</a>")]);
/// let tokens = TokenStream::new(chunks).collect::<Vec<_>>().await;
/// assert_eq!(3, tokens.len());
/// assert_eq!(OwnedToken::text("hello"), *tokens[1].as_ref().unwrap());
/// # });
/// ```
#[derive(Debug)]
pub struct TokenStream<S> {
    inner: S,
    scanner: Scanner,
}

impl<S> TokenStream<S> {
    /// Instantiates a token stream with the default [`Config`].
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, Config::default())
    }

    /// Instantiates a token stream with the given options.
    pub fn with_config(inner: S, config: Config) -> Self {
        Self {
            inner,
            scanner: Scanner::new(config),
        }
    }

    /// Returns the byte offset in the overall input after the last returned token.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.scanner.position()
    }

    /// Returns the number of currently open tags.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scanner.stack().len()
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, T, E> Stream for TokenStream<S>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    T: AsRef<str>,
{
    type Item = Result<OwnedToken, Error<E>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            let step = match this.scanner.step() {
                Ok(step) => step,
                Err(e) => {
                    debug!(target: "chunked_xml::stream", "tokenize error at {}: {e}", e.position());
                    return Poll::Ready(Some(Err(Error::Tokenize(e))));
                }
            };

            match step {
                Step::Token(raw) => {
                    return Poll::Ready(Some(Ok(this.scanner.token(&raw).into_owned())));
                }
                Step::Done => return Poll::Ready(None),
                Step::NeedChunk => match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                    Some(Ok(chunk)) => {
                        let chunk = chunk.as_ref();
                        debug!(target: "chunked_xml::stream", "received chunk of {} bytes", chunk.len());
                        this.scanner.feed(chunk);
                    }
                    Some(Err(e)) => {
                        debug!(target: "chunked_xml::stream", "chunk stream failed");
                        this.scanner.fail();
                        return Poll::Ready(Some(Err(Error::Source(e))));
                    }
                    None => {
                        debug!(target: "chunked_xml::stream", "chunk stream exhausted");
                        this.scanner.end_of_input();
                    }
                },
            }
        }
    }
}

impl<S, T, E> FusedStream for TokenStream<S>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    T: AsRef<str>,
{
    fn is_terminated(&self) -> bool {
        self.scanner.is_done()
    }
}
