// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    cell::Cell,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use chunked_xml::{Config, Error, ErrorKind, OwnedToken, TokenStream, Tokenizer};
use futures::{executor::block_on, stream, Stream, StreamExt};

const RSS_1_XML: &str = include_str!("../tests/resources/rss-1.xml");

type ChunkResult = Result<&'static str, &'static str>;

/// Yields `Pending` once before each item and counts the delivered items.
struct SlowChunks {
    chunks: Vec<ChunkResult>,
    ready: bool,
    delivered: Rc<Cell<usize>>,
}

impl SlowChunks {
    fn new(chunks: Vec<ChunkResult>, delivered: Rc<Cell<usize>>) -> Self {
        Self {
            chunks,
            ready: false,
            delivered,
        }
    }
}

impl Stream for SlowChunks {
    type Item = ChunkResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if !self.ready {
            self.ready = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        self.ready = false;
        if self.chunks.is_empty() {
            return Poll::Ready(None);
        }
        self.delivered.set(self.delivered.get() + 1);
        Poll::Ready(Some(self.chunks.remove(0)))
    }
}

#[test]
fn stream_matches_iterator() {
    let chunks = RSS_1_XML
        .chars()
        .collect::<Vec<_>>()
        .chunks(7)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>();

    let expected = Tokenizer::from_str(RSS_1_XML)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let tokens = block_on(
        TokenStream::new(stream::iter(chunks.into_iter().map(Ok::<_, ()>)))
            .collect::<Vec<_>>(),
    );
    let tokens = tokens.into_iter().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(expected, tokens);
}

#[test]
fn chunks_are_polled_after_tokens_are_drained() {
    let delivered = Rc::new(Cell::new(0));
    let mut tokens = TokenStream::new(SlowChunks::new(
        vec![Ok("<a>one<b/>"), Ok("</a>")],
        Rc::clone(&delivered),
    ));

    block_on(async {
        assert_eq!(
            Some(OwnedToken::tag_open("a", "", false)),
            tokens.next().await.transpose().unwrap()
        );
        assert_eq!(1, delivered.get());
        assert_eq!(
            Some(OwnedToken::text("one")),
            tokens.next().await.transpose().unwrap()
        );
        assert_eq!(
            Some(OwnedToken::tag_open("b", "", true)),
            tokens.next().await.transpose().unwrap()
        );
        assert_eq!(1, delivered.get());
        assert_eq!(
            Some(OwnedToken::tag_close("a")),
            tokens.next().await.transpose().unwrap()
        );
        assert_eq!(2, delivered.get());
        assert_eq!(None, tokens.next().await);
        assert_eq!(None, tokens.next().await);
    });
}

#[test]
fn source_error_ends_stream() {
    let delivered = Rc::new(Cell::new(0));
    let tokens = block_on(
        TokenStream::new(SlowChunks::new(
            vec![Ok("<a>"), Err("reset"), Ok("</a>")],
            Rc::clone(&delivered),
        ))
        .collect::<Vec<_>>(),
    );
    assert_eq!(
        vec![
            Ok(OwnedToken::tag_open("a", "", false)),
            Err(Error::Source("reset"))
        ],
        tokens
    );
    assert_eq!(2, delivered.get());
}

#[test]
fn tokenize_error_ends_stream() {
    let tokens = block_on(
        TokenStream::new(stream::iter(vec![Ok::<_, ()>("<a>"), Ok("</b>"), Ok("</a>")]))
            .collect::<Vec<_>>(),
    );
    assert_eq!(2, tokens.len());
    assert_eq!(
        Some(&ErrorKind::TagMismatch {
            expected: Some("a".into()),
            found: "b".into()
        }),
        tokens[1].as_ref().unwrap_err().kind()
    );
}

#[test]
fn pending_limit_in_stream() {
    let tokens = block_on(
        TokenStream::with_config(
            stream::iter(vec![Ok::<_, ()>("<!-- long"), Ok(" comment"), Ok(" -->")]),
            Config::new().max_pending_len(Some(12)),
        )
        .collect::<Vec<_>>(),
    );
    assert_eq!(1, tokens.len());
    assert_eq!(
        Some(&ErrorKind::PendingLimitExceeded { limit: 12 }),
        tokens[0].as_ref().unwrap_err().kind()
    );
}
