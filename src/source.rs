// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sources of input chunks.
//!
//! A [`ChunkSource`] provides the document as a sequence of string chunks.
//! Chunk boundaries are arbitrary: a tag, comment, or any other token may be
//! split across any number of chunks.
//!
//! The provided sources are:
//!
//! * [`Whole`] for a document which is already entirely in memory.
//! * [`Chunks`] for any iterator of string chunks which cannot fail.
//! * [`TryChunks`] for an iterator of `Result`s, such as chunks decoded from
//!   a network protocol.
//! * [`ReadChunks`] for a `std::io::BufRead` (requires the `std` feature).

use core::convert::Infallible;

#[cfg(feature = "std")]
mod read;

#[cfg(feature = "std")]
pub use read::ReadChunks;

/// Provides the input in chunks.
pub trait ChunkSource {
    /// A chunk of the document.
    type Chunk: AsRef<str>;

    /// The error returned if a chunk cannot be provided.
    type Error;

    /// Returns the next chunk.
    ///
    /// Returns `None` when the input is exhausted. Empty chunks are allowed.
    ///
    /// The tokenizer does not call the method again after `None` or an
    /// error is returned.
    fn next_chunk(&mut self) -> Option<Result<Self::Chunk, Self::Error>>;
}

impl<S> ChunkSource for &mut S
where
    S: ChunkSource + ?Sized,
{
    type Chunk = S::Chunk;
    type Error = S::Error;

    #[inline]
    fn next_chunk(&mut self) -> Option<Result<Self::Chunk, Self::Error>> {
        (**self).next_chunk()
    }
}

/// The whole document as a single chunk.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Whole<'a> {
    input: Option<&'a str>,
}

impl<'a> Whole<'a> {
    /// Instantiates a source which provides the input as one chunk.
    #[inline]
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input: Some(input) }
    }
}

impl<'a> From<&'a str> for Whole<'a> {
    fn from(input: &'a str) -> Self {
        Self::new(input)
    }
}

impl<'a> ChunkSource for Whole<'a> {
    type Chunk = &'a str;
    type Error = Infallible;

    #[inline]
    fn next_chunk(&mut self) -> Option<Result<Self::Chunk, Self::Error>> {
        self.input.take().map(Ok)
    }
}

/// Chunks from an iterator which cannot fail.
///
/// # Example
///
/// ```
/// use chunked_xml::{source::Chunks, token::OwnedToken, Tokenizer};
///
/// let tokenizer = Tokenizer::new(Chunks::new(["<gre", "eting>Hel", "lo</greeting>"]));
/// let tokens = tokenizer.into_iter().collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(
///     vec![
///         OwnedToken::tag_open("greeting", "", false),
///         OwnedToken::text("Hello"),
///         OwnedToken::tag_close("greeting"),
///     ],
///     tokens
/// );
/// # Ok::<(), chunked_xml::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Chunks<I> {
    iter: I,
}

impl<I> Chunks<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Instantiates a source from anything which can be iterated over.
    pub fn new<T>(chunks: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: chunks.into_iter(),
        }
    }

    /// Returns the underlying iterator.
    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I> ChunkSource for Chunks<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Chunk = I::Item;
    type Error = Infallible;

    #[inline]
    fn next_chunk(&mut self) -> Option<Result<Self::Chunk, Self::Error>> {
        self.iter.next().map(Ok)
    }
}

/// Chunks from an iterator which may fail.
///
/// The first error ends the input.
#[derive(Clone, Debug)]
pub struct TryChunks<I> {
    iter: I,
}

impl<I, T, E> TryChunks<I>
where
    I: Iterator<Item = Result<T, E>>,
    T: AsRef<str>,
{
    /// Instantiates a source from anything which can be iterated over.
    pub fn new<C>(chunks: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: chunks.into_iter(),
        }
    }

    /// Returns the underlying iterator.
    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I, T, E> ChunkSource for TryChunks<I>
where
    I: Iterator<Item = Result<T, E>>,
    T: AsRef<str>,
{
    type Chunk = T;
    type Error = E;

    #[inline]
    fn next_chunk(&mut self) -> Option<Result<Self::Chunk, Self::Error>> {
        self.iter.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::String, vec, vec::Vec};

    fn drain<S: ChunkSource>(mut source: S) -> Vec<Result<String, S::Error>> {
        let mut chunks = Vec::new();
        while let Some(chunk) = source.next_chunk() {
            chunks.push(chunk.map(|c| String::from(c.as_ref())));
        }
        chunks
    }

    #[test]
    fn whole_is_one_chunk() {
        let mut source = Whole::new("<a/>");
        assert_eq!(Some(Ok("<a/>")), source.next_chunk());
        assert_eq!(None, source.next_chunk());
        assert_eq!(None, source.next_chunk());
    }

    #[test]
    fn chunks_in_order() {
        let chunks = drain(Chunks::new(vec![String::from("<a>"), String::new(), String::from("</a>")]));
        assert_eq!(
            vec![Ok(String::from("<a>")), Ok(String::new()), Ok(String::from("</a>"))],
            chunks
        );
    }

    #[test]
    fn try_chunks_passes_errors() {
        let chunks = drain(TryChunks::new(vec![Ok("<a>"), Err(7)]));
        assert_eq!(vec![Ok(String::from("<a>")), Err(7)], chunks);
    }

    #[test]
    fn mut_ref_is_a_source() {
        let mut source = Chunks::new(["a", "b"]);
        assert_eq!(Some(Ok("a")), (&mut source).next_chunk());
        assert_eq!(Some(Ok("b")), source.next_chunk());
    }
}
