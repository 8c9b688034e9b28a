// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Provides an iterator and cursor API over a [`ChunkSource`].

use core::iter::FusedIterator;

use log::debug;

use crate::{
    config::Config,
    error::Error,
    scanner::{RawToken, Scanner, Step},
    source::{ChunkSource, Chunks, TryChunks, Whole},
    token::{OwnedToken, Token},
};

#[cfg(feature = "std")]
use crate::source::ReadChunks;

/// Pulls chunks from a source and returns completed tokens.
///
/// Provides both an iterator and cursor API to read the contents.
///
/// The tokenizer can be turned into an iterator by calling `into_iter()`.
/// The iterator returns owned tokens until the input is exhausted or an
/// error occurs. Afterwards, the iterator's `next` method always returns
/// `None`.
///
/// The cursor API is provided with the [`next_token()`][Tokenizer::next_token]
/// method which returns borrowed tokens. The tokens borrow from an internal
/// buffer.
///
/// A chunk is requested from the source only when every token which can be
/// completed from the already received input has been returned.
///
/// # Example
///
/// ```
/// use chunked_xml::{token::{TagOpen, Ty}, Tokenizer};
///
/// let mut tokenizer = Tokenizer::from_chunks(["<id>Exa", "mple</id>"]);
///
/// let token = tokenizer.next_token()?.map(|t| t.ty());
/// assert_eq!(Some(Ty::TagOpen(TagOpen::new("id", "", false))), token);
/// assert_eq!(Some(Ty::Text("Example")), tokenizer.next_token()?.map(|t| t.ty()));
/// assert_eq!(Some(Ty::TagClose("id")), tokenizer.next_token()?.map(|t| t.ty()));
/// assert_eq!(None, tokenizer.next_token()?);
/// # Ok::<(), chunked_xml::Error>(())
/// ```
#[derive(Debug)]
pub struct Tokenizer<S> {
    source: S,
    scanner: Scanner,
}

impl<S> Tokenizer<S> {
    /// Instantiates a tokenizer with the default [`Config`].
    pub fn new(source: S) -> Self {
        Self::with_config(source, Config::default())
    }

    /// Instantiates a tokenizer with the given options.
    pub fn with_config(source: S, config: Config) -> Self {
        Self {
            source,
            scanner: Scanner::new(config),
        }
    }

    /// Returns the byte offset in the overall input after the last returned token.
    ///
    /// The position is mostly useful for debugging.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.scanner.position()
    }

    /// Returns the number of currently open tags.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scanner.stack().len()
    }

    /// Returns the names of the currently open tags from the outermost to the innermost.
    pub fn open_tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.scanner.stack().names()
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<'a> Tokenizer<Whole<'a>> {
    /// Instantiates a tokenizer for a document which is entirely in memory.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(input: &'a str) -> Self {
        Self::new(Whole::new(input))
    }
}

impl<I> Tokenizer<Chunks<I>>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Instantiates a tokenizer for chunks which are always available.
    pub fn from_chunks<T>(chunks: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self::new(Chunks::new(chunks))
    }
}

impl<I, T, E> Tokenizer<TryChunks<I>>
where
    I: Iterator<Item = Result<T, E>>,
    T: AsRef<str>,
{
    /// Instantiates a tokenizer for chunks which may fail to be provided.
    pub fn from_fallible_chunks<C>(chunks: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self::new(TryChunks::new(chunks))
    }
}

#[cfg(feature = "std")]
impl<R> Tokenizer<ReadChunks<R>>
where
    R: std::io::BufRead,
{
    /// Instantiates a tokenizer for a `BufRead` instance.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReadChunks::new(reader))
    }
}

impl<S> Tokenizer<S>
where
    S: ChunkSource,
{
    /// Reads the next token using an internal buffer.
    ///
    /// # Important
    ///
    /// Once the input is exhausted or an error is returned, the method
    /// always returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`Error::Tokenize`] is returned if the document is malformed.
    /// [`Error::Source`] is returned if the source fails to provide a chunk.
    pub fn next_token(&mut self) -> Result<Option<Token<'_>>, Error<S::Error>> {
        Ok(self.advance()?.map(|raw| self.scanner.token(&raw)))
    }

    fn advance(&mut self) -> Result<Option<RawToken>, Error<S::Error>> {
        loop {
            let step = self.scanner.step().map_err(|e| {
                debug!(target: "chunked_xml::tokenizer", "tokenize error at {}: {e}", e.position());
                e
            })?;

            match step {
                Step::Token(raw) => return Ok(Some(raw)),
                Step::Done => return Ok(None),
                Step::NeedChunk => {
                    debug!(target: "chunked_xml::tokenizer", "requesting chunk at {}", self.scanner.position());
                    match self.source.next_chunk() {
                        Some(Ok(chunk)) => {
                            let chunk = chunk.as_ref();
                            debug!(target: "chunked_xml::tokenizer", "received chunk of {} bytes", chunk.len());
                            self.scanner.feed(chunk);
                        }
                        Some(Err(e)) => {
                            debug!(target: "chunked_xml::tokenizer", "chunk source failed");
                            self.scanner.fail();
                            return Err(Error::Source(e));
                        }
                        None => {
                            debug!(target: "chunked_xml::tokenizer", "chunk source exhausted");
                            self.scanner.end_of_input();
                        }
                    }
                }
            }
        }
    }
}

impl<S> IntoIterator for Tokenizer<S>
where
    S: ChunkSource,
{
    type Item = Result<OwnedToken, Error<S::Error>>;
    type IntoIter = IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tokenizer: self }
    }
}

/// The returned iterator type when [`IntoIterator::into_iter()`] is called on [`Tokenizer`].
#[derive(Debug)]
pub struct IntoIter<S> {
    tokenizer: Tokenizer<S>,
}

impl<S> IntoIter<S> {
    /// Returns the tokenizer.
    pub fn into_inner(self) -> Tokenizer<S> {
        self.tokenizer
    }
}

impl<S> Iterator for IntoIter<S>
where
    S: ChunkSource,
{
    type Item = Result<OwnedToken, Error<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokenizer
            .next_token()
            .map(|token| token.map(Token::into_owned))
            .transpose()
    }
}

impl<S> FusedIterator for IntoIter<S> where S: ChunkSource {}
