// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ChunkedXml is a library to tokenize [XML][xml] documents which arrive in
//! chunks. In effect, the library provides a non-validating, incremental lexer.
//! The interface is similar to many XML pull parsers.
//!
//! The library does 3 things:
//!
//! 1. A [`ChunkSource`] provides the document as a sequence of string chunks.
//!    A chunk may end anywhere, including in the middle of a tag or a comment
//!    delimiter.
//!
//! 2. A [`Tokenizer`] pulls chunks from the source and returns complete
//!    tokens like tags, text, comments, CDATA sections, and processing
//!    instructions via either a cursor or an iterator pull style API.
//!
//!    When a token cannot be completed with the received chunks, the unconsumed
//!    input is kept and scanning resumes when the next chunk arrives. The next
//!    chunk is requested only after every token which could be completed has
//!    been returned, so the tokenizer never reads ahead of the caller.
//!
//! 3. The tokenizer checks that opening and closing tags are balanced. Any
//!    malformed construct is a fatal [`Error`] which ends the token sequence.
//!
//! # Usage
//!
//! First, instantiate a `Tokenizer` with a source. There are convenience
//! constructors for a whole document ([`Tokenizer::from_str`]), an iterator of
//! chunks ([`Tokenizer::from_chunks`]), and a `std::io::BufRead`
//! ([`Tokenizer::from_reader`]).
//!
//! Second, if the tokens need to be retained or transformed, call `into_iter()`
//! and use the `Iterator` methods. The iterator returns [`OwnedToken`]s which
//! have copies of the token values.
//!
//! If the use case only involves reading the values, the cursor API (calling
//! [`Tokenizer::next_token`] directly) may be sufficient. The returned
//! [`Token`]s borrow from an internal buffer.
//!
//! With the `stream` feature, a [`TokenStream`] tokenizes chunks from an
//! asynchronous `futures_core::Stream`.
//!
//! # Example
//!
//! The following code uses the iterator style API to transform uppercase `ID`
//! into lowercase `id` tag names.
//!
//! ```
//! use chunked_xml::{token::OwnedToken, Tokenizer};
//!
//! let chunks = ["<ID>Exa", "mple</", "ID>"];
//!
//! let mut iter = Tokenizer::from_chunks(chunks)
//!     .into_iter()
//!     .map(|token| match token {
//!         Ok(OwnedToken::TagOpen { name, attributes, self_closing }) => Ok(OwnedToken::TagOpen {
//!             name: name.to_lowercase(),
//!             attributes,
//!             self_closing,
//!         }),
//!         Ok(OwnedToken::TagClose(name)) => Ok(OwnedToken::TagClose(name.to_lowercase())),
//!         other => other,
//!     });
//!
//! assert_eq!(iter.next(), Some(Ok(OwnedToken::tag_open("id", "", false))));
//! assert_eq!(iter.next(), Some(Ok(OwnedToken::text("Example"))));
//! assert_eq!(iter.next(), Some(Ok(OwnedToken::tag_close("id"))));
//! assert_eq!(iter.next(), None);
//! ```
//!
//! # Well-formed vs. Malformed document processing
//!
//! Only tag nesting is checked. Attributes are not parsed, entities are not
//! decoded, and `DOCTYPE` declarations are rejected as unrecognized markup.
//! There is no recovery after an error.
//!
//! # Security Considerations
//!
//! By default, there are no limits on the amount of data buffered. A token
//! which is not terminated (like `<tag` followed by an endless stream of
//! bytes) is buffered until its end is found. For untrusted input sources, set
//! [`Config::max_pending_len`] to fail instead.
//!
//! # Logging
//!
//! Scanned tokens are logged at the `trace` level and chunk requests and
//! errors at the `debug` level with the [`log`] crate. No logger is installed
//! by the library.
//!
//! [xml]: https://www.w3.org/TR/2006/REC-xml11-20060816/

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

extern crate alloc;

pub(crate) mod bytes;
mod config;
mod error;
pub(crate) mod scanner;
pub mod source;
pub(crate) mod stack;
#[cfg(feature = "stream")]
#[cfg_attr(docsrs, doc(cfg(feature = "stream")))]
mod stream;
pub mod token;
mod tokenizer;

pub use config::Config;
pub use error::{Construct, Error, ErrorKind, TokenizeError};
pub use source::ChunkSource;
#[cfg(feature = "stream")]
pub use stream::TokenStream;
pub use token::{OwnedToken, Token};
pub use tokenizer::{IntoIter, Tokenizer};
