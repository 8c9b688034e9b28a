// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tokens are the values produced by tokenizing the input.
//!
//! There are two types of tokens: borrowed and owned. A borrowed [`Token`]
//! is a view into the tokenizer's internal buffer and is valid until the
//! next token is requested. An [`OwnedToken`] has its own copy of the
//! values.
//!
//! Methods which return a borrowed token act like a cursor API. Methods which
//! return an owned token act like an iterator API which provides a value that
//! can be stored or transformed.

use core::fmt;

mod owned;

pub use owned::OwnedToken;

/// The type of a token and its values.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Ty<'a> {
    /// Text content between markup. Entities are not decoded.
    Text(&'a str),
    /// The contents between `<![CDATA[` and `]]>`.
    CData(&'a str),
    /// The contents between `<!--` and `-->`.
    Comment(&'a str),
    /// The contents between `<?` and `?>`.
    ProcessingInstruction(&'a str),
    /// An opening tag like `<greeting lang="en">` or a self-closing tag like `<br/>`.
    TagOpen(TagOpen<'a>),
    /// The name in a closing tag like `</greeting>`.
    TagClose(&'a str),
}

/// An opening tag.
///
/// The attributes are the raw text after the tag name, trimmed of surrounding
/// whitespace. They are not parsed into key and value pairs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TagOpen<'a> {
    name: &'a str,
    attributes: &'a str,
    self_closing: bool,
}

impl<'a> TagOpen<'a> {
    /// Instantiates a new instance.
    #[inline]
    #[must_use]
    pub const fn new(name: &'a str, attributes: &'a str, self_closing: bool) -> Self {
        Self {
            name,
            attributes,
            self_closing,
        }
    }

    /// The tag name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// The raw attributes text.
    #[inline]
    #[must_use]
    pub const fn attributes(&self) -> &'a str {
        self.attributes
    }

    /// True if the tag ends with `/>`.
    ///
    /// A self-closing tag is not followed by a closing tag.
    #[inline]
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }
}

/// A token borrowed from the tokenizer's internal buffer.
///
/// The token has both the raw text which was scanned (including any
/// delimiters like `<!--` and `-->`) and the identified [`Ty`].
///
/// # Example
///
/// ```
/// use chunked_xml::{Tokenizer, token::{TagOpen, Ty}};
///
/// let mut tokenizer = Tokenizer::from_str(r#"<greeting lang="en"/>"#);
///
/// let token = tokenizer.next_token()?.unwrap();
/// assert_eq!(r#"<greeting lang="en"/>"#, token.as_str());
/// assert_eq!(Ty::TagOpen(TagOpen::new("greeting", r#"lang="en""#, true)), token.ty());
/// # Ok::<(), chunked_xml::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Token<'a> {
    raw: &'a str,
    ty: Ty<'a>,
}

impl<'a> Token<'a> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(raw: &'a str, ty: Ty<'a>) -> Self {
        Self { raw, ty }
    }

    /// The token type and its values.
    #[inline]
    #[must_use]
    pub const fn ty(&self) -> Ty<'a> {
        self.ty
    }

    /// The raw text of the token including delimiters.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.raw
    }

    /// The length of the raw text in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// True if the raw text is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Copies the values into an [`OwnedToken`].
    #[must_use]
    pub fn into_owned(self) -> OwnedToken {
        OwnedToken::from(self.ty)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

impl AsRef<str> for Token<'_> {
    fn as_ref(&self) -> &str {
        self.raw
    }
}
