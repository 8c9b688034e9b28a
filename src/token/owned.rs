// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Owned tokens have a copy of the scanned values.
//!
//! While there is a cost for each owned token having its own buffer, if the
//! calling code needs to retain or work on more than one token at a time,
//! then it will require owned tokens.

use alloc::string::String;
use core::fmt;

use super::{TagOpen, Ty};

/// A token with owned values.
///
/// Returned by the iterator and stream APIs.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum OwnedToken {
    /// Text content between markup. Entities are not decoded.
    Text(String),
    /// The contents between `<![CDATA[` and `]]>`.
    CData(String),
    /// The contents between `<!--` and `-->`.
    Comment(String),
    /// The contents between `<?` and `?>`.
    ProcessingInstruction(String),
    /// An opening tag.
    TagOpen {
        /// The tag name.
        name: String,
        /// The raw attributes text trimmed of surrounding whitespace.
        attributes: String,
        /// True if the tag ends with `/>`.
        self_closing: bool,
    },
    /// The name in a closing tag.
    TagClose(String),
}

impl OwnedToken {
    /// Instantiates a text token.
    pub fn text(content: impl Into<String>) -> Self {
        OwnedToken::Text(content.into())
    }

    /// Instantiates a CDATA token.
    pub fn cdata(content: impl Into<String>) -> Self {
        OwnedToken::CData(content.into())
    }

    /// Instantiates a comment token.
    pub fn comment(content: impl Into<String>) -> Self {
        OwnedToken::Comment(content.into())
    }

    /// Instantiates a processing instruction token.
    pub fn processing_instruction(content: impl Into<String>) -> Self {
        OwnedToken::ProcessingInstruction(content.into())
    }

    /// Instantiates an opening tag token.
    pub fn tag_open(
        name: impl Into<String>,
        attributes: impl Into<String>,
        self_closing: bool,
    ) -> Self {
        OwnedToken::TagOpen {
            name: name.into(),
            attributes: attributes.into(),
            self_closing,
        }
    }

    /// Instantiates a closing tag token.
    pub fn tag_close(name: impl Into<String>) -> Self {
        OwnedToken::TagClose(name.into())
    }

    /// Borrows the values as a [`Ty`].
    #[must_use]
    pub fn as_ty(&self) -> Ty<'_> {
        match self {
            OwnedToken::Text(s) => Ty::Text(s),
            OwnedToken::CData(s) => Ty::CData(s),
            OwnedToken::Comment(s) => Ty::Comment(s),
            OwnedToken::ProcessingInstruction(s) => Ty::ProcessingInstruction(s),
            OwnedToken::TagOpen {
                name,
                attributes,
                self_closing,
            } => Ty::TagOpen(TagOpen::new(name, attributes, *self_closing)),
            OwnedToken::TagClose(s) => Ty::TagClose(s),
        }
    }
}

impl From<Ty<'_>> for OwnedToken {
    fn from(ty: Ty<'_>) -> Self {
        match ty {
            Ty::Text(s) => OwnedToken::text(s),
            Ty::CData(s) => OwnedToken::cdata(s),
            Ty::Comment(s) => OwnedToken::comment(s),
            Ty::ProcessingInstruction(s) => OwnedToken::processing_instruction(s),
            Ty::TagOpen(tag) => {
                OwnedToken::tag_open(tag.name(), tag.attributes(), tag.is_self_closing())
            }
            Ty::TagClose(s) => OwnedToken::tag_close(s),
        }
    }
}

impl From<super::Token<'_>> for OwnedToken {
    fn from(token: super::Token<'_>) -> Self {
        token.into_owned()
    }
}

/// Writes the token in its XML form.
///
/// Whitespace which was trimmed from the attributes or around the `/>` of a
/// self-closing tag is not restored.
impl fmt::Display for OwnedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnedToken::Text(s) => f.write_str(s),
            OwnedToken::CData(s) => write!(f, "<![CDATA[{s}]]>"),
            OwnedToken::Comment(s) => write!(f, "<!--{s}-->"),
            OwnedToken::ProcessingInstruction(s) => write!(f, "<?{s}?>"),
            OwnedToken::TagOpen {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                if !attributes.is_empty() {
                    write!(f, " {attributes}")?;
                }
                if *self_closing {
                    f.write_str("/>")
                } else {
                    f.write_str(">")
                }
            }
            OwnedToken::TagClose(s) => write!(f, "</{s}>"),
        }
    }
}
