// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors which end a token sequence.
//!
//! Every error is fatal to the current document. Once an error is returned,
//! the tokenizer does not produce any more tokens.

use alloc::{string::String, vec::Vec};
use core::{convert::Infallible, fmt};

/// A construct which was being scanned when the input ended.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Construct {
    /// A `<!` was seen but not enough input to determine what follows.
    MarkupDeclaration,
    /// A `<![CDATA[` section without the terminating `]]>`.
    CData,
    /// A `<!--` comment without the terminating `-->`.
    Comment,
    /// A `<?` processing instruction without the terminating `?>`.
    ProcessingInstruction,
    /// An opening or closing tag without the terminating `>`.
    Tag,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Construct::MarkupDeclaration => "markup declaration",
            Construct::CData => "CDATA section",
            Construct::Comment => "comment",
            Construct::ProcessingInstruction => "processing instruction",
            Construct::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// The reason a document could not be tokenized.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A `<!` which is not followed by a comment or CDATA opener.
    ///
    /// The prefix is the `<!` and the character after it. `DOCTYPE`
    /// declarations are reported with this error.
    UnrecognizedMarkup {
        /// The offending prefix.
        prefix: String,
    },
    /// A `--` inside of a comment which is not followed by `>`.
    MalformedComment,
    /// The input ended while a construct was only partially scanned.
    Unclosed(Construct),
    /// A closing tag did not match the most recently opened tag.
    TagMismatch {
        /// The name of the most recently opened tag, or `None` if no tag was open.
        expected: Option<String>,
        /// The name in the closing tag.
        found: String,
    },
    /// The input ended with tags still open.
    ///
    /// The names are ordered from the outermost to the innermost tag.
    UnclosedTags(Vec<String>),
    /// An opening tag where whitespace immediately follows the `<`.
    InvalidTagName,
    /// A partially scanned token grew beyond the configured limit.
    PendingLimitExceeded {
        /// The configured limit in bytes.
        limit: usize,
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnrecognizedMarkup { prefix } => {
                write!(f, "unrecognized markup declaration: {prefix}")
            }
            ErrorKind::MalformedComment => f.write_str("unexpected -- inside comment"),
            ErrorKind::Unclosed(construct) => write!(f, "unclosed {construct}"),
            ErrorKind::TagMismatch {
                expected: Some(expected),
                ..
            } => write!(f, "unclosed tag: {expected}"),
            ErrorKind::TagMismatch {
                expected: None,
                found,
            } => write!(f, "unexpected closing tag: {found}"),
            ErrorKind::UnclosedTags(names) => {
                f.write_str("unclosed tags: ")?;
                for (idx, name) in names.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(name)?;
                }
                Ok(())
            }
            ErrorKind::InvalidTagName => f.write_str("tag names may not start with whitespace"),
            ErrorKind::PendingLimitExceeded { limit } => {
                write!(f, "partial token exceeds the limit of {limit} bytes")
            }
        }
    }
}

/// A fatal error found while scanning the document.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TokenizeError {
    kind: ErrorKind,
    position: u64,
}

impl TokenizeError {
    pub(crate) fn new(kind: ErrorKind, position: u64) -> Self {
        Self { kind, position }
    }

    /// The reason for the error.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Consumes the error and returns the reason.
    #[must_use]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// The byte offset in the overall input where the offending construct starts.
    ///
    /// Tags left open at the end of input are reported at the total input
    /// length.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TokenizeError {}

/// Errors returned while pulling tokens.
///
/// `E` is the error type of the chunk source. Sources which cannot fail use
/// [`Infallible`].
#[derive(Debug)]
pub enum Error<E = Infallible> {
    /// The document is malformed.
    Tokenize(TokenizeError),
    /// The chunk source failed.
    Source(E),
}

impl<E> Error<E> {
    /// Returns the tokenize error if the document was malformed.
    #[must_use]
    pub fn as_tokenize(&self) -> Option<&TokenizeError> {
        match self {
            Error::Tokenize(e) => Some(e),
            Error::Source(_) => None,
        }
    }

    /// Returns the reason the document was malformed.
    #[must_use]
    pub fn kind(&self) -> Option<&ErrorKind> {
        self.as_tokenize().map(TokenizeError::kind)
    }
}

impl<E> From<TokenizeError> for Error<E> {
    fn from(e: TokenizeError) -> Self {
        Error::Tokenize(e)
    }
}

impl<E: PartialEq> PartialEq for Error<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Tokenize(a), Error::Tokenize(b)) => a == b,
            (Error::Source(a), Error::Source(b)) => a == b,
            _ => false,
        }
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Tokenize(e) => fmt::Display::fmt(e, f),
            Error::Source(e) => write!(f, "chunk source error: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for Error<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Tokenize(e) => Some(e),
            Error::Source(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn display_messages() {
        assert_eq!(
            "unexpected -- inside comment",
            ErrorKind::MalformedComment.to_string()
        );
        assert_eq!(
            "unclosed tag: unclosed",
            ErrorKind::TagMismatch {
                expected: Some("unclosed".into()),
                found: "closed".into(),
            }
            .to_string()
        );
        assert_eq!(
            "unexpected closing tag: a",
            ErrorKind::TagMismatch {
                expected: None,
                found: "a".into(),
            }
            .to_string()
        );
        assert_eq!(
            "unclosed tags: a, b",
            ErrorKind::UnclosedTags(vec!["a".into(), "b".into()]).to_string()
        );
        assert_eq!(
            "unclosed CDATA section",
            ErrorKind::Unclosed(Construct::CData).to_string()
        );
        assert_eq!(
            "unrecognized markup declaration: <!D",
            ErrorKind::UnrecognizedMarkup {
                prefix: "<!D".into()
            }
            .to_string()
        );
    }

    #[test]
    fn error_wraps_tokenize_error() {
        let e: Error = TokenizeError::new(ErrorKind::InvalidTagName, 3).into();
        assert_eq!(Some(&ErrorKind::InvalidTagName), e.kind());
        assert_eq!(Some(3), e.as_tokenize().map(TokenizeError::position));
        assert_eq!("tag names may not start with whitespace", e.to_string());
    }
}
