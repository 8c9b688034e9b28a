// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime options for a tokenizer.

/// Options for a [`Tokenizer`][crate::Tokenizer].
///
/// # Example
///
/// ```
/// use chunked_xml::{source::Whole, Config, Tokenizer};
///
/// let config = Config::new().max_pending_len(Some(64 * 1024));
/// let mut tokenizer = Tokenizer::with_config(Whole::new("<a>text</a>"), config);
/// assert!(tokenizer.next_token()?.is_some());
/// # Ok::<(), chunked_xml::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    pub(crate) max_pending_len: Option<usize>,
    pub(crate) initial_capacity: usize,
}

impl Config {
    /// The default initial capacity of the internal buffer.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 8 * 1024;

    /// Instantiates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_pending_len: None,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }

    /// Sets the maximum length in bytes of a partially scanned token.
    ///
    /// When a token is not completed within the received chunks, the
    /// unconsumed input is buffered until the next chunk arrives. For untrusted
    /// input (say a network socket), a document like `<tag` followed by an
    /// endless stream of bytes without a `>` would grow the buffer without
    /// bound. With a limit, the tokenizer fails with
    /// [`ErrorKind::PendingLimitExceeded`][crate::ErrorKind::PendingLimitExceeded]
    /// instead.
    ///
    /// `None` (the default) means the buffer is bounded only by memory.
    #[must_use]
    pub const fn max_pending_len(mut self, limit: Option<usize>) -> Self {
        self.max_pending_len = limit;
        self
    }

    /// Sets the initial capacity of the internal buffer.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Returns the maximum length of a partially scanned token.
    ///
    /// ```
    /// use chunked_xml::Config;
    ///
    /// assert_eq!(None, Config::new().pending_limit());
    /// assert_eq!(Some(16), Config::new().max_pending_len(Some(16)).pending_limit());
    /// ```
    #[must_use]
    pub const fn pending_limit(&self) -> Option<usize> {
        self.max_pending_len
    }

    /// Returns the initial capacity of the internal buffer.
    ///
    /// ```
    /// use chunked_xml::Config;
    ///
    /// assert_eq!(Config::DEFAULT_INITIAL_CAPACITY, Config::default().capacity());
    /// assert_eq!(256, Config::new().initial_capacity(256).capacity());
    /// ```
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.initial_capacity
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
