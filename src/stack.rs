// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tracks open tags to check that tags are balanced.

use alloc::{string::String, vec::Vec};

use crate::error::ErrorKind;

/// Names of the currently open (non-self-closing) tags.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TagStack {
    names: Vec<String>,
}

impl TagStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &str) {
        self.names.push(String::from(name));
    }

    /// Pops the innermost open tag and verifies it has the same name.
    ///
    /// On a mismatch, the stack is cleared.
    pub(crate) fn close(&mut self, name: &str) -> Result<(), ErrorKind> {
        match self.names.pop() {
            Some(open) if open == name => Ok(()),
            expected => {
                self.names.clear();
                Err(ErrorKind::TagMismatch {
                    expected,
                    found: String::from(name),
                })
            }
        }
    }

    /// Verifies no tags are still open at the end of the document.
    pub(crate) fn finish(&mut self) -> Result<(), ErrorKind> {
        if self.names.is_empty() {
            Ok(())
        } else {
            Err(ErrorKind::UnclosedTags(core::mem::take(&mut self.names)))
        }
    }

    pub(crate) fn clear(&mut self) {
        self.names.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}
