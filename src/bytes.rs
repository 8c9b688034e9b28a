// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Internal byte slice searching.

use core::ops::Range;

use memchr::{memchr, memmem};

#[inline]
#[must_use]
pub(crate) const fn is_space(byte: u8) -> bool {
    matches!(byte, 32 | 9 | 13 | 10)
}

/// Finds the index of the first `needle` byte at or after `from`.
#[inline]
#[must_use]
pub(crate) fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    memchr(needle, &bytes[from..]).map(|idx| from + idx)
}

/// Finds the index of the first `needle` sequence starting at or after `from`.
#[inline]
#[must_use]
pub(crate) fn find_seq(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    memmem::find(&bytes[from..], needle).map(|idx| from + idx)
}

/// Finds the index of the first space byte in the range.
#[inline]
#[must_use]
pub(crate) fn find_space(bytes: &[u8], range: Range<usize>) -> Option<usize> {
    let start = range.start;
    bytes[range].iter().position(|b| is_space(*b)).map(|idx| start + idx)
}

/// Shrinks the range to exclude leading and trailing space bytes.
#[must_use]
pub(crate) fn trim(bytes: &[u8], range: Range<usize>) -> Range<usize> {
    let Range { mut start, mut end } = range;
    while start < end && is_space(bytes[start]) {
        start += 1;
    }
    while end > start && is_space(bytes[end - 1]) {
        end -= 1;
    }
    start..end
}

/// Where to resume searching for a `needle_len` delimiter after `len` bytes
/// were searched without finding it.
///
/// The last `needle_len - 1` bytes may be the start of the delimiter.
#[inline]
#[must_use]
pub(crate) const fn resume_offset(len: usize, needle_len: usize) -> usize {
    len.saturating_sub(needle_len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_byte_from_offset() {
        let bytes = b"a<b<c".as_ref();
        assert_eq!(Some(1), find_byte(bytes, 0, b'<'));
        assert_eq!(Some(3), find_byte(bytes, 2, b'<'));
        assert_eq!(None, find_byte(bytes, 4, b'<'));
        assert_eq!(None, find_byte(bytes, 5, b'<'));
    }

    #[test]
    fn find_seq_from_offset() {
        let bytes = b"<!-- a -- b -->".as_ref();
        assert_eq!(Some(2), find_seq(bytes, 0, b"--"));
        assert_eq!(Some(7), find_seq(bytes, 4, b"--"));
        assert_eq!(None, find_seq(bytes, 14, b"--"));
    }

    #[test]
    fn find_space_in_range() {
        let bytes = b"<tag a=\"b\">".as_ref();
        assert_eq!(Some(4), find_space(bytes, 1..10));
        assert_eq!(None, find_space(bytes, 1..4));
    }

    #[test]
    fn trim_ranges() {
        let bytes = b"  a b \t\n".as_ref();
        assert_eq!(2..5, trim(bytes, 0..bytes.len()));

        let bytes = b"   ".as_ref();
        assert_eq!(3..3, trim(bytes, 0..3));
    }

    #[test]
    fn resume_offsets() {
        assert_eq!(9, resume_offset(10, 2));
        assert_eq!(8, resume_offset(10, 3));
        assert_eq!(0, resume_offset(1, 3));
    }
}
