// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Provides chunks from `BufRead` input sources.

use std::io::{self, BufRead};

use super::ChunkSource;

/// Decodes UTF-8 chunks from a `BufRead` input source.
///
/// Each chunk is the decoded contents of one `fill_buf()` call. A multi-byte
/// character split across reads is carried over to the next chunk.
///
/// # Errors
///
/// Errors from the reader are returned as-is, except
/// [`io::ErrorKind::Interrupted`] which is retried. Invalid UTF-8 (including
/// a character cut off by the end of input) is returned as an
/// [`io::ErrorKind::InvalidData`] error.
#[derive(Debug)]
pub struct ReadChunks<R> {
    reader: R,
    partial: Vec<u8>,
    is_eof: bool,
}

impl<R> ReadChunks<R>
where
    R: BufRead,
{
    /// Instantiates a source from a `BufRead` instance.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            partial: Vec::new(),
            is_eof: false,
        }
    }

    /// Returns the underlying `BufRead`.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_chunk(&mut self) -> io::Result<Option<String>> {
        let read = loop {
            match self.reader.fill_buf() {
                Ok(buf) => {
                    self.partial.extend_from_slice(buf);
                    break buf.len();
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.reader.consume(read);

        if read == 0 {
            self.is_eof = true;
            return if self.partial.is_empty() {
                Ok(None)
            } else {
                Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "stream did not end on a UTF-8 character boundary",
                ))
            };
        }

        match String::from_utf8(core::mem::take(&mut self.partial)) {
            Ok(chunk) => Ok(Some(chunk)),
            Err(e) => {
                let utf8_error = e.utf8_error();
                if utf8_error.error_len().is_some() {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, utf8_error));
                }
                let valid_up_to = utf8_error.valid_up_to();
                let mut bytes = e.into_bytes();
                self.partial = bytes.split_off(valid_up_to);
                String::from_utf8(bytes)
                    .map(Some)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
        }
    }
}

impl<R> ChunkSource for ReadChunks<R>
where
    R: BufRead,
{
    type Chunk = String;
    type Error = io::Error;

    fn next_chunk(&mut self) -> Option<Result<Self::Chunk, Self::Error>> {
        if self.is_eof {
            return None;
        }
        match self.read_chunk() {
            Ok(chunk) => chunk.map(Ok),
            Err(e) => {
                self.is_eof = true;
                Some(Err(e))
            }
        }
    }
}
