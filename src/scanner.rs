// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scans buffered chunks for tokens.
//!
//! The [`Scanner`] owns the buffered input, the cursor into the buffer, the
//! record of a partially scanned token, and the stack of open tags. It does
//! not read input itself. A driver (the synchronous tokenizer or the
//! asynchronous stream) asks for the next [`Step`] and feeds a new chunk only
//! when the scanner needs one.

use alloc::string::String;
use core::ops::Range;

use log::trace;

use crate::{
    bytes,
    config::Config,
    error::{Construct, ErrorKind, TokenizeError},
    stack::TagStack,
    token::{TagOpen, Token, Ty},
};

const CDATA_OPEN: &[u8] = b"<![CDATA[";
const CDATA_CLOSE: &[u8] = b"]]>";
const COMMENT_OPEN_LEN: usize = "<!--".len();
const COMMENT_DASHES: &[u8] = b"--";
const PI_OPEN_LEN: usize = "<?".len();
const PI_CLOSE: &[u8] = b"?>";

/// The construct which was being scanned when the buffered input ran out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PendingKind {
    Text,
    MarkupDeclaration,
    CData,
    Comment,
    ProcessingInstruction,
    Tag,
}

impl PendingKind {
    fn construct(self) -> Option<Construct> {
        match self {
            PendingKind::Text => None,
            PendingKind::MarkupDeclaration => Some(Construct::MarkupDeclaration),
            PendingKind::CData => Some(Construct::CData),
            PendingKind::Comment => Some(Construct::Comment),
            PendingKind::ProcessingInstruction => Some(Construct::ProcessingInstruction),
            PendingKind::Tag => Some(Construct::Tag),
        }
    }
}

/// A partially scanned token.
///
/// The unconsumed text is `buf[pos..]`. `resume` is the offset from `pos`
/// where the search for the terminating delimiter continues.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Pending {
    kind: PendingKind,
    resume: usize,
}

impl Pending {
    /// The resume offset if the construct being scanned is still the same kind.
    fn resume_for(pending: Option<Pending>, kind: PendingKind) -> usize {
        match pending {
            Some(p) if p.kind == kind => p.resume,
            _ => 0,
        }
    }
}

/// The type of a scanned token as ranges into the buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
enum RawTy {
    Text(Range<usize>),
    CData(Range<usize>),
    Comment(Range<usize>),
    ProcessingInstruction(Range<usize>),
    TagOpen {
        name: Range<usize>,
        attributes: Range<usize>,
        self_closing: bool,
    },
    TagClose(Range<usize>),
}

/// A scanned token as ranges into the buffer.
///
/// Ranges stay valid until the next chunk is fed to the scanner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RawToken {
    span: Range<usize>,
    ty: RawTy,
}

/// The result of scanning from the cursor.
#[derive(Debug)]
enum Scan {
    Found(RawTy, usize),
    Incomplete(PendingKind, usize),
}

/// What the driver should do next.
#[derive(Debug)]
pub(crate) enum Step {
    /// A token was scanned.
    Token(RawToken),
    /// No token can be completed from the buffered input. Feed the next
    /// chunk or signal the end of input.
    NeedChunk,
    /// The input was completely tokenized or an error occurred.
    Done,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    Scanning,
    EndOfInput,
    Done,
}

/// Incrementally scans chunks of a document.
#[derive(Debug)]
pub(crate) struct Scanner {
    buf: String,
    pos: usize,
    /// Stream offset of `buf[0]`.
    offset: u64,
    pending: Option<Pending>,
    stack: TagStack,
    phase: Phase,
    max_pending_len: Option<usize>,
}

impl Scanner {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            buf: String::with_capacity(config.initial_capacity),
            pos: 0,
            offset: 0,
            pending: None,
            stack: TagStack::new(),
            phase: Phase::Scanning,
            max_pending_len: config.max_pending_len,
        }
    }

    /// The stream offset of the cursor.
    pub(crate) fn position(&self) -> u64 {
        self.offset + self.pos as u64
    }

    /// True if no more tokens will be scanned.
    #[cfg(feature = "stream")]
    pub(crate) fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub(crate) fn stack(&self) -> &TagStack {
        &self.stack
    }

    /// Appends a chunk after the unconsumed input.
    ///
    /// Consumed input is discarded, so previously returned [`RawToken`]s are
    /// invalidated.
    pub(crate) fn feed(&mut self, chunk: &str) {
        debug_assert_eq!(self.phase, Phase::Scanning);
        if self.pos > 0 {
            self.buf.drain(..self.pos);
            self.offset += self.pos as u64;
            self.pos = 0;
        }
        self.buf.push_str(chunk);
    }

    /// Signals that no more chunks will be fed.
    pub(crate) fn end_of_input(&mut self) {
        if self.phase == Phase::Scanning {
            self.phase = Phase::EndOfInput;
        }
    }

    /// Stops the scanner. Every further step is [`Step::Done`].
    pub(crate) fn fail(&mut self) {
        self.phase = Phase::Done;
        self.pending = None;
        self.stack.clear();
    }

    /// Scans for the next token.
    ///
    /// After an error is returned, the scanner is stopped.
    pub(crate) fn step(&mut self) -> Result<Step, TokenizeError> {
        let result = match self.phase {
            Phase::Done => return Ok(Step::Done),
            Phase::Scanning => self.scan().map(|token| match token {
                Some(token) => Step::Token(token),
                None => Step::NeedChunk,
            }),
            Phase::EndOfInput => self.finish().map(|token| match token {
                Some(token) => Step::Token(token),
                None => {
                    self.phase = Phase::Done;
                    Step::Done
                }
            }),
        };
        if result.is_err() {
            self.fail();
        }
        result
    }

    /// Resolves a scanned token into a borrowed view of the buffer.
    pub(crate) fn token(&self, raw: &RawToken) -> Token<'_> {
        let buf = self.buf.as_str();
        let ty = match &raw.ty {
            RawTy::Text(r) => Ty::Text(&buf[r.clone()]),
            RawTy::CData(r) => Ty::CData(&buf[r.clone()]),
            RawTy::Comment(r) => Ty::Comment(&buf[r.clone()]),
            RawTy::ProcessingInstruction(r) => Ty::ProcessingInstruction(&buf[r.clone()]),
            RawTy::TagOpen {
                name,
                attributes,
                self_closing,
            } => Ty::TagOpen(TagOpen::new(
                &buf[name.clone()],
                &buf[attributes.clone()],
                *self_closing,
            )),
            RawTy::TagClose(r) => Ty::TagClose(&buf[r.clone()]),
        };
        Token::new(&buf[raw.span.clone()], ty)
    }

    fn error(&self, kind: ErrorKind, at: usize) -> TokenizeError {
        TokenizeError::new(kind, self.offset + at as u64)
    }

    fn scan(&mut self) -> Result<Option<RawToken>, TokenizeError> {
        let start = self.pos;
        if start == self.buf.len() {
            return Ok(None);
        }
        let pending = self.pending.take();

        let scanned = if self.buf.as_bytes()[start] == b'<' {
            self.scan_markup(start, pending)?
        } else {
            self.scan_text(start, pending)
        };

        match scanned {
            Scan::Found(ty, end) => {
                match &ty {
                    RawTy::TagOpen {
                        name,
                        self_closing: false,
                        ..
                    } => self.stack.push(&self.buf[name.clone()]),
                    RawTy::TagClose(name) => self
                        .stack
                        .close(&self.buf[name.clone()])
                        .map_err(|kind| self.error(kind, start))?,
                    _ => {}
                }

                self.pos = end;
                let token = RawToken {
                    span: start..end,
                    ty,
                };
                trace!(target: "chunked_xml::scanner", "emit token: {:?}", self.token(&token));
                Ok(Some(token))
            }
            Scan::Incomplete(kind, resume) => {
                let len = self.buf.len() - start;
                if let Some(limit) = self.max_pending_len {
                    if len > limit {
                        return Err(self.error(ErrorKind::PendingLimitExceeded { limit }, start));
                    }
                }
                trace!(target: "chunked_xml::scanner", "park {kind:?} with {len} bytes");
                self.pending = Some(Pending { kind, resume });
                Ok(None)
            }
        }
    }

    fn finish(&mut self) -> Result<Option<RawToken>, TokenizeError> {
        let start = self.pos;
        let end = self.buf.len();

        if let Some(pending) = self.pending.take() {
            return match pending.kind.construct() {
                None => {
                    self.pos = end;
                    let token = RawToken {
                        span: start..end,
                        ty: RawTy::Text(start..end),
                    };
                    trace!(target: "chunked_xml::scanner", "emit trailing text: {:?}", self.token(&token));
                    Ok(Some(token))
                }
                Some(construct) => Err(self.error(ErrorKind::Unclosed(construct), start)),
            };
        }

        debug_assert_eq!(start, end);
        self.stack.finish().map_err(|kind| self.error(kind, end))?;
        Ok(None)
    }

    fn scan_text(&self, start: usize, pending: Option<Pending>) -> Scan {
        let bytes = self.buf.as_bytes();
        let from = start + Pending::resume_for(pending, PendingKind::Text);

        match bytes::find_byte(bytes, from, b'<') {
            Some(lt) => Scan::Found(RawTy::Text(start..lt), lt),
            None => Scan::Incomplete(PendingKind::Text, bytes.len() - start),
        }
    }

    fn scan_markup(&self, start: usize, pending: Option<Pending>) -> Result<Scan, TokenizeError> {
        match self.buf.as_bytes().get(start + 1) {
            Some(b'!') => self.scan_declaration(start, pending),
            Some(b'?') => Ok(self.scan_processing_instruction(start, pending)),
            _ => self.scan_tag(start, pending),
        }
    }

    fn scan_declaration(
        &self,
        start: usize,
        pending: Option<Pending>,
    ) -> Result<Scan, TokenizeError> {
        let input = &self.buf.as_bytes()[start..];
        debug_assert!(input.starts_with(b"<!"));

        match input.get(2) {
            None => Ok(Scan::Incomplete(PendingKind::MarkupDeclaration, 0)),
            Some(b'-') => match input.get(3) {
                None => Ok(Scan::Incomplete(PendingKind::Comment, 0)),
                Some(b'-') => self.scan_comment(start, pending),
                Some(_) => Err(self.unrecognized_markup(start)),
            },
            Some(b'[') => {
                let len = input.len().min(CDATA_OPEN.len());
                if input[..len] != CDATA_OPEN[..len] {
                    Err(self.unrecognized_markup(start))
                } else if len < CDATA_OPEN.len() {
                    Ok(Scan::Incomplete(PendingKind::MarkupDeclaration, 0))
                } else {
                    Ok(self.scan_cdata(start, pending))
                }
            }
            Some(_) => Err(self.unrecognized_markup(start)),
        }
    }

    fn unrecognized_markup(&self, start: usize) -> TokenizeError {
        let after = start + 2;
        let end = self.buf[after..]
            .chars()
            .next()
            .map_or(after, |ch| after + ch.len_utf8());
        self.error(
            ErrorKind::UnrecognizedMarkup {
                prefix: String::from(&self.buf[start..end]),
            },
            start,
        )
    }

    fn scan_comment(&self, start: usize, pending: Option<Pending>) -> Result<Scan, TokenizeError> {
        let bytes = self.buf.as_bytes();
        let resume = Pending::resume_for(pending, PendingKind::Comment).max(COMMENT_OPEN_LEN);

        match bytes::find_seq(bytes, start + resume, COMMENT_DASHES) {
            Some(dashes) => match bytes.get(dashes + COMMENT_DASHES.len()) {
                Some(b'>') => Ok(Scan::Found(
                    RawTy::Comment(start + COMMENT_OPEN_LEN..dashes),
                    dashes + COMMENT_DASHES.len() + 1,
                )),
                None => Ok(Scan::Incomplete(PendingKind::Comment, dashes - start)),
                Some(_) => Err(self.error(ErrorKind::MalformedComment, start)),
            },
            None => Ok(Scan::Incomplete(
                PendingKind::Comment,
                bytes::resume_offset(bytes.len() - start, COMMENT_DASHES.len())
                    .max(COMMENT_OPEN_LEN),
            )),
        }
    }

    fn scan_cdata(&self, start: usize, pending: Option<Pending>) -> Scan {
        let bytes = self.buf.as_bytes();
        let resume = Pending::resume_for(pending, PendingKind::CData).max(CDATA_OPEN.len());

        match bytes::find_seq(bytes, start + resume, CDATA_CLOSE) {
            Some(close) => Scan::Found(
                RawTy::CData(start + CDATA_OPEN.len()..close),
                close + CDATA_CLOSE.len(),
            ),
            None => Scan::Incomplete(
                PendingKind::CData,
                bytes::resume_offset(bytes.len() - start, CDATA_CLOSE.len())
                    .max(CDATA_OPEN.len()),
            ),
        }
    }

    fn scan_processing_instruction(&self, start: usize, pending: Option<Pending>) -> Scan {
        let bytes = self.buf.as_bytes();
        let resume =
            Pending::resume_for(pending, PendingKind::ProcessingInstruction).max(PI_OPEN_LEN);

        match bytes::find_seq(bytes, start + resume, PI_CLOSE) {
            Some(close) => Scan::Found(
                RawTy::ProcessingInstruction(start + PI_OPEN_LEN..close),
                close + PI_CLOSE.len(),
            ),
            None => Scan::Incomplete(
                PendingKind::ProcessingInstruction,
                bytes::resume_offset(bytes.len() - start, PI_CLOSE.len()).max(PI_OPEN_LEN),
            ),
        }
    }

    fn scan_tag(&self, start: usize, pending: Option<Pending>) -> Result<Scan, TokenizeError> {
        // Skip the head '<'
        const OFFSET: usize = 1;

        let bytes = self.buf.as_bytes();
        let resume = Pending::resume_for(pending, PendingKind::Tag).max(OFFSET);

        let Some(gt) = bytes::find_byte(bytes, start + resume, b'>') else {
            return Ok(Scan::Incomplete(PendingKind::Tag, bytes.len() - start));
        };
        let end = gt + 1;
        let body = start + OFFSET;

        if bytes[body] == b'/' {
            return Ok(Scan::Found(RawTy::TagClose(body + 1..gt), end));
        }

        if bytes::is_space(bytes[body]) {
            return Err(self.error(ErrorKind::InvalidTagName, start));
        }

        let self_closing = gt > body && bytes[gt - 1] == b'/';
        let close = if self_closing { gt - 1 } else { gt };

        let ty = match bytes::find_space(bytes, body..close) {
            None => RawTy::TagOpen {
                name: body..close,
                attributes: close..close,
                self_closing,
            },
            Some(space) => RawTy::TagOpen {
                name: body..space,
                attributes: bytes::trim(bytes, space..close),
                self_closing,
            },
        };
        Ok(Scan::Found(ty, end))
    }
}
