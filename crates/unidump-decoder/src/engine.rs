use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;

use crate::charset::Charset;
use crate::error::DumpError;
use crate::unit::DecodedUnit;

/// Incremental byte-to-code-point decoder.
///
/// Pulls one byte at a time from the reader, grows a pending buffer, and
/// tries to decode the buffer after every byte. A buffer that decodes is
/// emitted as code points; one that reaches the charset's maximum unit
/// length (or hits end of input) without decoding is emitted byte by byte
/// as [`DecodedUnit::InvalidByte`].
///
/// ```text
///   byte ──▶ pending ──▶ Charset::decode ──┬─ Some(text) ──▶ CodePoint × chars
///                ▲                          │
///                │                          ├─ None, len < max, more input ──┐
///                └──────────────────────────┼────────────────────────────────┘
///                                           └─ None, len == max or EOF ──▶ InvalidByte × len
/// ```
///
/// Unit offsets never decrease, and they strictly increase except in one
/// case: a byte sequence that decodes to several characters (Big5 `88 62`
/// is `Ê` plus a combining macron) yields one unit per character, all at
/// the sequence's first byte.
///
/// Bytes are read through [`Read::bytes`], so wrap unbuffered sources in a
/// [`std::io::BufReader`].
///
/// # Example
///
/// ```rust
/// use unidump_decoder::{Charset, DecodedUnit, UnitDecoder};
///
/// let units: Vec<_> = UnitDecoder::new(&b"A\xFF"[..], Charset::UTF_8)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(units[0], DecodedUnit::CodePoint { offset: 0, ch: 'A' });
/// assert_eq!(units[1], DecodedUnit::InvalidByte { offset: 1, byte: 0xFF });
/// ```
pub struct UnitDecoder<R> {
    bytes: io::Bytes<R>,
    charset: Charset,
    max_unit_len: usize,
    pending: Vec<u8>,
    /// Bytes pulled from the reader so far.
    consumed: u64,
    ready: VecDeque<DecodedUnit>,
    cancel: Option<Arc<AtomicBool>>,
    done: bool,
}

impl<R: Read> UnitDecoder<R> {
    #[must_use]
    pub fn new(reader: R, charset: Charset) -> Self {
        let max_unit_len = charset.max_unit_len();
        Self {
            bytes: reader.bytes(),
            charset,
            max_unit_len,
            pending: Vec::with_capacity(max_unit_len),
            consumed: 0,
            ready: VecDeque::new(),
            cancel: None,
            done: false,
        }
    }

    /// Stop with [`DumpError::Interrupted`] once `flag` is set. The flag is
    /// checked before every byte read.
    #[must_use]
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Number of bytes read from the input so far.
    #[must_use]
    pub fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Offset of the first pending byte.
    fn pending_start(&self) -> u64 {
        self.consumed - self.pending.len() as u64
    }

    fn push_byte(&mut self, byte: u8) {
        self.pending.push(byte);
        self.consumed += 1;

        match self.charset.decode(&self.pending) {
            Some(text) => {
                let offset = self.pending_start();
                self.ready
                    .extend(text.chars().map(|ch| DecodedUnit::CodePoint { offset, ch }));
                self.pending.clear();
            }
            None if self.pending.len() >= self.max_unit_len => self.flush_invalid(),
            None => {}
        }
    }

    /// Report every pending byte as invalid, in input order.
    fn flush_invalid(&mut self) {
        let start = self.pending_start();
        trace!(
            offset = start,
            len = self.pending.len(),
            charset = self.charset.name(),
            "undecodable byte sequence"
        );
        for (i, &byte) in self.pending.iter().enumerate() {
            self.ready.push_back(DecodedUnit::InvalidByte {
                offset: start + i as u64,
                byte,
            });
        }
        self.pending.clear();
    }
}

impl<R: Read> Iterator for UnitDecoder<R> {
    type Item = Result<DecodedUnit, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(unit) = self.ready.pop_front() {
                return Some(Ok(unit));
            }
            if self.done {
                return None;
            }
            if self.is_cancelled() {
                self.done = true;
                return Some(Err(DumpError::Interrupted {
                    offset: self.consumed,
                }));
            }

            match self.bytes.next() {
                Some(Ok(byte)) => self.push_byte(byte),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(DumpError::Io(e)));
                }
                None => {
                    self.done = true;
                    if !self.pending.is_empty() {
                        self.flush_invalid();
                    }
                }
            }
        }
    }
}
