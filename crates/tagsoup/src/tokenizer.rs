//! Resumable tag-soup tokenizer.
//!
//! `feed` merges each chunk with the residue of previous calls, emits every
//! token whose byte extent is final, and retains the unconsumed tail. No
//! cursor survives between calls: the residue is rescanned from its start
//! when more input arrives, so resumption can never lose or duplicate bytes.
//!
//! Incompleteness rules:
//! - A construct that may still be completed by future input (`<a hr`,
//!   `<!--x--`, a text run with no closing context) is retained verbatim.
//! - A construct that can never be valid is re-textualized starting exactly
//!   at its `<`; scanning resumes at the next byte, so markup later in the
//!   failed span is still recognized.
//! - `finish` flushes the residue as one literal `Text` token, with no
//!   grammar check. This is the only place truncated input surfaces.

use crate::buffer::ByteBuf;
use crate::decl::{self, Markup};
use crate::tag;
use crate::token::TokenSink;
use crate::{ScanResult, ascii_lower_name, is_name_byte};
use memchr::memchr;

/// Instrumentation counters, cheap enough to keep unconditionally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerStats {
    pub feeds: u64,
    pub tokens_emitted: u64,
    pub flushes: u64,
}

/// Streaming tokenizer bound to a caller-supplied [`TokenSink`].
pub struct Tokenizer<S> {
    sink: S,
    residue: ByteBuf,
    stats: TokenizerStats,
}

impl<S: TokenSink> Tokenizer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            residue: ByteBuf::new(),
            stats: TokenizerStats::default(),
        }
    }

    /// Consume one chunk, emitting tokens to the sink.
    ///
    /// Empty chunks are ignored. Feeding a full input in one call yields the
    /// same tokens as feeding it split at arbitrary byte boundaries.
    pub fn feed(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        self.stats.feeds = self.stats.feeds.saturating_add(1);

        if self.residue.is_empty() {
            // Common case: scan the chunk directly and copy only the tail.
            let consumed = scan(chunk, &mut self.sink, &mut self.stats);
            if consumed < chunk.len() {
                self.residue.append(&chunk[consumed..]);
            }
        } else {
            self.residue.append(chunk);
            let consumed = scan(self.residue.as_slice(), &mut self.sink, &mut self.stats);
            if consumed == self.residue.len() {
                self.residue.clear();
            } else {
                self.residue.drop_prefix(consumed);
            }
        }

        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "tagsoup.tokenizer",
            "feed: chunk={} residue={}",
            chunk.len(),
            self.residue.len()
        );
    }

    /// End marker: flush a non-empty residue as one verbatim `Text` token,
    /// then clear it. No-op when the residue is empty. The tokenizer can be
    /// fed again afterwards; that starts a fresh stream.
    pub fn finish(&mut self) {
        if self.residue.is_empty() {
            return;
        }
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(target: "tagsoup.tokenizer", "finish: flushing {} byte(s)", self.residue.len());

        let tail = std::mem::take(&mut self.residue);
        self.sink.text(tail.as_slice());
        self.stats.flushes = self.stats.flushes.saturating_add(1);
        self.stats.tokens_emitted = self.stats.tokens_emitted.saturating_add(1);
    }

    /// Bytes carried over awaiting more input.
    pub fn residue_len(&self) -> usize {
        self.residue.len()
    }

    pub fn stats(&self) -> TokenizerStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Tokenize a complete input: feed it once, finish, and collect.
pub fn tokenize(input: &[u8]) -> Vec<crate::Token> {
    let mut tokenizer = Tokenizer::new(crate::TokenList::new());
    tokenizer.feed(input);
    tokenizer.finish();
    tokenizer.into_sink().into_tokens()
}

/// Scan `buf`, emitting every token whose extent is final, and return the
/// number of bytes consumed; the caller keeps `buf[consumed..]` as residue.
fn scan<S: TokenSink>(buf: &[u8], sink: &mut S, stats: &mut TokenizerStats) -> usize {
    let end = buf.len();
    let mut emitted = 0u64;
    // `t` is the start of the pending, not-yet-emitted span; `s` scans ahead.
    let mut t = 0usize;
    let mut s = 0usize;

    loop {
        match memchr(b'<', &buf[s..]) {
            Some(rel) => s += rel,
            None => {
                // Tail with no `<`: the run may continue in the next chunk,
                // so emit only the prefix no future byte can extend.
                if t < end {
                    let safe = text_backoff(buf, t, end);
                    if safe > t {
                        sink.text(&buf[t..safe]);
                        emitted += 1;
                        t = safe;
                    }
                }
                break;
            }
        }
        if s > t {
            sink.text(&buf[t..s]);
            emitted += 1;
            t = s;
        }
        // A construct needs at least `<X>`.
        if end - s < 3 {
            break;
        }

        match buf[s + 1] {
            byte if byte.is_ascii_alphabetic() => match tag::scan_start_tag(buf, s) {
                ScanResult::Parsed((name, attributes), next) => {
                    sink.start_tag(&name, &attributes);
                    emitted += 1;
                    s = next;
                    t = s;
                }
                ScanResult::Incomplete => break,
                ScanResult::Invalid => s += 1,
            },
            b'/' if buf[s + 2].is_ascii_alphabetic() => match scan_end_tag(buf, s) {
                ScanResult::Parsed(name, next) => {
                    sink.end_tag(&name);
                    emitted += 1;
                    s = next;
                    t = s;
                }
                ScanResult::Incomplete => break,
                ScanResult::Invalid => s += 1,
            },
            b'!' => match decl::scan_markup_decl(buf, s) {
                ScanResult::Parsed(Markup::Declaration(parts), next) => {
                    sink.declaration(&parts);
                    emitted += 1;
                    s = next;
                    t = s;
                }
                ScanResult::Parsed(Markup::Comment(body), next) => {
                    sink.comment(&body);
                    emitted += 1;
                    s = next;
                    t = s;
                }
                ScanResult::Incomplete => break,
                ScanResult::Invalid => s += 1,
            },
            b'?' => match memchr(b'>', &buf[s + 2..]) {
                Some(rel) => {
                    let gt = s + 2 + rel;
                    sink.processing_instruction(&buf[s + 2..gt]);
                    emitted += 1;
                    s = gt + 1;
                    t = s;
                }
                None => break,
            },
            // Not a recognized construct: the `<` stays literal and joins
            // the running text; scanning resumes at the next byte.
            _ => s += 1,
        }
    }

    stats.tokens_emitted = stats.tokens_emitted.saturating_add(emitted);
    t
}

/// Inline end-tag scan: `</name >` with the name alphabet, optional
/// whitespace, then a required `>`.
fn scan_end_tag(buf: &[u8], at: usize) -> ScanResult<String> {
    let end = buf.len();
    debug_assert!(&buf[at..at + 2] == b"</" && buf[at + 2].is_ascii_alphabetic());

    let name_start = at + 2;
    let mut s = name_start + 1;
    while s < end && is_name_byte(buf[s]) {
        s += 1;
    }
    let name_end = s;
    while s < end && buf[s].is_ascii_whitespace() {
        s += 1;
    }
    if s == end {
        return ScanResult::Incomplete;
    }
    if buf[s] != b'>' {
        return ScanResult::Invalid;
    }
    ScanResult::Parsed(ascii_lower_name(&buf[name_start..name_end]), s + 1)
}

/// Split point for a text run that reaches the end of the buffer: bytes
/// before the returned position are safe to emit now; the rest may be the
/// prefix of a word or entity the next chunk continues.
///
/// Trailing whitespace is held back as-is; a trailing word is held back
/// together with the whitespace run before it. The safe prefix may be empty.
fn text_backoff(buf: &[u8], t: usize, end: usize) -> usize {
    debug_assert!(t < end);
    let mut s = end;
    if buf[s - 1].is_ascii_whitespace() {
        while s > t && buf[s - 1].is_ascii_whitespace() {
            s -= 1;
        }
    } else {
        while s > t && !buf[s - 1].is_ascii_whitespace() {
            s -= 1;
        }
        while s > t && buf[s - 1].is_ascii_whitespace() {
            s -= 1;
        }
    }
    s
}
