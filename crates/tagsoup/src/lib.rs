//! Incremental, tolerant HTML tokenizer with an in-place entity decoder.
//!
//! The tokenizer is fed arbitrary byte fragments (network reads, file
//! chunks) and reconstructs the same token sequence no matter where the
//! fragment boundaries fall. Bytes that cannot be classified yet are carried
//! across calls in a residue buffer; [`Tokenizer::finish`] flushes whatever
//! is left as literal text.
//!
//! Invariants:
//! - Chunk-equivalence: a construct is only emitted once its byte extent can
//!   no longer change with more input; the token stream for a fixed input is
//!   stable across fragmentations (text runs may split at chunk boundaries,
//!   but their concatenation and every markup token are identical).
//! - Graceful degradation: malformed markup is never an error. A construct
//!   that cannot be a tag is re-textualized starting at its `<` and the
//!   bytes re-scan as plain text.
//!
//! Entity decoding ([`decode_entities`]) is a separate single-pass in-place
//! rewrite the caller applies to `Text` payloads when it wants references
//! resolved; the tokenizer never invokes it.

mod buffer;
mod decl;
mod entities;
mod tag;
mod token;
mod tokenizer;

#[cfg(test)]
mod chunk_parity;

pub use crate::buffer::ByteBuf;
pub use crate::entities::{
    Charset, DecodedText, EntityTable, decode_entities, decode_entities_to_string,
};
pub use crate::token::{AttrValue, Attribute, Token, TokenList, TokenSink};
pub use crate::tokenizer::{Tokenizer, TokenizerStats, tokenize};

/// Three-way result of a sub-grammar scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScanResult<T> {
    /// Construct recognized; scanning resumes at the contained position.
    Parsed(T, usize),
    /// Buffer ended before the construct could be classified either way.
    Incomplete,
    /// Construct is structurally impossible; the `<` is demoted to text.
    Invalid,
}

/// Name alphabet: a name starts with an ASCII letter and continues with
/// letters, digits, `.`, `-`.
pub(crate) fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'-'
}

pub(crate) fn ascii_lower_name(bytes: &[u8]) -> String {
    debug_assert!(bytes.is_ascii(), "names are ASCII by construction");
    let mut name = String::with_capacity(bytes.len());
    for &byte in bytes {
        name.push(byte.to_ascii_lowercase() as char);
    }
    name
}
