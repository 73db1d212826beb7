//! `<!...>` markup declarations and comments.

use crate::{ScanResult, is_name_byte};
use memchr::memchr;

/// Outcome of a `<!` construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Markup {
    /// Declaration tokens in encounter order (name first).
    Declaration(Vec<Vec<u8>>),
    /// Comment body, delimiters excluded.
    Comment(Vec<u8>),
}

/// Scan a `<!...>` construct beginning at `at` (`buf[at..at + 2] == b"<!"`
/// and at least one more byte present, checked by the dispatcher).
pub(crate) fn scan_markup_decl(buf: &[u8], at: usize) -> ScanResult<Markup> {
    let end = buf.len();
    debug_assert!(&buf[at..at + 2] == b"<!" && at + 2 < end);

    let body = at + 2;
    match buf[body] {
        byte if byte.is_ascii_alphabetic() => scan_declaration(buf, body),
        b'-' => {
            if body + 1 == end {
                // "<!-" may still become "<!--"
                return ScanResult::Incomplete;
            }
            if buf[body + 1] == b'-' {
                scan_comment(buf, body + 2)
            } else {
                ScanResult::Invalid
            }
        }
        _ => ScanResult::Invalid,
    }
}

fn scan_declaration(buf: &[u8], name_start: usize) -> ScanResult<Markup> {
    let end = buf.len();
    let mut s = name_start + 1;
    while s < end && is_name_byte(buf[s]) {
        s += 1;
    }
    if s == end {
        return ScanResult::Incomplete;
    }
    let mut parts = vec![buf[name_start..s].to_vec()];

    loop {
        while s < end && buf[s].is_ascii_whitespace() {
            s += 1;
        }
        if s == end {
            return ScanResult::Incomplete;
        }
        match buf[s] {
            b'>' => return ScanResult::Parsed(Markup::Declaration(parts), s + 1),
            quote @ (b'"' | b'\'') => {
                let value_start = s + 1;
                match memchr(quote, &buf[value_start..]) {
                    Some(rel) => {
                        parts.push(buf[value_start..value_start + rel].to_vec());
                        s = value_start + rel + 1;
                    }
                    None => return ScanResult::Incomplete,
                }
            }
            b'-' if s + 1 == end => return ScanResult::Incomplete,
            b'-' if buf[s + 1] == b'-' => {
                // inline comment token `--...--` (DOCTYPE internal subsets)
                let content_start = s + 2;
                let mut i = content_start;
                loop {
                    let dash = match memchr(b'-', &buf[i..]) {
                        Some(rel) => i + rel,
                        None => return ScanResult::Incomplete,
                    };
                    if dash + 1 == end {
                        return ScanResult::Incomplete;
                    }
                    if buf[dash + 1] == b'-' {
                        parts.push(buf[content_start..dash].to_vec());
                        s = dash + 2;
                        break;
                    }
                    i = dash + 1;
                }
            }
            _ => {
                let word_start = s;
                while s < end && !buf[s].is_ascii_whitespace() && buf[s] != b'>' {
                    s += 1;
                }
                if s == end {
                    return ScanResult::Incomplete;
                }
                parts.push(buf[word_start..s].to_vec());
            }
        }
    }
}

/// Scan a comment body starting just past `<!--`. The terminator is `--`
/// followed by optional whitespace and `>`; a `--` that is not part of a
/// terminator is ordinary content, and scanning resumes one byte past its
/// first dash so overlapping dash runs are handled.
fn scan_comment(buf: &[u8], content_start: usize) -> ScanResult<Markup> {
    let end = buf.len();
    let mut i = content_start;
    loop {
        let dash = match memchr(b'-', &buf[i..]) {
            Some(rel) => i + rel,
            None => return ScanResult::Incomplete,
        };
        if dash + 1 == end {
            return ScanResult::Incomplete;
        }
        if buf[dash + 1] != b'-' {
            i = dash + 1;
            continue;
        }
        let mut after = dash + 2;
        while after < end && buf[after].is_ascii_whitespace() {
            after += 1;
        }
        if after == end {
            // still undecided: trailing whitespace may end with `>`
            return ScanResult::Incomplete;
        }
        if buf[after] == b'>' {
            return ScanResult::Parsed(Markup::Comment(buf[content_start..dash].to_vec()), after + 1);
        }
        i = dash + 1;
    }
}
