//! Start-tag grammar: `<name attr=value ...>`.

use crate::token::{AttrValue, Attribute};
use crate::{ScanResult, ascii_lower_name, is_name_byte};
use memchr::memchr;

/// Scan a start tag beginning at `at` (`buf[at] == b'<'` and `buf[at + 1]`
/// is a letter, checked by the dispatcher).
///
/// Returns the lowercased tag name, the attributes in encounter order, and
/// the position just past the closing `>`. Nothing is emitted until the
/// whole tag is in the buffer: any truncation point yields `Incomplete` so
/// the caller can retain the bytes and retry with more input.
pub(crate) fn scan_start_tag(buf: &[u8], at: usize) -> ScanResult<(String, Vec<Attribute>)> {
    let end = buf.len();
    debug_assert!(buf[at] == b'<' && buf[at + 1].is_ascii_alphabetic());

    let name_start = at + 1;
    let mut s = name_start + 1;
    while s < end && is_name_byte(buf[s]) {
        s += 1;
    }
    if s == end {
        return ScanResult::Incomplete;
    }
    let name = ascii_lower_name(&buf[name_start..s]);

    let mut attributes = Vec::new();
    loop {
        while s < end && buf[s].is_ascii_whitespace() {
            s += 1;
        }
        if s == end {
            return ScanResult::Incomplete;
        }
        match buf[s] {
            b'>' => return ScanResult::Parsed((name, attributes), s + 1),
            byte if byte.is_ascii_alphabetic() => {}
            _ => return ScanResult::Invalid,
        }

        let attr_start = s;
        s += 1;
        while s < end && is_name_byte(buf[s]) {
            s += 1;
        }
        if s == end {
            return ScanResult::Incomplete;
        }
        let attr_name = ascii_lower_name(&buf[attr_start..s]);

        // `=` may be separated from the name by whitespace; without one the
        // attribute is a bare flag and the whitespace is just a separator.
        let mut ahead = s;
        while ahead < end && buf[ahead].is_ascii_whitespace() {
            ahead += 1;
        }
        if ahead == end {
            return ScanResult::Incomplete;
        }
        if buf[ahead] != b'=' {
            attributes.push(Attribute {
                name: attr_name,
                value: AttrValue::Flag,
            });
            continue;
        }
        s = ahead + 1;
        while s < end && buf[s].is_ascii_whitespace() {
            s += 1;
        }
        if s == end {
            return ScanResult::Incomplete;
        }

        let value = match buf[s] {
            quote @ (b'"' | b'\'') => {
                let value_start = s + 1;
                match memchr(quote, &buf[value_start..]) {
                    Some(rel) => {
                        s = value_start + rel + 1;
                        AttrValue::Quoted(buf[value_start..value_start + rel].to_vec())
                    }
                    None => return ScanResult::Incomplete,
                }
            }
            // degenerate `attr=>`: explicit empty value
            b'>' => AttrValue::Bare(Vec::new()),
            _ => {
                let value_start = s;
                while s < end && !buf[s].is_ascii_whitespace() && buf[s] != b'>' {
                    s += 1;
                }
                if s == end {
                    return ScanResult::Incomplete;
                }
                AttrValue::Bare(buf[value_start..s].to_vec())
            }
        };
        attributes.push(Attribute {
            name: attr_name,
            value,
        });
    }
}
