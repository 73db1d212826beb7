//! Token snapshot formatting for golden tests and parity diffs.

use tagsoup::{AttrValue, Token};

/// One line per token:
///
/// - `Text(...)`, `Comment(...)`, `Pi(...)` with escaped payloads
/// - `StartTag(name attr="quoted" attr=bare flag)`: a flag attribute has
///   no `=`, a bare-empty one renders `attr=`
/// - `EndTag(name)`
/// - `Declaration(tok1, tok2, ...)`
pub fn token_snapshot(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| match token {
            Token::Text(bytes) => format!("Text({})", escape_bytes(bytes)),
            Token::StartTag { name, attributes } => {
                let mut line = format!("StartTag({name}");
                for attr in attributes {
                    line.push(' ');
                    line.push_str(&attr.name);
                    match &attr.value {
                        AttrValue::Quoted(value) => {
                            line.push_str("=\"");
                            line.push_str(&escape_bytes(value));
                            line.push('"');
                        }
                        AttrValue::Bare(value) => {
                            line.push('=');
                            line.push_str(&escape_bytes(value));
                        }
                        AttrValue::Flag => {}
                    }
                }
                line.push(')');
                line
            }
            Token::EndTag { name } => format!("EndTag({name})"),
            Token::Declaration(parts) => {
                let parts: Vec<String> = parts.iter().map(|part| escape_bytes(part)).collect();
                format!("Declaration({})", parts.join(", "))
            }
            Token::Comment(bytes) => format!("Comment({})", escape_bytes(bytes)),
            Token::ProcessingInstruction(bytes) => format!("Pi({})", escape_bytes(bytes)),
        })
        .collect()
}

/// Merge adjacent `Text` tokens.
///
/// Chunking may split a text run where a single-buffer scan would not; the
/// concatenation is the invariant, so parity comparisons normalize first.
pub fn coalesce_text(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match (out.last_mut(), token) {
            (Some(Token::Text(prev)), Token::Text(bytes)) => prev.extend_from_slice(&bytes),
            (_, token) => out.push(token),
        }
    }
    out
}

pub fn escape_bytes(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let text = String::from_utf8_lossy(bytes);
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out
}
