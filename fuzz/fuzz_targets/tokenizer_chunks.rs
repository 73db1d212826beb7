#![no_main]

use libfuzzer_sys::fuzz_target;
use tagsoup::{Token, TokenList, Tokenizer, tokenize};

fn coalesce(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match (out.last_mut(), token) {
            (Some(Token::Text(prev)), Token::Text(bytes)) => prev.extend_from_slice(&bytes),
            (_, token) => out.push(token),
        }
    }
    out
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte picks a chunk size; the rest is tokenizer input.
    let size = usize::from(data[0]) % 16 + 1;
    let input = &data[1..];

    let mut tokenizer = Tokenizer::new(TokenList::new());
    for chunk in input.chunks(size) {
        tokenizer.feed(chunk);
    }
    tokenizer.finish();
    let chunked = coalesce(tokenizer.into_sink().into_tokens());
    let full = coalesce(tokenize(input));
    assert_eq!(full, chunked, "chunked stream diverged at size {size}");
});
