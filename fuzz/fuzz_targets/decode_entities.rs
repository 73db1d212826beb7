#![no_main]

use libfuzzer_sys::fuzz_target;
use tagsoup::{DecodedText, EntityTable, decode_entities};

fuzz_target!(|data: &[u8]| {
    let entities: EntityTable = [("amp", "&"), ("lt", "<"), ("gt", ">"), ("nbsp", "\u{A0}")]
        .into_iter()
        .collect();

    let mut single = DecodedText::single_byte(data.to_vec());
    decode_entities(&mut single, &entities);

    let mut utf8 = DecodedText::utf8(String::from_utf8_lossy(data).into_owned());
    decode_entities(&mut utf8, &entities);
    // UTF-8 mode must stay UTF-8.
    std::str::from_utf8(utf8.as_bytes()).expect("utf-8 mode output must remain valid");
});
