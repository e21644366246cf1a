use super::*;

#[test]
fn ascii_chunks_decode_directly() {
    let mut decoder = Utf8ChunkDecoder::new();
    assert_eq!(decoder.decode(b"hel"), "hel");
    assert_eq!(decoder.decode(b"lo"), "lo");
    assert_eq!(decoder.finish(), "");
}

#[test]
fn split_multibyte_character_is_held_until_complete() {
    let bytes = "é!".as_bytes();
    let mut decoder = Utf8ChunkDecoder::new();
    assert_eq!(decoder.decode(&bytes[..1]), "");
    assert_eq!(decoder.decode(&bytes[1..]), "é!");
}

#[test]
fn four_byte_character_split_across_three_chunks() {
    let bytes = "a🦀b".as_bytes();
    let mut decoder = Utf8ChunkDecoder::new();
    let mut out = String::new();
    out.push_str(&decoder.decode(&bytes[..2]));
    out.push_str(&decoder.decode(&bytes[2..4]));
    out.push_str(&decoder.decode(&bytes[4..]));
    out.push_str(&decoder.finish());
    assert_eq!(out, "a🦀b");
}

#[test]
fn invalid_byte_becomes_replacement_and_decoding_continues() {
    let mut decoder = Utf8ChunkDecoder::new();
    assert_eq!(decoder.decode(b"a\xffb"), "a\u{FFFD}b");
}

#[test]
fn truncated_tail_is_flushed_as_replacement() {
    let bytes = "é".as_bytes();
    let mut decoder = Utf8ChunkDecoder::new();
    assert_eq!(decoder.decode(&bytes[..1]), "");
    assert_eq!(decoder.finish(), "\u{FFFD}");
    assert_eq!(decoder.finish(), "");
}
