use pretty_assertions::assert_eq;
use xfmeta::prelude::*;

fn header() -> Vec<u8> {
    let mut bytes = b"MThd".to_vec();
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x01, 0x00, 0x60]);
    bytes
}

#[test]
fn empty_input_is_not_a_midi_file() {
    assert_eq!(decode(&[]), Err(DecodeError::NotMidiFile));
}

#[test]
fn wrong_signature_is_not_a_midi_file() {
    assert_eq!(decode(b"RIFF\x00\x00\x00\x00"), Err(DecodeError::NotMidiFile));
    assert_eq!(decode(b"MThX\x00\x00\x00\x06"), Err(DecodeError::NotMidiFile));
    // shorter than the signature itself
    assert_eq!(decode(b"MTh"), Err(DecodeError::NotMidiFile));
}

#[test]
fn header_shorter_than_fourteen_bytes_yields_no_tracks() {
    let meta = decode(b"MThd\x00\x00\x00\x06").unwrap();
    assert!(meta.tracks().is_empty());
}

#[test]
fn chunk_length_field_cut_short() {
    let mut bytes = header();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&[0x00, 0x00]);

    let err = decode(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::TruncatedData(18));
    assert!(err.is_truncated());
}

#[test]
fn meta_payload_running_past_the_buffer() {
    let mut bytes = header();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&16u32.to_be_bytes());
    // claims 12 payload bytes, provides 2
    bytes.extend_from_slice(&[0x00, 0xFF, 0x03, 0x0C, b'h', b'i']);

    assert_eq!(decode(&bytes), Err(DecodeError::TruncatedData(26)));
}

#[test]
fn delta_time_vlq_running_past_the_buffer() {
    let mut bytes = header();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&4u32.to_be_bytes());
    // continuation bit set on the last byte of the file
    bytes.extend_from_slice(&[0x81, 0x80]);

    assert_eq!(decode(&bytes), Err(DecodeError::TruncatedData(24)));
}

#[test]
fn declared_chunk_length_overrunning_the_file() {
    let mut bytes = header();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&64u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x90, 0x3C, 0x40]);

    // the walker runs off the real bytes before reaching the declared end
    assert_eq!(decode(&bytes), Err(DecodeError::TruncatedData(26)));
}

#[test]
fn error_messages_are_displayable() {
    assert_eq!(
        DecodeError::NotMidiFile.to_string(),
        "not a standard MIDI file: no MThd signature"
    );
    assert_eq!(
        DecodeError::TruncatedData(42).to_string(),
        "truncated MIDI data: read past end of file at byte 42"
    );
}
