#![doc = r#"
Locating track-like chunks inside a file.

A chunk is a 4-byte ASCII tag, a big-endian `u32` body length, and the
body itself. The header chunk `MThd` has a fixed total size of 14
bytes; after it, this scanner looks for `MTrk` (standard track) and
`XFIH` (XF information header) chunks.

The scan resynchronizes one byte at a time instead of trusting declared
chunk lengths to jump between tags, so stray or malformed bytes between
chunks do not derail discovery. The cost is that a 4-byte run inside an
unrecognized chunk's body that happens to spell a known tag is taken
for a chunk start.
"#]

use crate::reader::{DecodeResult, Reader};

/// The header chunk tag. Must open the file.
pub(crate) const HEADER_TAG: &[u8; 4] = b"MThd";

/// Total size of the header chunk: tag, length, format, track count,
/// division.
pub(crate) const HEADER_LEN: usize = 14;

const TRACK_TAG: &[u8; 4] = b"MTrk";
const XF_INFO_TAG: &[u8; 4] = b"XFIH";

/// The body range of a located chunk.
///
/// `end` is taken from the declared length and may point past the end
/// of the buffer; the event walker's bounds-checked reads decide
/// whether that matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkBody {
    pub start: usize,
    pub end: usize,
}

/// Scan forward for the next `MTrk` or `XFIH` chunk.
///
/// Leaves the reader positioned at the body start. Returns `Ok(None)`
/// when the rest of the buffer holds no recognizable tag.
pub(crate) fn next_chunk(reader: &mut Reader<'_>) -> DecodeResult<Option<ChunkBody>> {
    loop {
        let Some(tag) = reader.peek_tag() else {
            return Ok(None);
        };
        if tag == *TRACK_TAG || tag == *XF_INFO_TAG {
            reader.skip(4)?;
            let length = reader.read_u32_be()? as usize;
            let start = reader.buffer_position();
            return Ok(Some(ChunkBody {
                start,
                end: start.saturating_add(length),
            }));
        }
        reader.skip(1)?;
    }
}

#[cfg(test)]
use crate::reader::DecodeError;

#[test]
fn finds_track_chunk_after_stray_bytes() {
    use pretty_assertions::assert_eq;
    let mut bytes = vec![0xDE, 0xAD, 0xBE];
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&8u32.to_be_bytes());
    bytes.extend_from_slice(&[0; 8]);

    let mut reader = Reader::from_byte_slice(&bytes);
    let body = next_chunk(&mut reader).unwrap().unwrap();
    assert_eq!(body, ChunkBody { start: 11, end: 19 });
    assert_eq!(reader.buffer_position(), body.start);
}

#[test]
fn finds_xf_information_chunk() {
    use pretty_assertions::assert_eq;
    let mut bytes = b"XFIH".to_vec();
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.extend_from_slice(&[0, 0]);

    let mut reader = Reader::from_byte_slice(&bytes);
    let body = next_chunk(&mut reader).unwrap().unwrap();
    assert_eq!(body, ChunkBody { start: 8, end: 10 });
}

#[test]
fn no_tag_ends_the_scan() {
    let bytes = [0u8; 32];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(next_chunk(&mut reader).unwrap(), None);
}

#[test]
fn tag_with_truncated_length_field_errors() {
    let mut bytes = b"MTrk".to_vec();
    bytes.extend_from_slice(&[0x00, 0x00]);

    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(
        next_chunk(&mut reader),
        Err(DecodeError::TruncatedData(4))
    );
}

#[test]
fn declared_length_may_overrun_the_buffer() {
    use pretty_assertions::assert_eq;
    let mut bytes = b"MTrk".to_vec();
    bytes.extend_from_slice(&100u32.to_be_bytes());

    let mut reader = Reader::from_byte_slice(&bytes);
    let body = next_chunk(&mut reader).unwrap().unwrap();
    assert_eq!(body, ChunkBody { start: 8, end: 108 });
}
