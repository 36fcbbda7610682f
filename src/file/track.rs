#![doc = r#"
Walking the event stream of one chunk.

The walker only needs to interpret events well enough to keep the
cursor aligned: delta-times and length fields are decoded, channel
events are skipped by their known data-byte counts, and running status
is honored so a stream with omitted status bytes stays in sync. Only
meta events with a textual payload produce records.
"#]

use crate::{
    file::meta::{END_OF_TRACK, META_EVENT, MetaEvent, TextKind, TextMetaType, XfMeta},
    reader::{DecodeResult, Reader},
};
use encoding_rs::SHIFT_JIS;

#[doc = r#"
All metadata extracted from one chunk.

A chunk that yielded nothing still gets a `TrackMeta` entry, so track
numbering stays stable; filter with [`TrackMeta::is_empty`] at render
time.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackMeta {
    track: u32,
    events: Vec<MetaEvent>,
}

impl TrackMeta {
    #[cfg(test)]
    pub(crate) fn new(track: u32, events: Vec<MetaEvent>) -> Self {
        Self { track, events }
    }

    /// 1-based index of the chunk this metadata came from, in
    /// discovery order. The header chunk is not counted.
    pub const fn track(&self) -> u32 {
        self.track
    }

    /// Extracted records, in byte-stream order.
    pub fn events(&self) -> &[MetaEvent] {
        &self.events
    }

    /// True when the chunk yielded no metadata.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Walk one chunk body, collecting textual meta events.
///
/// The reader enters positioned at the body start; `body_end` bounds
/// the walk but reads themselves are checked against the buffer, so a
/// declared length overrunning the file surfaces as
/// [`TruncatedData`](crate::reader::DecodeError::TruncatedData) only
/// when the cursor actually runs off the bytes.
pub(crate) fn read_track_meta(
    reader: &mut Reader<'_>,
    body_end: usize,
    track: u32,
) -> DecodeResult<TrackMeta> {
    let first_track = track == 1;
    let mut events = Vec::new();
    let mut running_status = 0u8;

    while reader.buffer_position() < body_end {
        // delta-time; only the cursor advance matters here
        reader.read_vlq()?;

        let status = match reader.peek_u8()? {
            byte if byte & 0x80 != 0 => {
                reader.skip(1)?;
                running_status = byte;
                byte
            }
            // high bit clear: first data byte of a running-status
            // event, leave it for the dispatch below
            _ => running_status,
        };

        match status {
            META_EVENT => {
                let meta_type = reader.read_u8()?;
                let length = reader.read_vlq()? as usize;
                if meta_type == END_OF_TRACK && length == 0 {
                    // remaining bytes before body_end are not scanned
                    break;
                }
                let payload = reader.read_bytes(length)?;
                if let Ok(ty) = TextMetaType::try_from(meta_type) {
                    extract_text(ty, payload, first_track, &mut events);
                }
            }
            0x80..=0xEF => {
                // program change and channel pressure carry one data
                // byte, every other channel event carries two
                let data_len = match status & 0xF0 {
                    0xC0 | 0xD0 => 1,
                    _ => 2,
                };
                reader.skip(data_len)?;
            }
            0xF0 | 0xF7 => {
                let length = reader.read_vlq()? as usize;
                reader.skip(length)?;
            }
            _ => {
                // unrecognized or corrupt status: resynchronize one
                // byte at a time
                reader.skip(1)?;
            }
        }
    }

    Ok(TrackMeta { track, events })
}

/// Decode a text payload and append the resulting record, if any.
fn extract_text(ty: TextMetaType, payload: &[u8], first_track: bool, events: &mut Vec<MetaEvent>) {
    let (text, _, malformed) = SHIFT_JIS.decode(payload);
    #[cfg(feature = "tracing")]
    if malformed {
        tracing::warn!("text payload is not well-formed Shift-JIS, using replacement characters");
    }
    #[cfg(not(feature = "tracing"))]
    let _ = malformed;

    if XfMeta::matches(&text) {
        // consecutive XF payloads fold into one record per chunk
        if !matches!(events.last(), Some(MetaEvent::Xf(_))) {
            events.push(MetaEvent::Xf(XfMeta::default()));
        }
        if let Some(MetaEvent::Xf(xf)) = events.last_mut() {
            xf.absorb(&text);
        }
    } else if !text.is_empty() {
        events.push(MetaEvent::Text {
            kind: TextKind::from_meta_type(ty, first_track),
            text: text.into_owned(),
        });
    }
}

#[cfg(test)]
fn walk(body: &[u8], track: u32) -> TrackMeta {
    let mut reader = Reader::from_byte_slice(body);
    read_track_meta(&mut reader, body.len(), track).unwrap()
}

#[test]
fn running_status_decodes_like_explicit_status() {
    use pretty_assertions::assert_eq;
    // note-on, then a second note-on without its status byte
    let implicit: &[u8] = &[
        0x00, 0x90, 0x3C, 0x40, //
        0x00, 0x3E, 0x40, //
        0x00, 0xFF, 0x06, 0x04, b'D', b'r', b'o', b'p', //
    ];
    let explicit: &[u8] = &[
        0x00, 0x90, 0x3C, 0x40, //
        0x00, 0x90, 0x3E, 0x40, //
        0x00, 0xFF, 0x06, 0x04, b'D', b'r', b'o', b'p', //
    ];
    assert_eq!(walk(implicit, 1).events(), walk(explicit, 1).events());
    assert_eq!(
        walk(implicit, 1).events(),
        &[MetaEvent::Text {
            kind: TextKind::Marker,
            text: "Drop".to_owned(),
        }]
    );
}

#[test]
fn end_of_track_stops_the_walk() {
    // the marker after end-of-track must not be reached
    let body: &[u8] = &[
        0x00, 0xFF, 0x2F, 0x00, //
        0x00, 0xFF, 0x06, 0x02, b'h', b'i', //
    ];
    assert!(walk(body, 1).is_empty());
}

#[test]
fn unknown_meta_types_are_skipped() {
    use pretty_assertions::assert_eq;
    // tempo, then a marker
    let body: &[u8] = &[
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
        0x00, 0xFF, 0x06, 0x02, b'o', b'k', //
    ];
    assert_eq!(
        walk(body, 1).events(),
        &[MetaEvent::Text {
            kind: TextKind::Marker,
            text: "ok".to_owned(),
        }]
    );
}

#[test]
fn sysex_payload_is_skipped_by_declared_length() {
    use pretty_assertions::assert_eq;
    // the sysex payload contains 0xFF bytes that must not be read as
    // meta events
    let body: &[u8] = &[
        0x00, 0xF0, 0x04, 0xFF, 0x06, 0x01, 0xF7, //
        0x00, 0xFF, 0x06, 0x02, b'o', b'k', //
    ];
    assert_eq!(
        walk(body, 1).events(),
        &[MetaEvent::Text {
            kind: TextKind::Marker,
            text: "ok".to_owned(),
        }]
    );
}

#[test]
fn empty_text_payload_produces_no_record() {
    let body: &[u8] = &[0x00, 0xFF, 0x01, 0x00];
    assert!(walk(body, 1).is_empty());
}

#[test]
fn truncated_payload_is_fatal() {
    use crate::reader::DecodeError;
    let body: &[u8] = &[0x00, 0xFF, 0x01, 0x10, b'x'];
    let mut reader = Reader::from_byte_slice(body);
    assert_eq!(
        read_track_meta(&mut reader, body.len(), 1),
        Err(DecodeError::TruncatedData(4))
    );
}
