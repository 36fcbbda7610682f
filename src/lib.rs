#![doc = r#"
Extract embedded textual metadata from Standard MIDI Files.

Karaoke and sequencer `.mid` files routinely carry song information in
meta-event text payloads: sequence and track names, copyright notices,
lyrics, markers. Files authored for Yamaha's XF extension additionally
embed structured song data (title, composer, language-specific fields)
as colon-delimited text payloads. This crate walks the raw bytes of a
file, skips everything that makes sound, and returns just that metadata.

Meta text in this ecosystem is Shift-JIS far more often than it is
ASCII or UTF-8, so all payloads are decoded as Shift-JIS.

# Example

```rust
use xfmeta::prelude::*;

let bytes = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd
    0x00, 0x01, 0x00, 0x01, 0x00, 0x60,
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0B, // MTrk, 11 bytes
    0x00, 0xFF, 0x03, 0x03, 0x41, 0x42, 0x43,       // name "ABC"
    0x00, 0xFF, 0x2F, 0x00,                         // end of track
];

let meta = decode(&bytes).unwrap();
assert_eq!(meta.tracks().len(), 1);
assert_eq!(
    meta.tracks()[0].events(),
    &[MetaEvent::Text {
        kind: TextKind::SequenceName,
        text: "ABC".to_owned(),
    }]
);
assert_eq!(meta.song_name(), Some("ABC"));
```

Decoding is a pure function over the borrowed buffer: no I/O, no shared
state. Buffers for different files can be decoded concurrently without
coordination. Reading bytes from disk and rendering the result are left
to the caller.
"#]

pub mod reader;

mod file;
pub use file::*;

use crate::reader::DecodeResult;

#[doc = r#"
Re-exports everything needed to decode a file and inspect the result.
"#]
pub mod prelude {
    pub use crate::{
        MetaEvent, MidiMeta, TextKind, TrackMeta, XfField, XfMeta, decode,
        reader::{DecodeError, DecodeResult, Reader},
    };
}

/// Decode all textual metadata from a fully-buffered SMF byte sequence.
///
/// Convenience for [`MidiMeta::decode`].
pub fn decode(bytes: &[u8]) -> DecodeResult<MidiMeta> {
    MidiMeta::decode(bytes)
}
