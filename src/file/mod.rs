#![doc = r#"
Rusty representation of the metadata embedded in one file, [`MidiMeta`]
"#]

mod chunk;

mod track;
pub use track::*;

mod meta;
pub use meta::*;

use crate::{
    file::chunk::{HEADER_LEN, HEADER_TAG},
    reader::{DecodeError, DecodeResult, Reader},
};

#[doc = r#"
All textual metadata extracted from one MIDI file.

Holds one [`TrackMeta`] per discovered chunk, in discovery order,
including chunks that yielded nothing — so the track numbers shown to
a user stay stable regardless of which tracks carry text.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MidiMeta {
    tracks: Vec<TrackMeta>,
}

impl MidiMeta {
    /// Decode all textual metadata from a fully-buffered SMF byte
    /// sequence.
    ///
    /// The buffer must open with the `MThd` signature; after the
    /// fixed-size header chunk, every `MTrk` and `XFIH` chunk found is
    /// walked for textual meta events. A file whose header checks out
    /// but that contains no recognizable chunk decodes to an empty
    /// result, not an error.
    ///
    /// # Errors
    /// [`DecodeError::NotMidiFile`] when the signature is missing,
    /// [`DecodeError::TruncatedData`] when any read runs past the end
    /// of the buffer. There are no partial results.
    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        if !bytes.starts_with(HEADER_TAG) {
            return Err(DecodeError::NotMidiFile);
        }

        let mut reader = Reader::from_byte_slice(bytes);
        reader.seek(HEADER_LEN);

        let mut tracks = Vec::new();
        while let Some(body) = chunk::next_chunk(&mut reader)? {
            let track = tracks.len() as u32 + 1;
            tracks.push(read_track_meta(&mut reader, body.end, track)?);
            reader.seek(body.end);
        }

        Ok(Self { tracks })
    }

    /// Per-chunk metadata in discovery order, empty chunks included.
    pub fn tracks(&self) -> &[TrackMeta] {
        &self.tracks
    }

    /// True when no chunk yielded any metadata.
    ///
    /// Lets a caller show a "no metadata found" state distinct from a
    /// decode failure.
    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(TrackMeta::is_empty)
    }

    /// Best-effort song title.
    ///
    /// Prefers an XF per-language title, then an XF song-wide title,
    /// then the first track's sequence name.
    pub fn song_name(&self) -> Option<&str> {
        let mut common_title = None;
        for event in self.tracks.iter().flat_map(|track| track.events()) {
            if let MetaEvent::Xf(xf) = event {
                if let Some(field) = xf.per_language.iter().find(|f| f.label == "Title") {
                    return Some(&field.text);
                }
                if common_title.is_none() {
                    common_title = xf
                        .common
                        .iter()
                        .find(|f| f.label == "Title")
                        .map(|f| f.text.as_str());
                }
            }
        }
        if common_title.is_some() {
            return common_title;
        }

        self.tracks.first().and_then(|track| {
            track.events().iter().find_map(|event| match event {
                MetaEvent::Text {
                    kind: TextKind::SequenceName,
                    text,
                } => Some(text.as_str()),
                _ => None,
            })
        })
    }
}

#[cfg(test)]
fn named_track(track: u32, names: &[(TextKind, &str)]) -> TrackMeta {
    let events = names
        .iter()
        .map(|(kind, text)| MetaEvent::Text {
            kind: *kind,
            text: (*text).to_owned(),
        })
        .collect::<Vec<_>>();
    TrackMeta::new(track, events)
}

#[test]
fn song_name_falls_back_to_sequence_name() {
    use pretty_assertions::assert_eq;
    let meta = MidiMeta {
        tracks: vec![
            named_track(1, &[(TextKind::SequenceName, "My Song")]),
            named_track(2, &[(TextKind::TrackName, "Piano")]),
        ],
    };
    assert_eq!(meta.song_name(), Some("My Song"));
}

#[test]
fn song_name_prefers_per_language_xf_title() {
    use pretty_assertions::assert_eq;
    let mut xf = XfMeta::default();
    xf.absorb("XFln:L1:JPN:XF Title");
    let meta = MidiMeta {
        tracks: vec![
            named_track(1, &[(TextKind::SequenceName, "Plain Name")]),
            TrackMeta::new(2, vec![MetaEvent::Xf(xf)]),
        ],
    };
    assert_eq!(meta.song_name(), Some("XF Title"));
}

#[test]
fn song_name_none_when_nothing_matches() {
    let meta = MidiMeta {
        tracks: vec![named_track(1, &[(TextKind::Marker, "Verse 1")])],
    };
    assert_eq!(meta.song_name(), None);
}
