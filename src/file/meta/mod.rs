#![doc = r#"
The textual meta events a track can carry.

Only six meta-event type codes carry text this crate cares about. Every
other meta event (tempo, time signature, SMPTE offset, ...) is skipped
over during the walk and produces no record.
"#]

mod xf;
pub use xf::*;

use core::fmt;
use num_enum::TryFromPrimitive;

/// Meta-event status byte.
pub(crate) const META_EVENT: u8 = 0xFF;

/// End-of-track meta type code.
pub(crate) const END_OF_TRACK: u8 = 0x2F;

/// The raw meta-event type codes that carry a text payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub(crate) enum TextMetaType {
    Text = 0x01,
    Copyright = 0x02,
    SequenceOrTrackName = 0x03,
    Lyrics = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
}

#[doc = r#"
The classification of a textual meta event.

The `0x03` type code is context dependent: on the first track it names
the whole sequence, on any later track it names just that track, so it
surfaces as either [`TextKind::SequenceName`] or [`TextKind::TrackName`].
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TextKind {
    /// `0x03` on the first track
    SequenceName,
    /// `0x03` on any later track
    TrackName,
    /// `0x02`
    Copyright,
    /// `0x01`
    Text,
    /// `0x05`
    Lyrics,
    /// `0x06`
    Marker,
    /// `0x07`
    CuePoint,
}

impl TextKind {
    pub(crate) const fn from_meta_type(ty: TextMetaType, first_track: bool) -> Self {
        match ty {
            TextMetaType::Text => Self::Text,
            TextMetaType::Copyright => Self::Copyright,
            TextMetaType::SequenceOrTrackName => {
                if first_track {
                    Self::SequenceName
                } else {
                    Self::TrackName
                }
            }
            TextMetaType::Lyrics => Self::Lyrics,
            TextMetaType::Marker => Self::Marker,
            TextMetaType::CuePoint => Self::CuePoint,
        }
    }

    /// Human-readable name, e.g. for a detail view.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SequenceName => "Sequence Name",
            Self::TrackName => "Track Name",
            Self::Copyright => "Copyright",
            Self::Text => "Text",
            Self::Lyrics => "Lyrics",
            Self::Marker => "Marker",
            Self::CuePoint => "Cue Point",
        }
    }
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MetaEvent {
    /// A plain textual meta event.
    Text {
        /// What the text describes.
        kind: TextKind,
        /// The Shift-JIS-decoded payload.
        text: String,
    },
    /// Structured XF song metadata, accumulated across consecutive XF
    /// payloads in the same chunk.
    Xf(XfMeta),
}

#[test]
fn text_meta_type_codes() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        TextMetaType::try_from(0x03).ok(),
        Some(TextMetaType::SequenceOrTrackName)
    );
    assert_eq!(TextMetaType::try_from(0x05).ok(), Some(TextMetaType::Lyrics));
    // tempo is a meta event, but not a textual one
    assert!(TextMetaType::try_from(0x51).is_err());
    assert!(TextMetaType::try_from(END_OF_TRACK).is_err());
}

#[test]
fn sequence_name_only_on_first_track() {
    use pretty_assertions::assert_eq;
    let ty = TextMetaType::SequenceOrTrackName;
    assert_eq!(TextKind::from_meta_type(ty, true), TextKind::SequenceName);
    assert_eq!(TextKind::from_meta_type(ty, false), TextKind::TrackName);
    assert_eq!(TextKind::from_meta_type(TextMetaType::Marker, false), TextKind::Marker);
}

#[test]
fn kind_display() {
    use pretty_assertions::assert_eq;
    assert_eq!(TextKind::SequenceName.to_string(), "Sequence Name");
    assert_eq!(TextKind::CuePoint.to_string(), "Cue Point");
}
