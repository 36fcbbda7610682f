use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding metadata out of a file.

Decoding is all-or-nothing per file: either the whole buffer is walked
successfully or one of these two conditions aborts it. Per-event
irregularities (unknown meta types, unrecognized status bytes, empty
text payloads) are absorbed silently and never surface here, because a
partially-annotated file is common and should not block extraction of
the parts that are present.

The [`Display`](core::fmt::Display) output is meant to be shown to the
user verbatim.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer does not begin with the `MThd` header signature.
    #[error("not a standard MIDI file: no MThd signature")]
    NotMidiFile,
    /// A read ran past the end of the buffer. Carries the offset at
    /// which the failed read started.
    #[error("truncated MIDI data: read past end of file at byte {0}")]
    TruncatedData(usize),
}

impl DecodeError {
    /// True if the data ended mid-read.
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedData(_))
    }
}

/// The decode result type (see [`DecodeError`]).
pub type DecodeResult<T> = Result<T, DecodeError>;
