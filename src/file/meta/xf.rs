#![doc = r#"
Yamaha XF song metadata.

XF embeds structured song data in ordinary meta-event text payloads,
recognizable by a four-character prefix followed by colon-separated
fields:

```text
XFhd:SONG01:1999/01/01:JPN:POPS:8BEAT:::COMPOSER:LYRICIST
XFln:L1:JPN:Song Title:Composer:Lyricist
```

`XFhd` carries song-wide data, one payload per song. `XFln` carries the
fields that vary by language, one payload per language. A chunk
routinely holds one `XFhd` followed by several `XFln` payloads, so
consecutive XF payloads fold into a single [`XfMeta`] record.
"#]

/// Prefix of the song-wide header payload.
const XF_HEADER_PREFIX: &str = "XFhd";

/// Prefix of the per-language payload.
const XF_LANGUAGE_PREFIX: &str = "XFln";

/// Field labels of an `XFhd` payload, in payload order.
const XF_HEADER_LABELS: &[&str] = &[
    "ID",
    "Release Date",
    "Production Area",
    "Genre",
    "Rhythm",
    "Lead Instrument",
    "Vocal Type",
    "Composer",
    "Lyricist",
    "Arranger",
    "Performer",
    "Data Producer",
    "Keywords",
];

/// Field labels of an `XFln` payload, in payload order.
const XF_LANGUAGE_LABELS: &[&str] = &[
    "ID",
    "Language",
    "Title",
    "Composer",
    "Lyricist",
    "Arranger",
    "Performer",
    "Data Producer",
];

/// One labeled XF value, e.g. `Genre: POPS`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct XfField {
    /// Which field of the payload this is. Labels come from a fixed
    /// table per payload kind.
    pub label: &'static str,
    /// The field's decoded text.
    pub text: String,
}

#[doc = r#"
Structured XF song metadata accumulated for one track chunk.

Field order within each category follows payload order. Empty payload
fields are omitted, so positions are carried by [`XfField::label`]
rather than by index.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct XfMeta {
    /// Song-wide fields, from `XFhd` payloads.
    pub common: Vec<XfField>,
    /// Language-specific fields, from `XFln` payloads.
    pub per_language: Vec<XfField>,
}

impl XfMeta {
    /// True when decoded meta text is an XF payload.
    pub(crate) fn matches(text: &str) -> bool {
        text.starts_with(XF_HEADER_PREFIX) || text.starts_with(XF_LANGUAGE_PREFIX)
    }

    /// Fold one decoded XF payload into this record.
    ///
    /// The payload's first colon-separated field is the prefix itself
    /// and is dropped. Each later field lands in the matching category
    /// under the label at its position; empty fields and fields beyond
    /// the label table are dropped.
    pub(crate) fn absorb(&mut self, text: &str) {
        let (labels, target) = if text.starts_with(XF_LANGUAGE_PREFIX) {
            (XF_LANGUAGE_LABELS, &mut self.per_language)
        } else {
            (XF_HEADER_LABELS, &mut self.common)
        };

        for (index, value) in text.split(':').enumerate().skip(1) {
            let Some(&label) = labels.get(index - 1) else {
                #[cfg(feature = "tracing")]
                tracing::trace!(index, value, "XF field past label table, dropping");
                continue;
            };
            if value.is_empty() {
                continue;
            }
            target.push(XfField {
                label,
                text: value.to_owned(),
            });
        }
    }

    /// True when no payload contributed any field.
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.per_language.is_empty()
    }

    /// Look up a field by label, preferring the per-language value.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.per_language
            .iter()
            .chain(self.common.iter())
            .find(|field| field.label == label)
            .map(|field| field.text.as_str())
    }
}

#[cfg(test)]
fn fields(list: &[XfField]) -> Vec<(&'static str, &str)> {
    list.iter().map(|f| (f.label, f.text.as_str())).collect()
}

#[test]
fn absorb_header_payload() {
    use pretty_assertions::assert_eq;
    let mut xf = XfMeta::default();
    xf.absorb("XFhd:SONG01:1999/01/01:JPN:POPS");
    assert_eq!(
        fields(&xf.common),
        vec![
            ("ID", "SONG01"),
            ("Release Date", "1999/01/01"),
            ("Production Area", "JPN"),
            ("Genre", "POPS"),
        ]
    );
    assert!(xf.per_language.is_empty());
}

#[test]
fn absorb_skips_empty_fields() {
    use pretty_assertions::assert_eq;
    let mut xf = XfMeta::default();
    xf.absorb("XFln:L1::Song Title");
    assert_eq!(fields(&xf.per_language), vec![("ID", "L1"), ("Title", "Song Title")]);
}

#[test]
fn absorb_drops_fields_past_label_table() {
    use pretty_assertions::assert_eq;
    let payload = "XFln:L1:JPN:Title:C:L:A:P:D:extra:more";
    let mut xf = XfMeta::default();
    xf.absorb(payload);
    assert_eq!(xf.per_language.len(), 8);
    assert_eq!(xf.per_language.last().unwrap().label, "Data Producer");
}

#[test]
fn prefix_only_payload_contributes_nothing() {
    let mut xf = XfMeta::default();
    xf.absorb("XFhd");
    assert!(xf.is_empty());
}

#[test]
fn field_lookup_prefers_per_language() {
    use pretty_assertions::assert_eq;
    let mut xf = XfMeta::default();
    xf.absorb("XFhd:SONG01:::POPS::::CommonComposer");
    xf.absorb("XFln:L1:JPN:Song Title:LocalComposer");
    assert_eq!(xf.field("Composer"), Some("LocalComposer"));
    assert_eq!(xf.field("Genre"), Some("POPS"));
    assert_eq!(xf.field("Keywords"), None);
}
