use std::fmt;

/// The fixed sentiment vocabulary, declared in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Display order of the result page.
    pub const ALL: [SentimentLabel; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Neutral => "NEUTRAL",
            Self::Negative => "NEGATIVE",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    /// Map a raw model label onto the vocabulary.
    ///
    /// Accepts the short forms (`POS`, `NEU`, `NEG`) emitted by bertweet-style
    /// models as well as the long forms, in any casing. Returns `None` for
    /// anything else.
    pub fn from_model_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|label| {
            let canonical = label.canonical_name();
            raw.eq_ignore_ascii_case(canonical) || raw.eq_ignore_ascii_case(&canonical[..3])
        })
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}
