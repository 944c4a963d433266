use indexmap::IndexMap;

/// A prefix marker that introduces a field value in a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Company,
    Position,
    Deadline,
    Status,
    Priority,
    Tag,
    Requirement,
}

impl Marker {
    /// Every marker, in documentation order.
    pub const ALL: [Marker; 7] = [
        Marker::Company,
        Marker::Position,
        Marker::Deadline,
        Marker::Status,
        Marker::Priority,
        Marker::Tag,
        Marker::Requirement,
    ];

    /// The literal token as typed, e.g. `c/`.
    pub fn token(self) -> &'static str {
        match self {
            Marker::Company => "c/",
            Marker::Position => "p/",
            Marker::Deadline => "d/",
            Marker::Status => "s/",
            Marker::Priority => "pr/",
            Marker::Tag => "t/",
            Marker::Requirement => "r/",
        }
    }
}

/// The tokenized tail of a command line: the preamble (text before the first
/// marker) plus, per marker, the raw values in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgTokens {
    preamble: String,
    values: IndexMap<Marker, Vec<String>>,
}

impl ArgTokens {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The last value given for `marker`, if the marker appeared at all.
    /// Matches user expectation for single-valued fields: repeating a marker
    /// overrides the earlier occurrence.
    pub fn value(&self, marker: Marker) -> Option<&str> {
        self.values
            .get(&marker)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    /// Every value given for `marker`, in input order. Empty slice if the
    /// marker never appeared — distinct from one empty-string value, which
    /// means the marker appeared with no text after it.
    pub fn all_values(&self, marker: Marker) -> &[String] {
        self.values.get(&marker).map_or(&[], Vec::as_slice)
    }
}

/// Split `tail` into a preamble and per-marker values.
///
/// A marker only delimits a token where it starts a word (beginning of the
/// tail or right after whitespace); marker text embedded inside a value, like
/// the `r/` in `p/TCP/IP engineer`, is left alone. Values run from the end of
/// their marker to the start of the next one and are stored trimmed. Nothing
/// is dropped: every byte of `tail` lands in the preamble or in exactly one
/// value.
pub fn tokenize(tail: &str, markers: &[Marker]) -> ArgTokens {
    let mut hits: Vec<(usize, Marker)> = Vec::new();
    for &marker in markers {
        let token = marker.token();
        let mut from = 0;
        while let Some(found) = tail[from..].find(token) {
            let pos = from + found;
            let at_word_start = pos == 0 || tail[..pos].ends_with(char::is_whitespace);
            if at_word_start {
                hits.push((pos, marker));
            }
            from = pos + token.len();
        }
    }
    hits.sort_unstable_by_key(|&(pos, _)| pos);

    let preamble_end = hits.first().map_or(tail.len(), |&(pos, _)| pos);
    let mut tokens = ArgTokens {
        preamble: tail[..preamble_end].trim().to_string(),
        values: IndexMap::new(),
    };

    for (i, &(pos, marker)) in hits.iter().enumerate() {
        let value_start = pos + marker.token().len();
        let value_end = hits.get(i + 1).map_or(tail.len(), |&(next, _)| next);
        tokens
            .values
            .entry(marker)
            .or_default()
            .push(tail[value_start..value_end].trim().to_string());
    }

    tokens
}
