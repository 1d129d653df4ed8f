//! Instance tokens such as `wg700wd100`.

use std::fmt;

use crate::axis::AxisLocation;

/// Tag abbreviations, applied in order to the whole concatenated string.
const ABBREVIATIONS: [(&str, &str); 2] = [("wght", "wg"), ("wdth", "wd")];

/// Short text identifying an axis location, used in names and file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Concatenate `tag` + `value` for each axis, then abbreviate.
    ///
    /// Abbreviation is a plain substring replace over the joined text, not a
    /// per-tag lookup, so tokens stay identical to those produced before.
    pub fn from_location(location: &AxisLocation) -> Self {
        let joined: String = location.iter().map(|(tag, value)| format!("{tag}{value}")).collect();
        Self(abbreviate(joined))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn abbreviate(text: String) -> String {
    ABBREVIATIONS.iter().fold(text, |text, (from, to)| text.replace(from, to))
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
