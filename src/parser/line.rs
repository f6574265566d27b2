//! GEDCOM record-line grammar
//!
//! A record line has the shape `LEVEL [@XREF@] TAG [VALUE]`: a non-negative
//! level, an optional cross-reference id (present only on level-0 lines), an
//! uppercase tag and free text to the end of the line. Lines that do not
//! match the grammar decode to `None` and are skipped, never treated as an
//! error.

use regex::Regex;

/// A single decoded GEDCOM record line, borrowing from the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GedcomLine<'a> {
    /// Nesting level; zero opens a new record
    pub level: u32,
    /// Cross-reference id with its `@` delimiters already stripped
    pub xref: Option<&'a str>,
    /// Uppercase record tag
    pub tag: &'a str,
    /// Free-text remainder of the line, possibly empty
    pub value: &'a str,
}

/// Decoder for the record-line grammar, holding the compiled pattern
#[derive(Debug)]
pub struct LineDecoder {
    pattern: Regex,
}

impl LineDecoder {
    /// Create a decoder with the record-line pattern compiled
    #[must_use]
    pub fn new() -> Self {
        let pattern = Regex::new(r"^(\d+)\s+(?:@([^@]+)@\s+)?([A-Z_]+)\s*(.*)$")
            .expect("invalid GEDCOM line pattern");
        Self { pattern }
    }

    /// Decode one line of text, returning `None` for empty or non-matching
    /// lines
    #[must_use]
    pub fn decode<'a>(&self, line: &'a str) -> Option<GedcomLine<'a>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let caps = self.pattern.captures(line)?;
        let level = caps.get(1)?.as_str().parse().ok()?;
        let xref = caps.get(2).map(|m| m.as_str());
        let tag = caps.get(3)?.as_str();
        let value = caps.get(4).map_or("", |m| m.as_str());

        Some(GedcomLine {
            level,
            xref,
            tag,
            value,
        })
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip `@` delimiters from a cross-reference value, e.g. `@I1@` -> `I1`
#[must_use]
pub fn strip_xref(value: &str) -> &str {
    value.trim().trim_matches('@')
}
