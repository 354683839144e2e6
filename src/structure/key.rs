//! Lookup keys: a structure is addressed by id or by acronym.

use std::fmt;

use crate::structure::id::StructureId;

/// Key accepted by [`StructureCatalog::lookup`](crate::catalog::StructureCatalog::lookup).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StructureKey {
    Id(StructureId),
    /// Integer text that no structure can carry (negative, or beyond the id
    /// range), in canonical decimal form. Resolves to an unknown id.
    OutOfRangeId(String),
    Acronym(String),
}

impl StructureKey {
    /// Interprets user text as a key. Any integer text is an id, anything
    /// else an acronym: `"997"`, `" +8 "`, `"-5"` and `"1_000"` are ids,
    /// `"CTX"` and `"1a"` are acronyms.
    pub fn parse(text: &str) -> Self {
        match canonical_integer(text) {
            Some(digits) => match digits.parse::<StructureId>() {
                Ok(id) => StructureKey::Id(id),
                Err(_) => StructureKey::OutOfRangeId(digits),
            },
            None => StructureKey::Acronym(text.to_owned()),
        }
    }
}

/// Canonical decimal form of integer text: surrounding whitespace, an
/// optional sign, digits with single underscores between them. Leading
/// zeros are dropped and `-0` becomes `0`.
fn canonical_integer(text: &str) -> Option<String> {
    let text = text.trim();
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if body.is_empty() || body.starts_with('_') || body.ends_with('_') || body.contains("__") {
        return None;
    }
    if !body.bytes().all(|b| b.is_ascii_digit() || b == b'_') {
        return None;
    }
    let digits: String = body.chars().filter(|&c| c != '_').collect();
    let digits = digits.trim_start_matches('0');
    Some(match (digits.is_empty(), negative) {
        (true, _) => "0".to_owned(),
        (false, true) => format!("-{digits}"),
        (false, false) => digits.to_owned(),
    })
}

impl From<StructureId> for StructureKey {
    fn from(id: StructureId) -> Self {
        StructureKey::Id(id)
    }
}

impl From<u32> for StructureKey {
    fn from(raw: u32) -> Self {
        StructureKey::Id(StructureId::new(raw))
    }
}

impl From<&str> for StructureKey {
    fn from(text: &str) -> Self {
        StructureKey::parse(text)
    }
}

impl From<String> for StructureKey {
    fn from(text: String) -> Self {
        match StructureKey::parse(&text) {
            StructureKey::Acronym(_) => StructureKey::Acronym(text),
            key => key,
        }
    }
}

impl From<&String> for StructureKey {
    fn from(text: &String) -> Self {
        StructureKey::parse(text)
    }
}

impl fmt::Display for StructureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureKey::Id(id) => write!(f, "{id}"),
            StructureKey::OutOfRangeId(digits) => f.write_str(digits),
            StructureKey::Acronym(acronym) => f.write_str(acronym),
        }
    }
}
