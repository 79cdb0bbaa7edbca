//! Field mapping for `KEY:VALUE` style responses
//!
//! Monitor commands intermix telemetry lines with bare status and carrier
//! tokens:
//! ```text
//! RSRP:-95  RSRQ:-10  AT&T  OK
//! ```
//! Tokens with a colon become `key -> value`. Bare ("orphan") tokens are
//! looked up in a [`RemapTable`] and stored under the field name they map
//! to, or kept as a key with no value when the table has no entry.

use std::collections::{BTreeMap, HashMap};

/// Delimiter between a field name and its value
pub const FIELD_DELIMITER: char = ':';

/// Field name to (optional) value
pub type FieldMap = BTreeMap<String, Option<String>>;

/// Maps orphan tokens to the field name they belong under
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTable {
    entries: HashMap<String, String>,
}

impl RemapTable {
    /// Create an empty remap table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(orphan token, field name)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(token, field)| (token.into(), field.into()))
                .collect(),
        }
    }

    /// Remap table for `AT+SQNMONI` responses
    pub fn sqnmoni() -> Self {
        Self::from_pairs([("AT&T", "carrier"), ("VZN", "carrier"), ("OK", "status")])
    }

    /// Field name for an orphan token, if known
    pub fn field_for(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Number of orphan tokens in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table remaps nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turn response tokens into a field map
///
/// Each token is split once on the first colon. A repeated key keeps the
/// last value seen.
pub fn map_fields<S: AsRef<str>>(tokens: &[S], remap: &RemapTable) -> FieldMap {
    let mut fields = FieldMap::new();

    for token in tokens {
        let token = token.as_ref();
        match token.split_once(FIELD_DELIMITER) {
            Some((key, value)) => {
                fields.insert(key.to_owned(), Some(value.to_owned()));
            }
            None => match remap.field_for(token) {
                Some(field) => {
                    fields.insert(field.to_owned(), Some(token.to_owned()));
                }
                None => {
                    fields.insert(token.to_owned(), None);
                }
            },
        }
    }

    fields
}
