// src/generators/substitution.rs
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Invalid substitution key {0:?}: keys must be exactly one character")]
    InvalidKey(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Character → replacement mapping used to derive a password from a base string.
///
/// Lookups are case-sensitive. A table that should treat `a` and `A` alike has to
/// list both keys, as [`SubstitutionTable::classic`] does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct SubstitutionTable {
    map: BTreeMap<char, String>,
}

impl SubstitutionTable {
    /// Empty table: every character maps to itself.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The built-in table used when no mapping is configured.
    pub fn classic() -> Self {
        const LETTERS: [(char, &str); 12] = [
            ('a', "5"), ('b', "*"), ('c', "2"), ('d', "F"),
            ('e', "4"), ('f', "3"), ('r', "A"), ('s', "%"),
            ('m', "$"), ('n', "Q"), ('l', "O"), ('o', "G"),
        ];
        const DIGITS: [(char, &str); 8] = [
            ('1', "T"), ('2', "#"), ('3', "W"), ('4', "H"),
            ('5', "0"), ('6', "C"), ('7', "Y"), ('8', "F"),
        ];

        let mut map = BTreeMap::new();
        for (c, replacement) in LETTERS {
            map.insert(c, replacement.to_string());
            map.insert(c.to_ascii_uppercase(), replacement.to_string());
        }
        for (c, replacement) in DIGITS {
            map.insert(c, replacement.to_string());
        }
        Self { map }
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn get(&self, c: char) -> Option<&str> {
        self.map.get(&c).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.map.iter().map(|(c, r)| (*c, r.as_str()))
    }

    pub fn derive(&self, base: &str) -> String {
        derive(base, self)
    }
}

impl<const N: usize> From<[(char, &str); N]> for SubstitutionTable {
    fn from(pairs: [(char, &str); N]) -> Self {
        Self {
            map: pairs.into_iter().map(|(c, r)| (c, r.to_string())).collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, String>> for SubstitutionTable {
    type Error = TableError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut map = BTreeMap::new();
        for (key, replacement) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    map.insert(c, replacement);
                }
                _ => return Err(TableError::InvalidKey(key)),
            }
        }
        Ok(Self { map })
    }
}

impl From<SubstitutionTable> for BTreeMap<String, String> {
    fn from(table: SubstitutionTable) -> Self {
        table.map.into_iter().map(|(c, r)| (c.to_string(), r)).collect()
    }
}

impl fmt::Display for SubstitutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(c, r)| format!("{c}→{r}")).collect();
        write!(f, "{}", pairs.join(" "))
    }
}

/// Replaces each character of `base` with its table entry, in order.
/// Characters without an entry are copied unchanged.
pub fn derive(base: &str, table: &SubstitutionTable) -> String {
    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        match table.get(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}
