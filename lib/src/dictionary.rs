use crate::error::Error;
use crate::fingerprint::Fingerprint;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::iter::FromIterator;
use std::path::Path;

/// Returned for a letter whose fingerprint is not in the dictionary.
pub const SENTINEL: char = '-';

/// The dictionary that is shipped with the library.
const BUNDLED: &[u8] = include_bytes!("data/dictionary.json");

/// Maps letter fingerprints to the letter they were labeled with.
///
/// A dictionary is never changed after it is built. Share it between threads behind an
/// [Arc](std::sync::Arc); to load a new version, build a new dictionary and a new
/// [Solver](crate::Solver) around it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: HashMap<String, char>,
}

impl Dictionary {
    /// Parse a dictionary from a JSON object of `"fingerprint": "letter"` pairs.
    ///
    /// Entries whose value is not exactly one character are skipped.
    /// # Errors
    /// If the data is not a JSON object with string values.
    pub fn from_json(data: &[u8]) -> Result<Dictionary, Error> {
        let raw: HashMap<String, String> = serde_json::from_slice(data)?;
        Ok(Self::from_raw(raw))
    }

    /// Like [from_json](Dictionary::from_json), reading from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Dictionary, Error> {
        let raw: HashMap<String, String> = serde_json::from_reader(reader)?;
        Ok(Self::from_raw(raw))
    }

    /// Load a dictionary file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Dictionary, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dictionary file, falling back to an empty dictionary if it is missing or
    /// malformed. Every letter then resolves to [SENTINEL].
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Dictionary {
        let path = path.as_ref();
        Self::from_file(path).unwrap_or_else(|err| {
            warn!("using empty dictionary, {}: {}", path.display(), err);
            Dictionary::default()
        })
    }

    /// The dictionary embedded in the library.
    pub fn bundled() -> Dictionary {
        Self::from_json(BUNDLED).unwrap_or_else(|err| {
            warn!("using empty dictionary, bundled dictionary: {}", err);
            Dictionary::default()
        })
    }

    fn from_raw(raw: HashMap<String, String>) -> Dictionary {
        let mut entries = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => {
                    entries.insert(key, letter);
                }
                _ => warn!("skipping dictionary entry {:?} for {}", value, key),
            }
        }
        debug!("dictionary with {} entries", entries.len());
        Dictionary { entries }
    }

    /// Serialize to the JSON file format, sorted by fingerprint.
    pub fn to_json(&self) -> Result<String, Error> {
        let sorted: BTreeMap<&str, String> = self
            .entries
            .iter()
            .map(|(key, letter)| (key.as_str(), letter.to_string()))
            .collect();
        Ok(serde_json::to_string_pretty(&sorted)?)
    }

    /// Look up a letter. Only an exact match of the fingerprint is found.
    pub fn get(&self, fingerprint: &str) -> Option<char> {
        self.entries.get(fingerprint).copied()
    }

    /// The letter for `fingerprint`, or [SENTINEL] if it is unknown.
    pub fn resolve(&self, fingerprint: &Fingerprint) -> char {
        self.get(fingerprint.as_str()).unwrap_or(SENTINEL)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, char)> {
        self.entries.iter().map(|(key, &letter)| (key.as_str(), letter))
    }
}

impl FromIterator<(Fingerprint, char)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (Fingerprint, char)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(fingerprint, letter)| (fingerprint.as_str().to_string(), letter))
            .collect();
        Dictionary { entries }
    }
}
