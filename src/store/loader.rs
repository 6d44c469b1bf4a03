//! Dataset loader module
//!
//! Deserializes the emoji dataset and validates the startup invariants
//! (non-empty, unique names) before the store is built. The default dataset
//! is compiled into the binary; `dataset.path` in the config points at an
//! external JSON file with the same shape.

use std::collections::HashSet;
use std::fmt;

use super::{Emoji, EmojiStore};

/// Dataset shipped with the binary
static EMBEDDED_DATASET: &str = include_str!("../../data/emojis.json");

/// Errors raised while loading the dataset
#[derive(Debug)]
pub enum LoadError {
    /// Reading an external dataset file failed
    Io(String, std::io::Error),
    /// Dataset is not valid JSON of the expected shape
    Parse(serde_json::Error),
    /// Dataset contains no emojis
    Empty,
    /// Two emojis share a name
    DuplicateName(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, err) => write!(f, "failed to read dataset '{path}': {err}"),
            Self::Parse(err) => write!(f, "failed to parse dataset: {err}"),
            Self::Empty => write!(f, "dataset contains no emojis"),
            Self::DuplicateName(name) => write!(f, "duplicate emoji name '{name}' in dataset"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Load and validate the dataset, then build the store
///
/// `path` overrides the embedded dataset when set.
pub fn load(path: Option<&str>) -> Result<EmojiStore, LoadError> {
    let emojis = match path {
        Some(p) => {
            let raw =
                std::fs::read_to_string(p).map_err(|e| LoadError::Io(p.to_string(), e))?;
            parse(&raw)?
        }
        None => parse(EMBEDDED_DATASET)?,
    };
    Ok(EmojiStore::new(emojis))
}

fn parse(raw: &str) -> Result<Vec<Emoji>, LoadError> {
    let emojis: Vec<Emoji> = serde_json::from_str(raw).map_err(LoadError::Parse)?;
    validate(&emojis)?;
    Ok(emojis)
}

fn validate(emojis: &[Emoji]) -> Result<(), LoadError> {
    if emojis.is_empty() {
        return Err(LoadError::Empty);
    }
    let mut seen = HashSet::new();
    for emoji in emojis {
        if !seen.insert(emoji.name.as_str()) {
            return Err(LoadError::DuplicateName(emoji.name.clone()));
        }
    }
    Ok(())
}
