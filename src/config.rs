//! Named alphabet variants, loaded from the embedded TOML registry.

use serde::Deserialize;
use std::collections::HashMap;

use crate::alphabet::Alphabet;

const EMBEDDED_REGISTRY: &str = include_str!("../alphabets.toml");

/// Configuration for a single alphabet variant.
///
/// `chars` holds the two characters for positions 62 and 63; positions 0-61
/// are fixed for the whole family.
#[derive(Debug, Clone, Deserialize)]
pub struct AlphabetSpec {
    /// The characters for positions 62 and 63
    pub chars: String,
    /// Optional padding character (e.g., "=")
    #[serde(default)]
    pub padding: Option<String>,
}

impl AlphabetSpec {
    /// Returns the characters for positions 62 and 63.
    ///
    /// # Errors
    ///
    /// Returns an error if `chars` does not contain exactly two characters.
    pub fn tail_chars(&self) -> Result<(char, char), String> {
        let mut chars = self.chars.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(c62), Some(c63), None) => Ok((c62, c63)),
            _ => Err(format!(
                "expected exactly two characters for positions 62 and 63, got {:?}",
                self.chars
            )),
        }
    }

    /// Returns the padding character, if any.
    pub fn padding(&self) -> Option<char> {
        self.padding.as_ref().and_then(|s| s.chars().next())
    }

    /// Builds the alphabet this spec describes.
    pub fn alphabet(&self) -> Result<Alphabet, String> {
        let (c62, c63) = self.tail_chars()?;
        Ok(Alphabet::new(c62, c63, self.padding()))
    }
}

/// Registry of the built-in alphabet variants.
#[derive(Debug, Clone)]
pub struct AlphabetRegistry {
    specs: HashMap<String, AlphabetSpec>,
}

impl AlphabetRegistry {
    /// Loads the embedded registry.
    pub fn load_default() -> Result<Self, String> {
        let specs: HashMap<String, AlphabetSpec> = toml::from_str(EMBEDDED_REGISTRY)
            .map_err(|e| format!("failed to parse embedded alphabet registry: {}", e))?;
        Ok(AlphabetRegistry { specs })
    }

    /// Looks up a variant by name.
    pub fn get(&self, name: &str) -> Option<&AlphabetSpec> {
        self.specs.get(name)
    }

    /// Builds the alphabet for a named variant.
    pub fn alphabet(&self, name: &str) -> Result<Alphabet, String> {
        self.get(name)
            .ok_or_else(|| format!("unknown alphabet: {}", name))?
            .alphabet()
    }

    /// Iterates over the registered variant names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }
}
