use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use log::info;
use crate::error::{LantError, Result};
use crate::models::{Alphabet, FACES};

/// Playable alphabets keyed by language code, loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct AlphabetRegistry {
    alphabets: BTreeMap<String, Alphabet>,
}

impl AlphabetRegistry {
    /// Parses a JSON object of `{"iso": "letters"}` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(LantError::BadAlphabetConfig)?;
        let mut alphabets = BTreeMap::new();
        for (code, letters) in raw {
            let alphabet = Alphabet::new(&code, &letters)?;
            alphabets.insert(code.to_lowercase(), alphabet);
        }
        Ok(AlphabetRegistry { alphabets })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| LantError::reading(path, e))?;
        let registry = Self::from_json(&json)?;
        info!(
            "Loaded alphabets for {} languages from {}.",
            registry.alphabets.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn get(&self, code: &str) -> Result<&Alphabet> {
        self.alphabets
            .get(&code.to_lowercase())
            .ok_or_else(|| LantError::UnknownLanguage(code.to_string()))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.alphabets.keys().map(|k| k.as_str())
    }
}

/// Board dimensions checked against the alphabet they will be filled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSpec {
    pub board_size: usize,
}

impl BoardSpec {
    /// Fails unless the board has more dice faces than the alphabet has letters.
    pub fn new(board_size: usize, alphabet: &Alphabet) -> Result<Self> {
        if board_size == 0 {
            return Err(LantError::InvalidParameter(
                "board size must be at least 1".to_string(),
            ));
        }
        let spec = BoardSpec { board_size };
        if spec.dice_faces() <= alphabet.len() {
            return Err(LantError::BoardTooSmall {
                faces: spec.dice_faces(),
                letters: alphabet.len(),
            });
        }
        Ok(spec)
    }

    pub fn dice(&self) -> usize {
        self.board_size * self.board_size
    }

    pub fn dice_faces(&self) -> usize {
        self.dice() * FACES
    }
}

/// Parameters of one simulation run
#[derive(Debug, Clone)]
pub struct PlayConfig {
    pub language: String,
    pub board_size: usize,
    pub round_size: usize,
    pub rounds: usize,
    pub min_word_length: usize,
    pub wordlist_cap: usize,
    pub seed: Option<u64>,
}

impl PlayConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("round size", self.round_size),
            ("rounds", self.rounds),
            ("minimum word length", self.min_word_length),
            ("board size", self.board_size),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(LantError::InvalidParameter(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Parameters of the HTTP solver
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub langs: Vec<String>,
    pub listen_host: String,
    pub min_word_length: usize,
    pub wordlist_cap: usize,
}

impl ServeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_word_length == 0 {
            return Err(LantError::InvalidParameter(
                "minimum word length must be at least 1".to_string(),
            ));
        }
        if self.langs.is_empty() {
            return Err(LantError::InvalidParameter(
                "no languages to serve".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_registry_from_json() {
        let registry = AlphabetRegistry::from_json(r#"{"eng": "abc", "POL": "aąb"}"#).unwrap();
        assert_eq!(registry.get("eng").unwrap().len(), 3);
        assert_eq!(registry.get("pol").unwrap().letters(), &['a', 'ą', 'b']);
        assert_eq!(registry.languages().collect::<Vec<_>>(), vec!["eng", "pol"]);
    }

    #[test]
    fn test_unknown_language() {
        let registry = AlphabetRegistry::from_json(r#"{"eng": "abc"}"#).unwrap();
        let err = registry.get("xyz").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_malformed_registry() {
        let err = AlphabetRegistry::from_json("[1, 2]").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedInput);
        let err = AlphabetRegistry::from_json(r#"{"eng": "aab"}"#).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_board_too_small() {
        let alphabet = Alphabet::new("xxx", "abcdefghijklmnopqrstuvwxyzäöüß").unwrap();
        assert_eq!(alphabet.len(), 30);
        match BoardSpec::new(1, &alphabet) {
            Err(LantError::BoardTooSmall { faces, letters }) => {
                assert_eq!(faces, 6);
                assert_eq!(letters, 30);
            }
            other => panic!("expected BoardTooSmall, got {:?}", other),
        }
        let spec = BoardSpec::new(3, &alphabet).unwrap();
        assert_eq!(spec.dice(), 9);
        assert_eq!(spec.dice_faces(), 54);
    }

    #[test]
    fn test_board_exactly_alphabet_size_is_too_small() {
        let alphabet = Alphabet::new("xxx", "abcdef").unwrap();
        assert!(BoardSpec::new(1, &alphabet).is_err());
        assert!(BoardSpec::new(0, &alphabet).is_err());
    }

    #[test]
    fn test_play_config_validate() {
        let mut config = PlayConfig {
            language: "eng".to_string(),
            board_size: 5,
            round_size: 50,
            rounds: 10,
            min_word_length: 5,
            wordlist_cap: 5000,
            seed: None,
        };
        assert!(config.validate().is_ok());
        config.round_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serve_config_validate() {
        let mut config = ServeConfig {
            langs: vec!["eng".to_string()],
            listen_host: "127.0.0.1:8080".to_string(),
            min_word_length: 5,
            wordlist_cap: 5000,
        };
        assert!(config.validate().is_ok());
        config.min_word_length = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        config.min_word_length = 1;
        config.langs.clear();
        assert!(config.validate().is_err());
    }
}
