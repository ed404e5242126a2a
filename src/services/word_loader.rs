use std::fs::{self, File};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::error::{LantError, Result};
use crate::models::Dictionary;

/// Where the corpus texts and word list of one language live
#[derive(Debug, Clone)]
pub struct LanguagePaths {
    pub texts: PathBuf,
    pub wordlist: PathBuf,
}

impl LanguagePaths {
    pub fn new(language_dir: &Path, lang: &str, wordlist_filename: &str) -> Self {
        let lang_dir = language_dir.join(lang);
        LanguagePaths {
            texts: lang_dir.join("texts"),
            wordlist: lang_dir.join(wordlist_filename),
        }
    }
}

/// Load words from a plain text file (one word per line), keeping file order
/// and at most `cap` words.
pub fn load_words(file_path: &Path, cap: usize) -> Result<Dictionary> {
    let file = File::open(file_path).map_err(|e| LantError::reading(file_path, e))?;
    let reader = io::BufReader::new(file);

    let mut words = Vec::new();
    for line in reader.lines() {
        if words.len() >= cap {
            break;
        }
        let line = line.map_err(|e| LantError::reading(file_path, e))?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }

    let dictionary = Dictionary::new(words);
    info!(
        "Word list {} is {} lines long.",
        file_path.display(),
        dictionary.len()
    );
    Ok(dictionary)
}

/// Corpus files of a language, sorted by file name.
pub fn list_texts(texts_dir: &Path) -> Result<Vec<PathBuf>> {
    if !texts_dir.is_dir() {
        return Err(LantError::MissingResource(texts_dir.to_path_buf()));
    }
    let mut texts = Vec::new();
    for entry in fs::read_dir(texts_dir)? {
        let path = entry?.path();
        if path.is_file() {
            texts.push(path);
        }
    }
    if texts.is_empty() {
        return Err(LantError::EmptyCorpus(texts_dir.to_path_buf()));
    }
    texts.sort();
    Ok(texts)
}

/// Glue all available texts of a language together, lowercased.
pub fn load_corpus(texts_dir: &Path) -> Result<String> {
    let texts = list_texts(texts_dir)?;
    info!(
        "I have {} texts to analyze in {}",
        texts.len(),
        texts_dir.display()
    );
    let mut corpus = String::new();
    for path in texts {
        debug!("Processing {}.", path.display());
        let text = fs::read_to_string(&path).map_err(|e| LantError::reading(&path, e))?;
        corpus.push_str(&text.to_lowercase());
    }
    Ok(corpus)
}
