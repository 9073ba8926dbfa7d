//  ____       _      ____
// |  _ \ __ _(_)_ __|  _ \ __ _ ___ ___
// | |_) / _` | | '__| |_) / _` / __/ __|
// |  __/ (_| | | |  |  __/ (_| \__ \__ \
// |_|   \__,_|_|_|  |_|   \__,_|___/___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2025-08-12
// Version : 0.1.0
// License : Mulan PSL v2
//
// Word list handling

use std::fs;
use std::path::{Path, PathBuf};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::PassError;

// 引入编译生成的单词列表
include!(concat!(env!("OUT_DIR"), "/word_data.rs"));

/// Shortest word accepted into a list.
pub const MIN_WORD_LEN: usize = 3;

/// Immutable list of candidate words. Never empty.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Builds a list, dropping blank lines and words shorter than [`MIN_WORD_LEN`].
    pub fn new<I, S>(words: I) -> Result<Self, PassError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| w.chars().count() >= MIN_WORD_LEN)
            .collect();
        if words.is_empty() {
            return Err(PassError::WordList("word list contains no usable words".to_string()));
        }
        Ok(Self { words })
    }

    /// Reads a newline-delimited word list from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PassError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PassError::WordListIo {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::new(content.lines())?;
        debug!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    /// The list compiled into the binary from `data/wordlist.txt`.
    pub fn embedded() -> Result<Self, PassError> {
        Self::new(WORDS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Uniform draw with replacement.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // every constructor goes through new(), which rejects an empty list
        self.words.choose(rng).map(String::as_str).unwrap_or_default()
    }
}

/// Where the word list comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WordSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl WordSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(WordSource::Embedded, WordSource::File)
    }

    pub fn load(&self) -> Result<WordList, PassError> {
        match self {
            WordSource::Embedded => WordList::embedded(),
            WordSource::File(path) => WordList::load(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_short_and_blank_words_dropped() {
        let list = WordList::new(["ox", "", "  cat  ", "horse"]).unwrap();
        assert_eq!(list.words(), &["cat".to_string(), "horse".to_string()]);
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = WordList::new(["a", "be"]).unwrap_err();
        assert!(err.is_resource());
    }

    #[test]
    fn test_embedded_list_is_usable() {
        let list = WordList::embedded().unwrap();
        assert!(!list.is_empty());
        assert!(list.words().iter().all(|w| w.chars().count() >= MIN_WORD_LEN));
    }

    #[test]
    fn test_embedded_data_has_no_short_words() {
        // build.rs rejects short words, so filtering must not drop anything
        let short: Vec<&str> = WORDS
            .iter()
            .copied()
            .filter(|w| w.chars().count() < MIN_WORD_LEN)
            .collect();
        assert!(short.is_empty(), "short words in embedded list: {:?}", short);
        assert_eq!(WordList::embedded().unwrap().len(), WORDS.len());
    }

    #[test]
    fn test_load_missing_file() {
        let err = WordSource::File(PathBuf::from("/nonexistent/words.txt")).load().unwrap_err();
        assert!(matches!(err, PassError::WordListIo { .. }));
    }

    #[test]
    fn test_choose_returns_member() {
        let list = WordList::new(["happy", "dream"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let word = list.choose(&mut rng);
            assert!(word == "happy" || word == "dream");
        }
    }
}
