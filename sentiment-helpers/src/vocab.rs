use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
#[cfg(feature = "serde")]
use std::io::Read;
#[cfg(feature = "serde")]
use std::path::Path;

/// Token used to pad short reviews.
pub const PAD_INDEX: usize = 0;
/// Token that marks the start of a review in the training data.
pub const START_INDEX: usize = 1;
/// Token for words the vocabulary does not know.
pub const OOV_INDEX: usize = 2;
/// Offset added to every raw word index; the indices below it are reserved.
pub const INDEX_FROM: usize = 3;

/// Errors that can occur while loading a word index.
#[derive(Debug, Clone, PartialEq)]
pub enum VocabError {
    /// The word index file could not be read
    Io(String),
    /// The file is not a JSON object of word to index
    Format(String),
}

impl Display for VocabError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabError::Io(msg) => write!(f, "Could not read word index: {}", msg),
            VocabError::Format(msg) => write!(f, "Invalid word index: {}", msg),
        }
    }
}

impl Error for VocabError {}

/// Word to token table used to encode reviews.
///
/// Indices are already shifted by the offset given at construction, so
/// `lookup` returns exactly what the network was trained on.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    words: HashMap<String, usize>,
    num_words: Option<usize>,
}

impl WordIndex {
    /// Builds the table from raw (unshifted) indices.
    ///
    /// # Errors
    ///
    /// Returns `VocabError::Format` if shifting an index by `index_from` overflows.
    pub fn from_raw(raw: HashMap<String, usize>, index_from: usize) -> Result<Self, VocabError> {
        let words = raw
            .into_iter()
            .map(|(word, index)| match index.checked_add(index_from) {
                Some(shifted) => Ok((word, shifted)),
                None => Err(VocabError::Format(format!(
                    "index {} of word {:?} is too large",
                    index, word
                ))),
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self {
            words,
            num_words: None,
        })
    }

    /// Treats every token `>= num_words` as out of vocabulary.
    pub fn with_num_words(mut self, num_words: usize) -> Self {
        self.num_words = Some(num_words);
        self
    }

    pub fn num_words(&self) -> Option<usize> {
        self.num_words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the token for `word`, or [`OOV_INDEX`] if it is unknown or
    /// beyond the `num_words` cap.
    pub fn lookup(&self, word: &str) -> usize {
        match self.words.get(word) {
            Some(&index) if self.num_words.map_or(true, |n| index < n) => index,
            _ => OOV_INDEX,
        }
    }

    /// Lowercases the text, splits it on whitespace and looks up each word.
    ///
    /// The separators are Unicode whitespace plus the information separators
    /// U+001C to U+001F, which `str::split_whitespace` alone would keep inside
    /// words. Punctuation stays attached to its word, so `"great!"` and
    /// `"great"` are different entries.
    pub fn encode(&self, text: &str) -> Vec<usize> {
        text.to_lowercase()
            .split(is_separator)
            .filter(|word| !word.is_empty())
            .map(|word| self.lookup(word))
            .collect()
    }

    /// Parses a JSON object of word to raw index and applies [`INDEX_FROM`].
    #[cfg(feature = "serde")]
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, VocabError> {
        let raw: HashMap<String, usize> =
            serde_json::from_reader(reader).map_err(|e| VocabError::Format(e.to_string()))?;
        Self::from_raw(raw, INDEX_FROM)
    }

    /// Loads the word index file from disk.
    #[cfg(feature = "serde")]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| VocabError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
