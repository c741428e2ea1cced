use clap::Args;
use std::path::PathBuf;

/// Where to find the trained network and its vocabulary.
///
/// Shared by the command line scorer and the desktop app; each flag can also
/// be set through its environment variable.
#[derive(Args, Debug, Clone)]
pub struct ModelConfig {
    /// Path to the exported model weights (JSON)
    #[arg(long, env = "IMDB_MODEL", default_value = "models/imdb_rnn.json")]
    pub model: PathBuf,

    /// Path to the IMDB word index (JSON object of word to rank)
    #[arg(long, env = "IMDB_WORD_INDEX", default_value = "data/imdb_word_index.json")]
    pub word_index: PathBuf,

    /// Number of tokens every review is padded or truncated to
    #[arg(long, env = "IMDB_MAXLEN", default_value_t = 500)]
    pub maxlen: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("models/imdb_rnn.json"),
            word_index: PathBuf::from("data/imdb_word_index.json"),
            maxlen: 500,
        }
    }
}
