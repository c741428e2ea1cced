//! Movie review sentiment scoring with a small recurrent network.
//!
//! Reviews are lowercased, split on whitespace, mapped through the IMDB word
//! index, padded to a fixed length and scored by an
//! `Embedding -> SimpleRNN -> Dense(sigmoid)` classifier.

mod config;
mod predictor;

pub use config::ModelConfig;
pub use predictor::{PredictorError, SentimentPredictor};

// Re-export the building blocks so callers only need this crate.
pub use sentiment_helpers::{
    pad_sequence, pad_sequences, PadOptions, Padding, Prediction, Sentiment, VocabError,
    WordIndex, INDEX_FROM, OOV_INDEX, PAD_INDEX, START_INDEX,
};
pub use simple_rnn::{Activation, RnnError, SimpleRnnClassifier, SimpleRnnWeights};
