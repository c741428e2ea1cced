use std::error::Error;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use sentiment_helpers::{pad_sequences, Float, PadOptions, Prediction, VocabError, WordIndex};
use simple_rnn::{RnnError, SimpleRnnClassifier};

use crate::config::ModelConfig;

/// Errors that can occur while loading or running the sentiment pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictorError {
    /// The word index could not be loaded
    Vocab(VocabError),
    /// The model could not be loaded or run
    Model(RnnError),
    /// A sequence length of zero leaves the network nothing to read
    InvalidMaxlen,
}

impl Display for PredictorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictorError::Vocab(e) => write!(f, "{}", e),
            PredictorError::Model(e) => write!(f, "{}", e),
            PredictorError::InvalidMaxlen => write!(f, "maxlen must be greater than zero"),
        }
    }
}

impl Error for PredictorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PredictorError::Vocab(e) => Some(e),
            PredictorError::Model(e) => Some(e),
            PredictorError::InvalidMaxlen => None,
        }
    }
}

impl From<VocabError> for PredictorError {
    fn from(e: VocabError) -> Self {
        PredictorError::Vocab(e)
    }
}

impl From<RnnError> for PredictorError {
    fn from(e: RnnError) -> Self {
        PredictorError::Model(e)
    }
}

/// Turns raw review text into a [`Prediction`].
///
/// Owns the vocabulary and the network, both loaded once and then only read.
#[derive(Debug, Clone)]
pub struct SentimentPredictor<F: Float> {
    word_index: WordIndex,
    model: SimpleRnnClassifier<F>,
    maxlen: usize,
}

impl<F: Float> SentimentPredictor<F> {
    /// Combines a vocabulary and a model.
    ///
    /// Words whose token would fall outside the model's embedding table are
    /// treated as out of vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `PredictorError::InvalidMaxlen` if `maxlen` is 0.
    pub fn new(
        word_index: WordIndex,
        model: SimpleRnnClassifier<F>,
        maxlen: usize,
    ) -> Result<Self, PredictorError> {
        if maxlen == 0 {
            return Err(PredictorError::InvalidMaxlen);
        }
        let word_index = word_index.with_num_words(model.vocab_size());
        Ok(Self {
            word_index,
            model,
            maxlen,
        })
    }

    pub fn model(&self) -> &SimpleRnnClassifier<F> {
        &self.model
    }

    pub fn word_index(&self) -> &WordIndex {
        &self.word_index
    }

    pub fn maxlen(&self) -> usize {
        self.maxlen
    }

    /// Encodes a review into a `1 x maxlen` batch, left-padded with zeros and
    /// keeping only the last `maxlen` words of long reviews.
    pub fn preprocess(&self, review: &str) -> Array2<usize> {
        let tokens = self.word_index.encode(review);
        pad_sequences(&[tokens], &PadOptions::with_maxlen(self.maxlen))
    }

    /// Scores an already preprocessed batch of one review.
    pub fn predict_encoded(&self, encoded: &Array2<usize>) -> Result<Prediction<F>, PredictorError> {
        let scores = self.model.predict_batch(encoded.view())?;
        let score = scores.get(0).copied().ok_or(RnnError::EmptySequence)?;
        Ok(Prediction::from_score(score))
    }

    /// Scores a review. Empty text is scored as an all-padding sequence.
    pub fn predict(&self, review: &str) -> Result<Prediction<F>, PredictorError> {
        let encoded = self.preprocess(review);
        let prediction = self.predict_encoded(&encoded)?;
        tracing::debug!(
            words = review.split_whitespace().count(),
            sentiment = %prediction.sentiment,
            confidence = %prediction.confidence,
            "Scored review"
        );
        Ok(prediction)
    }
}

impl SentimentPredictor<f32> {
    /// Loads the model and word index named in `config`.
    pub fn load(config: &ModelConfig) -> Result<Self, PredictorError> {
        let model = SimpleRnnClassifier::<f32>::load(&config.model)?;
        tracing::info!(
            path = %config.model.display(),
            vocab_size = model.vocab_size(),
            embedding_dim = model.embedding_dim(),
            units = model.units(),
            activation = %model.activation(),
            "Loaded model"
        );

        let word_index = WordIndex::load(&config.word_index)?;
        tracing::info!(
            path = %config.word_index.display(),
            words = word_index.len(),
            "Loaded word index"
        );

        Self::new(word_index, model, config.maxlen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use sentiment_helpers::{Sentiment, INDEX_FROM, OOV_INDEX};
    use simple_rnn::{Activation, SimpleRnnWeights};
    use std::collections::HashMap;

    // Token 4 ("good") pushes the state up, token 5 ("bad") pushes it down,
    // everything else is neutral. The score is sigmoid(4 * h_last).
    fn toy_predictor(maxlen: usize) -> SentimentPredictor<f64> {
        let mut embedding = Array2::<f64>::zeros((6, 1));
        embedding[[4, 0]] = 1.0;
        embedding[[5, 0]] = -1.0;
        let weights = SimpleRnnWeights {
            embedding,
            rnn_kernel: array![[2.0]],
            rnn_recurrent_kernel: array![[1.0]],
            rnn_bias: array![0.0],
            dense_kernel: array![[4.0]],
            dense_bias: array![0.0],
            activation: Activation::Tanh,
        };
        let model = SimpleRnnClassifier::new(weights).unwrap();

        let raw: HashMap<String, usize> = [("good", 1), ("bad", 2), ("rare", 50)]
            .into_iter()
            .map(|(w, i)| (w.to_string(), i))
            .collect();
        let word_index = WordIndex::from_raw(raw, INDEX_FROM).unwrap();

        SentimentPredictor::new(word_index, model, maxlen).unwrap()
    }

    #[test]
    fn test_preprocess_pads_on_the_left() {
        let predictor = toy_predictor(500);
        let encoded = predictor.preprocess("Good movie");
        assert_eq!(encoded.shape(), &[1, 500]);
        assert_eq!(encoded[[0, 498]], 4);
        assert_eq!(encoded[[0, 499]], OOV_INDEX);
        assert!(encoded.row(0).iter().take(498).all(|&t| t == 0));
    }

    #[test]
    fn test_preprocess_keeps_last_words() {
        let predictor = toy_predictor(2);
        assert_eq!(predictor.preprocess("bad bad good"), array![[5, 4]]);
    }

    #[test]
    fn test_words_beyond_embedding_are_oov() {
        let predictor = toy_predictor(3);
        // "rare" maps to token 53, but the embedding only has 6 rows.
        assert_eq!(predictor.preprocess("rare"), array![[0, 0, OOV_INDEX]]);
        assert!(predictor.predict("rare").is_ok());
    }

    #[test]
    fn test_positive_and_negative_reviews() {
        let predictor = toy_predictor(10);

        let positive = predictor.predict("GOOD good").unwrap();
        assert_eq!(positive.sentiment, Sentiment::Positive);
        assert!(positive.confidence > 0.5);

        let negative = predictor.predict("bad").unwrap();
        assert_eq!(negative.sentiment, Sentiment::Negative);
        assert!(negative.confidence < 0.5);
    }

    #[test]
    fn test_empty_review_scores_exactly_half_as_negative() {
        let predictor = toy_predictor(500);
        let prediction = predictor.predict("").unwrap();
        assert_abs_diff_eq!(prediction.confidence, 0.5, epsilon = 1e-12);
        assert_eq!(prediction.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_predict_encoded_matches_predict() {
        let predictor = toy_predictor(20);
        let encoded = predictor.preprocess("good bad good");
        assert_eq!(
            predictor.predict_encoded(&encoded).unwrap(),
            predictor.predict("good bad good").unwrap()
        );
    }

    #[test]
    fn test_error_on_zero_maxlen() {
        let model = toy_predictor(1).model().clone();
        let result = SentimentPredictor::new(WordIndex::default(), model, 0);
        assert!(matches!(result, Err(PredictorError::InvalidMaxlen)));
    }

    #[test]
    fn test_load_reports_missing_model() {
        let config = ModelConfig {
            model: "does/not/exist.json".into(),
            ..ModelConfig::default()
        };
        let err = SentimentPredictor::load(&config).unwrap_err();
        assert!(matches!(err, PredictorError::Model(RnnError::Io(_))));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_load_from_files() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let vocab_path = dir.path().join("word_index.json");

        let mut model_file = std::fs::File::create(&model_path).unwrap();
        write!(
            model_file,
            r#"{{
                "embedding": {{"v": 1, "dim": [6, 1], "data": [0, 0, 0, 0, 1, -1]}},
                "rnn_kernel": {{"v": 1, "dim": [1, 1], "data": [2]}},
                "rnn_recurrent_kernel": {{"v": 1, "dim": [1, 1], "data": [1]}},
                "rnn_bias": {{"v": 1, "dim": [1], "data": [0]}},
                "dense_kernel": {{"v": 1, "dim": [1, 1], "data": [4]}},
                "dense_bias": {{"v": 1, "dim": [1], "data": [0]}}
            }}"#
        )
        .unwrap();
        std::fs::write(&vocab_path, r#"{"good": 1, "bad": 2}"#).unwrap();

        let config = ModelConfig {
            model: model_path,
            word_index: vocab_path,
            maxlen: 8,
        };
        let predictor = SentimentPredictor::load(&config).unwrap();
        assert_eq!(predictor.maxlen(), 8);
        assert_eq!(predictor.word_index().len(), 2);
        assert_eq!(
            predictor.predict("a good film").unwrap().sentiment,
            Sentiment::Positive
        );
    }
}
