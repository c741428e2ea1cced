use std::error::Error;
use std::fmt::{Display, Formatter};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use sentiment_helpers::Float;

mod weights;

pub use weights::SimpleRnnWeights;

/// Errors that can occur when building or running the recurrent classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum RnnError {
    /// A weight matrix does not fit the layers around it
    ShapeMismatch {
        layer: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// Cannot run the network over zero time steps
    EmptySequence,
    /// A token has no row in the embedding table
    TokenOutOfRange { token: usize, vocab_size: usize },
    /// The weights file could not be read
    Io(String),
    /// The weights file is not a valid export
    Format(String),
}

impl Display for RnnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RnnError::ShapeMismatch {
                layer,
                expected,
                found,
            } => write!(
                f,
                "Shape mismatch in {}: expected {:?}, found {:?}",
                layer, expected, found
            ),
            RnnError::EmptySequence => write!(f, "Cannot run the network on an empty sequence"),
            RnnError::TokenOutOfRange { token, vocab_size } => write!(
                f,
                "Token {} is outside the embedding table of {} rows",
                token, vocab_size
            ),
            RnnError::Io(msg) => write!(f, "Could not read model weights: {}", msg),
            RnnError::Format(msg) => write!(f, "Invalid model weights: {}", msg),
        }
    }
}

impl Error for RnnError {}

/// Activation applied to the recurrent state at every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Deserialize, serde_crate::Serialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
pub enum Activation {
    #[default]
    Tanh,
    Relu,
}

impl Activation {
    fn apply<F: Float>(self, x: F) -> F {
        match self {
            Activation::Tanh => x.tanh(),
            Activation::Relu => x.max(F::zero()),
        }
    }
}

impl Display for Activation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Activation::Tanh => write!(f, "tanh"),
            Activation::Relu => write!(f, "relu"),
        }
    }
}

/// A binary text classifier: `Embedding -> SimpleRNN -> Dense(1, sigmoid)`.
///
/// Each token is embedded, the recurrent layer folds the sequence into its
/// final hidden state, and a single sigmoid unit turns that state into a
/// score in `(0, 1)`. Padding tokens are fed through the network like any
/// other token; there is no masking.
///
/// # Type Parameters
///
/// * `F`: The float type of the weights (e.g., `f32`, `f64`).
#[derive(Debug, Clone)]
pub struct SimpleRnnClassifier<F: Float> {
    embedding: Array2<F>,
    kernel: Array2<F>,
    recurrent_kernel: Array2<F>,
    bias: Array1<F>,
    dense_kernel: Array2<F>,
    dense_bias: Array1<F>,
    activation: Activation,
}

impl<F: Float> SimpleRnnClassifier<F> {
    /// Creates a classifier from trained weights.
    ///
    /// # Errors
    ///
    /// Returns `RnnError::ShapeMismatch` if any matrix disagrees with the
    /// embedding width or the number of recurrent units.
    pub fn new(weights: SimpleRnnWeights<F>) -> Result<Self, RnnError> {
        let embedding_dim = weights.embedding.ncols();
        let units = weights.rnn_kernel.ncols();

        check_shape("rnn_kernel", &[embedding_dim, units], weights.rnn_kernel.shape())?;
        check_shape(
            "rnn_recurrent_kernel",
            &[units, units],
            weights.rnn_recurrent_kernel.shape(),
        )?;
        check_shape("rnn_bias", &[units], weights.rnn_bias.shape())?;
        check_shape("dense_kernel", &[units, 1], weights.dense_kernel.shape())?;
        check_shape("dense_bias", &[1], weights.dense_bias.shape())?;

        Ok(Self {
            embedding: weights.embedding,
            kernel: weights.rnn_kernel,
            recurrent_kernel: weights.rnn_recurrent_kernel,
            bias: weights.rnn_bias,
            dense_kernel: weights.dense_kernel,
            dense_bias: weights.dense_bias,
            activation: weights.activation,
        })
    }

    /// Number of rows in the embedding table; valid tokens are `0..vocab_size`.
    pub fn vocab_size(&self) -> usize {
        self.embedding.nrows()
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding.ncols()
    }

    /// Width of the recurrent state.
    pub fn units(&self) -> usize {
        self.kernel.ncols()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Scores one token sequence.
    ///
    /// # Errors
    ///
    /// Returns `RnnError::EmptySequence` for a zero-length input and
    /// `RnnError::TokenOutOfRange` if a token has no embedding row.
    pub fn predict_proba(&self, sequence: ArrayView1<usize>) -> Result<F, RnnError> {
        if sequence.is_empty() {
            return Err(RnnError::EmptySequence);
        }
        let vocab_size = self.vocab_size();
        if let Some(&token) = sequence.iter().find(|&&t| t >= vocab_size) {
            return Err(RnnError::TokenOutOfRange { token, vocab_size });
        }

        let mut state = Array1::<F>::zeros(self.units());
        for &token in sequence.iter() {
            let input = self.embedding.row(token);
            let mut next = input.dot(&self.kernel) + state.dot(&self.recurrent_kernel) + &self.bias;
            next.mapv_inplace(|v| self.activation.apply(v));
            state = next;
        }

        let logit = state.dot(&self.dense_kernel)[0] + self.dense_bias[0];
        Ok(sigmoid(logit))
    }

    /// Scores every row of a padded batch.
    pub fn predict_batch(&self, batch: ArrayView2<usize>) -> Result<Array1<F>, RnnError> {
        batch
            .rows()
            .into_iter()
            .map(|row| self.predict_proba(row))
            .collect::<Result<Vec<F>, RnnError>>()
            .map(Array1::from)
    }
}

fn check_shape(layer: &'static str, expected: &[usize], found: &[usize]) -> Result<(), RnnError> {
    if expected == found {
        Ok(())
    } else {
        Err(RnnError::ShapeMismatch {
            layer,
            expected: expected.to_vec(),
            found: found.to_vec(),
        })
    }
}

fn sigmoid<F: Float>(x: F) -> F {
    F::one() / (F::one() + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // One-dimensional embedding and a single unit keep the arithmetic checkable by hand.
    fn tiny_weights(activation: Activation) -> SimpleRnnWeights<f64> {
        SimpleRnnWeights {
            embedding: array![[0.0], [1.0], [2.0]],
            rnn_kernel: array![[0.5]],
            rnn_recurrent_kernel: array![[0.5]],
            rnn_bias: array![0.0],
            dense_kernel: array![[1.0]],
            dense_bias: array![0.0],
            activation,
        }
    }

    #[test]
    fn test_tanh_forward_pass() {
        let model = SimpleRnnClassifier::new(tiny_weights(Activation::Tanh)).unwrap();
        // h1 = tanh(0.5), h2 = tanh(1.0 + 0.5 * h1), p = sigmoid(h2)
        let p = model.predict_proba(array![1, 2].view()).unwrap();
        assert_abs_diff_eq!(p, 0.699_072_714_328_138_7, epsilon = 1e-9);
    }

    #[test]
    fn test_relu_forward_pass() {
        let weights = SimpleRnnWeights {
            embedding: array![[0.0], [1.0], [-3.0]],
            rnn_bias: array![0.1],
            dense_kernel: array![[2.0]],
            dense_bias: array![-1.0],
            ..tiny_weights(Activation::Relu)
        };
        let model = SimpleRnnClassifier::new(weights).unwrap();

        // The second step goes negative and is clamped to zero.
        let p = model.predict_proba(array![1, 2].view()).unwrap();
        assert_abs_diff_eq!(p, 0.268_941_421_369_995_1, epsilon = 1e-9);

        // Leading padding still moves the state through the bias.
        let p = model.predict_proba(array![0, 0, 1].view()).unwrap();
        assert_abs_diff_eq!(p, 0.586_617_578_917_330_1, epsilon = 1e-9);
    }

    #[test]
    fn test_batch_matches_single_rows() {
        let model = SimpleRnnClassifier::new(tiny_weights(Activation::Tanh)).unwrap();
        let batch = array![[0, 1, 2], [2, 2, 2]];
        let scores = model.predict_batch(batch.view()).unwrap();
        assert_eq!(scores.len(), 2);
        for (row, score) in batch.rows().into_iter().zip(scores.iter()) {
            assert_abs_diff_eq!(*score, model.predict_proba(row).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_accessors() {
        let model = SimpleRnnClassifier::new(tiny_weights(Activation::Relu)).unwrap();
        assert_eq!(model.vocab_size(), 3);
        assert_eq!(model.embedding_dim(), 1);
        assert_eq!(model.units(), 1);
        assert_eq!(model.activation(), Activation::Relu);
    }

    #[test]
    fn test_error_on_empty_sequence() {
        let model = SimpleRnnClassifier::new(tiny_weights(Activation::Tanh)).unwrap();
        let empty: Array1<usize> = Array1::zeros(0);
        assert!(matches!(
            model.predict_proba(empty.view()),
            Err(RnnError::EmptySequence)
        ));
    }

    #[test]
    fn test_error_on_token_out_of_range() {
        let model = SimpleRnnClassifier::new(tiny_weights(Activation::Tanh)).unwrap();
        let result = model.predict_proba(array![1, 3].view());
        assert_eq!(
            result,
            Err(RnnError::TokenOutOfRange {
                token: 3,
                vocab_size: 3
            })
        );
    }

    #[test]
    fn test_error_on_bad_recurrent_kernel() {
        let weights = SimpleRnnWeights {
            rnn_recurrent_kernel: array![[0.5, 0.1]],
            ..tiny_weights(Activation::Tanh)
        };
        match SimpleRnnClassifier::new(weights) {
            Err(RnnError::ShapeMismatch {
                layer,
                expected,
                found,
            }) => {
                assert_eq!(layer, "rnn_recurrent_kernel");
                assert_eq!(expected, vec![1, 1]);
                assert_eq!(found, vec![1, 2]);
            }
            other => panic!("expected a shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_error_on_kernel_not_matching_embedding() {
        let weights = SimpleRnnWeights {
            embedding: array![[0.0, 1.0], [1.0, 0.0]],
            ..tiny_weights(Activation::Tanh)
        };
        assert!(matches!(
            SimpleRnnClassifier::new(weights),
            Err(RnnError::ShapeMismatch {
                layer: "rnn_kernel",
                ..
            })
        ));
    }
}
