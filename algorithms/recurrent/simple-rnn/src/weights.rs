use ndarray::{Array1, Array2};
use sentiment_helpers::Float;

use crate::Activation;
#[cfg(feature = "serde")]
use crate::{RnnError, SimpleRnnClassifier};

/// Trained parameters of the three layers, in the layout Keras stores them.
///
/// With the `serde` feature these load from a JSON export where each array
/// uses ndarray's serde form, e.g. `{"v": 1, "dim": [10000, 128], "data": [...]}`:
///
/// | key | shape |
/// |-----|-------|
/// | `embedding` | `[vocab, embed]` |
/// | `rnn_kernel` | `[embed, units]` |
/// | `rnn_recurrent_kernel` | `[units, units]` |
/// | `rnn_bias` | `[units]` |
/// | `dense_kernel` | `[units, 1]` |
/// | `dense_bias` | `[1]` |
/// | `activation` | `"tanh"` (default) or `"relu"` |
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Deserialize, serde_crate::Serialize),
    serde(crate = "serde_crate")
)]
pub struct SimpleRnnWeights<F: Float> {
    pub embedding: Array2<F>,
    pub rnn_kernel: Array2<F>,
    pub rnn_recurrent_kernel: Array2<F>,
    pub rnn_bias: Array1<F>,
    pub dense_kernel: Array2<F>,
    pub dense_bias: Array1<F>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub activation: Activation,
}

#[cfg(feature = "serde")]
impl<F> SimpleRnnClassifier<F>
where
    F: Float + serde_crate::de::DeserializeOwned,
{
    /// Parses a JSON weights export and validates it.
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, RnnError> {
        let weights: SimpleRnnWeights<F> =
            serde_json::from_reader(reader).map_err(|e| RnnError::Format(e.to_string()))?;
        Self::new(weights)
    }

    /// Loads a JSON weights export from disk.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, RnnError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| RnnError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}
