use ndarray::NdFloat;
use num_traits::{FromPrimitive, Signed};

use std::iter::Sum;

// Include submodules
mod common;
mod sequence;
mod vocab;

// Re-export types from submodules
pub use common::{Prediction, Sentiment};
pub use sequence::{pad_sequence, pad_sequences, PadOptions, Padding};
pub use vocab::{VocabError, WordIndex, INDEX_FROM, OOV_INDEX, PAD_INDEX, START_INDEX};

/// Scalar type the network weights and scores are expressed in.
pub trait Float: NdFloat + FromPrimitive + Default + Signed + Sum + std::marker::Unpin {}

impl Float for f32 {}

impl Float for f64 {}
