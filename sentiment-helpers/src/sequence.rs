use ndarray::{Array1, Array2};

/// Which end of a sequence padding is added to, or tokens are dropped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Work on the start of the sequence.
    #[default]
    Pre,
    /// Work on the end of the sequence.
    Post,
}

/// Options for turning variable-length token lists into a rectangular batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadOptions {
    /// Target length. `None` uses the length of the longest sequence.
    pub maxlen: Option<usize>,
    pub padding: Padding,
    pub truncating: Padding,
    /// Token written into padded positions.
    pub value: usize,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self {
            maxlen: None,
            padding: Padding::Pre,
            truncating: Padding::Pre,
            value: 0,
        }
    }
}

impl PadOptions {
    pub fn with_maxlen(maxlen: usize) -> Self {
        Self {
            maxlen: Some(maxlen),
            ..Self::default()
        }
    }
}

/// Pads or truncates every sequence to the same length.
///
/// Returns an array of shape `(sequences.len(), maxlen)`. With the default
/// options short sequences are left-padded with zeros and long ones keep
/// only their last `maxlen` tokens.
pub fn pad_sequences(sequences: &[Vec<usize>], options: &PadOptions) -> Array2<usize> {
    let maxlen = options
        .maxlen
        .unwrap_or_else(|| sequences.iter().map(Vec::len).max().unwrap_or(0));

    let mut padded = Array2::from_elem((sequences.len(), maxlen), options.value);
    for (mut row, seq) in padded.rows_mut().into_iter().zip(sequences) {
        let kept = match options.truncating {
            Padding::Pre => &seq[seq.len().saturating_sub(maxlen)..],
            Padding::Post => &seq[..seq.len().min(maxlen)],
        };
        let offset = match options.padding {
            Padding::Pre => maxlen - kept.len(),
            Padding::Post => 0,
        };
        for (i, &token) in kept.iter().enumerate() {
            row[offset + i] = token;
        }
    }
    padded
}

/// Single-sequence form of [`pad_sequences`].
pub fn pad_sequence(sequence: &[usize], options: &PadOptions) -> Array1<usize> {
    let maxlen = options.maxlen.unwrap_or(sequence.len());
    let opts = PadOptions {
        maxlen: Some(maxlen),
        ..*options
    };
    pad_sequences(std::slice::from_ref(&sequence.to_vec()), &opts)
        .row(0)
        .to_owned()
}
