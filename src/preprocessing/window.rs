//! Block windowing of a scalar sequence into supervised samples

use ndarray::{Array1, Array3};

/// Windowed dataset built from one scalar sequence
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedDataset {
    /// Inputs [rows, window, 1]
    pub inputs: Array3<f64>,
    /// One target per row [rows]
    pub targets: Array1<f64>,
}

impl WindowedDataset {
    /// Number of (input, target) rows
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Steps per input window
    pub fn window_size(&self) -> usize {
        self.inputs.shape()[1]
    }
}

/// Number of rows `window` produces for a sequence of `len` values
pub fn row_count(len: usize, window: usize) -> usize {
    if window == 0 || len <= window {
        0
    } else {
        (len - 1) / window
    }
}

/// Splits `sequence` into non-overlapping windows and their next-step targets.
///
/// Targets sit at indices `window, 2*window, ...` below `len`; row `k` takes
/// the `window` values right before its target as input. Values past the
/// last full block are dropped. A zero window or a sequence no longer than
/// the window yields an empty dataset.
pub fn window(sequence: &[f64], window: usize) -> WindowedDataset {
    let rows = row_count(sequence.len(), window);

    let mut inputs = Array3::zeros((rows, window, 1));
    let mut targets = Array1::zeros(rows);

    for k in 0..rows {
        let start = k * window;
        for t in 0..window {
            inputs[[k, t, 0]] = sequence[start + t];
        }
        targets[k] = sequence[start + window];
    }

    WindowedDataset { inputs, targets }
}
