//! Feed-forward network with a fixed topology

use std::fmt;
use std::path::Path;

use ndarray::{s, Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;

// ============================================================================
// TYPES
// ============================================================================

/// Weights of one layer transition.
///
/// Shape is `(outputs, inputs + 1)`: one row per output neuron, one column per
/// input plus a trailing bias column.
pub type WeightMatrix = Array2<f64>;

/// Dense network: `tanh(W · [x, 1])` applied layer by layer.
///
/// The topology is fixed at construction. Genetic operators read a snapshot of
/// the weights with [`NeuralNetwork::weights`] and install a replacement with
/// [`NeuralNetwork::set_weights`]; the shapes never change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct NeuralNetwork {
    layer_sizes: Vec<usize>,
    layers: Vec<WeightMatrix>,
}

/// Unvalidated on-disk form
#[derive(Deserialize)]
struct RawNetwork {
    layer_sizes: Vec<usize>,
    layers: Vec<WeightMatrix>,
}

impl TryFrom<RawNetwork> for NeuralNetwork {
    type Error = NetworkError;

    fn try_from(raw: RawNetwork) -> Result<Self, Self::Error> {
        let network = NeuralNetwork::from_weights(raw.layers)?;
        if network.layer_sizes != raw.layer_sizes {
            return Err(NetworkError::InvalidTopology(format!(
                "declared layer sizes {:?} do not match weights {:?}",
                raw.layer_sizes, network.layer_sizes
            )));
        }
        Ok(network)
    }
}

impl NeuralNetwork {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a network with weights drawn uniformly from [-1, 1].
    ///
    /// `layer_sizes` lists the input width, each hidden width and the output
    /// width, so it needs at least two entries, all non-zero.
    pub fn random<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Self, NetworkError> {
        validate_layer_sizes(layer_sizes)?;

        let layers = layer_sizes
            .windows(2)
            .map(|pair| Array2::from_shape_fn((pair[1], pair[0] + 1), |_| rng.gen_range(-1.0..=1.0)))
            .collect();

        Ok(Self {
            layer_sizes: layer_sizes.to_vec(),
            layers,
        })
    }

    /// Build a network around existing weights, checking the shape chain
    pub fn from_weights(layers: Vec<WeightMatrix>) -> Result<Self, NetworkError> {
        let first = layers
            .first()
            .ok_or_else(|| NetworkError::InvalidTopology("no weight layers".to_string()))?;

        let mut layer_sizes = vec![first.ncols().saturating_sub(1)];
        for (i, layer) in layers.iter().enumerate() {
            let expected_cols = layer_sizes[i] + 1;
            if layer.ncols() != expected_cols {
                return Err(NetworkError::ShapeMismatch {
                    layer: i,
                    expected: (layer.nrows(), expected_cols),
                    actual: layer.dim(),
                });
            }
            layer_sizes.push(layer.nrows());
        }
        validate_layer_sizes(&layer_sizes)?;

        Ok(Self { layer_sizes, layers })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Input width, each hidden width, output width
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn input_width(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_width(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    /// Total number of weights, bias terms included
    pub fn weight_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.len()).sum()
    }

    /// Borrowed view of the live weights
    pub fn layers(&self) -> &[WeightMatrix] {
        &self.layers
    }

    /// Independent copy of every layer's weights
    pub fn weights(&self) -> Vec<WeightMatrix> {
        self.layers.clone()
    }

    /// Replace all layers at once.
    ///
    /// The replacement must match the network's layer count and every layer's
    /// shape; otherwise nothing is changed and an error is returned.
    pub fn set_weights(&mut self, weights: Vec<WeightMatrix>) -> Result<(), NetworkError> {
        if weights.len() != self.layers.len() {
            return Err(NetworkError::LayerCountMismatch {
                expected: self.layers.len(),
                actual: weights.len(),
            });
        }

        for (i, (current, replacement)) in self.layers.iter().zip(&weights).enumerate() {
            if current.dim() != replacement.dim() {
                return Err(NetworkError::ShapeMismatch {
                    layer: i,
                    expected: current.dim(),
                    actual: replacement.dim(),
                });
            }
        }

        self.layers = weights;
        Ok(())
    }

    // ========================================================================
    // FORWARD PASS
    // ========================================================================

    /// Run the network on `input`.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the input width.
    pub fn forward(&self, input: &[f64]) -> Array1<f64> {
        assert_eq!(
            input.len(),
            self.input_width(),
            "input has {} values, network expects {}",
            input.len(),
            self.input_width()
        );

        let mut activation = Array1::from_vec(input.to_vec());
        for layer in &self.layers {
            let inputs = layer.ncols() - 1;
            let mut z = layer.slice(s![.., ..inputs]).dot(&activation);
            z += &layer.column(inputs);
            z.mapv_inplace(f64::tanh);
            activation = z;
        }
        activation
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<(), NetworkError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from JSON file, re-validating the topology
    pub fn load(path: &Path) -> Result<Self, NetworkError> {
        let content = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl fmt::Display for NeuralNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(
                f,
                "Layer {} ({} -> {}):",
                i,
                self.layer_sizes[i],
                self.layer_sizes[i + 1]
            )?;
            for row in layer.rows() {
                for value in row {
                    write!(f, "{:9.4}", value)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

fn validate_layer_sizes(layer_sizes: &[usize]) -> Result<(), NetworkError> {
    if layer_sizes.len() < 2 {
        return Err(NetworkError::InvalidTopology(format!(
            "need input and output widths, got {:?}",
            layer_sizes
        )));
    }
    if let Some(layer) = layer_sizes.iter().position(|&width| width == 0) {
        return Err(NetworkError::InvalidTopology(format!("layer {} has zero width", layer)));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
