//! Candle-based feed-forward classifier
//!
//! Executes the trained scoring network: a stack of dense layers with
//! ReLU activations and a softmax output, exported to SafeTensors by the
//! training pipeline. Tensors are named `layers.{i}.weight` and
//! `layers.{i}.bias`, with weights stored as `[out, in]` matrices; layer
//! count and dimensions are inferred from the shapes at load time.

use crate::classifier::SignClassifier;
use async_trait::async_trait;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::ops::softmax;
use signserve_core::{Error, Result};
use std::path::Path;

/// A single dense layer's parameters
struct DenseLayer {
    weight: Tensor,
    bias: Tensor,
}

/// Multi-layer perceptron classifier running on Candle
pub struct MlpClassifier {
    name: String,
    layers: Vec<DenseLayer>,
    num_inputs: usize,
    num_classes: usize,
    device: Device,
}

impl MlpClassifier {
    /// Load network weights from a SafeTensors file
    pub fn load(weights_path: impl AsRef<Path>) -> Result<Self> {
        let weights_path = weights_path.as_ref();
        if !weights_path.exists() {
            return Err(Error::load(format!(
                "model weights not found: {}",
                weights_path.display()
            )));
        }

        let device = Device::Cpu;
        let tensors = candle_core::safetensors::load(weights_path, &device).map_err(|e| {
            Error::load(format!(
                "failed to load weights from {}: {e}",
                weights_path.display()
            ))
        })?;

        let mut layers = Vec::new();
        loop {
            let index = layers.len();
            let weight_key = format!("layers.{index}.weight");
            let bias_key = format!("layers.{index}.bias");
            let Some(weight) = tensors.get(&weight_key) else {
                break;
            };
            let bias = tensors.get(&bias_key).ok_or_else(|| {
                Error::load(format!("missing bias tensor for layer {index}"))
            })?;
            layers.push((weight.clone(), bias.clone()));
        }

        let name = weights_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mlp")
            .to_string();

        Self::from_weights(name, layers)
    }

    /// Build a classifier from in-memory `(weight, bias)` pairs.
    ///
    /// Weights are `[out, in]` matrices, biases are `[out]` vectors;
    /// consecutive layers must chain dimensionally.
    pub fn from_weights(name: impl Into<String>, weights: Vec<(Tensor, Tensor)>) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::load("network has no layers"));
        }

        let device = Device::Cpu;
        let mut layers = Vec::with_capacity(weights.len());
        let mut prev_out: Option<usize> = None;
        let mut num_inputs = 0;

        for (index, (weight, bias)) in weights.into_iter().enumerate() {
            let weight = weight
                .to_dtype(DType::F32)
                .map_err(|e| Error::load(format!("layer {index} weight: {e}")))?;
            let bias = bias
                .to_dtype(DType::F32)
                .map_err(|e| Error::load(format!("layer {index} bias: {e}")))?;

            let (out_dim, in_dim) = weight.dims2().map_err(|e| {
                Error::load(format!("layer {index} weight is not a matrix: {e}"))
            })?;
            let bias_dim = bias
                .dims1()
                .map_err(|e| Error::load(format!("layer {index} bias is not a vector: {e}")))?;

            if bias_dim != out_dim {
                return Err(Error::load(format!(
                    "layer {index} bias length {bias_dim} does not match output size {out_dim}"
                )));
            }
            match prev_out {
                None => num_inputs = in_dim,
                Some(prev) if prev != in_dim => {
                    return Err(Error::load(format!(
                        "layer {index} expects {in_dim} inputs but layer {} produces {prev}",
                        index - 1
                    )));
                }
                Some(_) => {}
            }
            prev_out = Some(out_dim);

            layers.push(DenseLayer { weight, bias });
        }

        // prev_out is always Some here since layers is non-empty
        let num_classes = prev_out.unwrap_or(0);

        Ok(Self {
            name: name.into(),
            layers,
            num_inputs,
            num_classes,
            device,
        })
    }

    /// Forward pass: dense layers with ReLU, softmax on the final logits
    fn forward(&self, input: &Tensor) -> candle_core::Result<Tensor> {
        let mut xs = input.clone();
        let last = self.layers.len() - 1;
        for (index, layer) in self.layers.iter().enumerate() {
            xs = xs.matmul(&layer.weight.t()?)?.broadcast_add(&layer.bias)?;
            if index != last {
                xs = xs.relu()?;
            }
        }
        softmax(&xs, D::Minus1)
    }
}

#[async_trait]
impl SignClassifier for MlpClassifier {
    async fn infer(&self, features: &[f32]) -> Result<Vec<f32>> {
        if features.len() != self.num_inputs {
            return Err(Error::inference(format!(
                "classifier '{}' expects {} inputs, got {}",
                self.name,
                self.num_inputs,
                features.len()
            )));
        }

        let input = Tensor::from_slice(features, (1, self.num_inputs), &self.device)
            .map_err(|e| Error::inference(format!("failed to build input tensor: {e}")))?;
        let output = self
            .forward(&input)
            .map_err(|e| Error::inference(format!("forward pass failed: {e}")))?;
        output
            .squeeze(0)
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| Error::inference(format!("failed to read output tensor: {e}")))
    }

    fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn name(&self) -> &str {
        &self.name
    }
}
