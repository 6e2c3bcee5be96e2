//! Inference backends
//!
//! The engine talks to a single polymorphic capability: turn a canonical-image
//! tensor into per-class scores. Two variants exist — an ONNX Runtime session
//! over the real classifier, and a synthetic stand-in used when the real model
//! cannot be acquired.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use tracing::info;

use crate::catalog::MODEL_CLASS_COUNT;

/// Failures internal to the engine. Both variants are recovered locally and
/// never surface to `recognize` callers.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend acquisition failed: {0}")]
    Acquisition(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// A classifier capable of scoring a canonical image against every class.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Run the classifier on a `[1, 1, S, S]` tensor.
    ///
    /// Returns one confidence score per class, index-aligned with the
    /// character catalog. Scores are raw model output, not normalized.
    async fn predict(&self, input: Array4<f32>) -> Result<Vec<f32>, BackendError>;

    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;
}

/// Which variant the engine ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Real ONNX classifier
    Onnx,
    /// Deterministic demonstration stand-in
    Synthetic,
}

/// ONNX Runtime session over the handwriting classifier.
pub struct OnnxBackend {
    session: Mutex<Session>,
}

impl OnnxBackend {
    pub fn new(model_path: &Path) -> anyhow::Result<Self> {
        info!("Loading ONNX model from {:?}", model_path);

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(model_path)
            .context("Failed to load ONNX model")?;

        let input_names: Vec<&str> = session.inputs.iter().map(|i| i.name.as_str()).collect();
        let output_names: Vec<&str> = session.outputs.iter().map(|o| o.name.as_str()).collect();
        info!(
            "Model loaded. Inputs: {:?}, Outputs: {:?}",
            input_names, output_names
        );

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

#[async_trait]
impl InferenceBackend for OnnxBackend {
    async fn predict(&self, input: Array4<f32>) -> Result<Vec<f32>, BackendError> {
        let dims = input.shape().to_vec();
        let shape: [usize; 4] = [dims[0], dims[1], dims[2], dims[3]];
        let (data, _offset) = input.into_raw_vec_and_offset();

        let input_value = Value::from_array((shape, data))
            .map_err(|e| BackendError::Inference(format!("tensor conversion: {e}")))?;

        // Outputs are dropped at the end of this scope, releasing the native
        // tensors before the scores are handed back.
        let scores = {
            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![input_value])
                .map_err(|e| BackendError::Inference(e.to_string()))?;

            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| BackendError::Inference(e.to_string()))?;
            data.to_vec()
        };

        if scores.len() != MODEL_CLASS_COUNT {
            return Err(BackendError::Inference(format!(
                "expected {} class scores, model produced {}",
                MODEL_CLASS_COUNT,
                scores.len()
            )));
        }

        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "onnx"
    }
}

/// Deterministic stand-in used when the real model cannot be acquired.
///
/// Produces a fixed, low-confidence-biased distribution peaking at the common
/// elemental characters, so the pipeline stays demonstrable end to end.
pub struct SyntheticBackend;

/// Elevated scores for the demonstration characters, by class index:
/// 人 0.92, 大 0.84, 木 0.78, 火 0.71, 水 0.65.
const DEMO_SCORES: [(usize, f32); 5] = [(0, 0.92), (1, 0.84), (5, 0.78), (6, 0.71), (4, 0.65)];

/// Secondary scores for the remaining common classes, kept below the
/// demonstration set but above the baseline.
const SECONDARY_SCORES: [(usize, f32); 5] = [(2, 0.30), (3, 0.27), (7, 0.24), (8, 0.21), (9, 0.18)];

impl SyntheticBackend {
    /// The fixed distribution, independent of input.
    pub fn demonstration_scores() -> Vec<f32> {
        let mut scores = vec![0.01f32; MODEL_CLASS_COUNT];
        for (index, score) in DEMO_SCORES.into_iter().chain(SECONDARY_SCORES) {
            scores[index] = score;
        }
        scores
    }
}

#[async_trait]
impl InferenceBackend for SyntheticBackend {
    async fn predict(&self, _input: Array4<f32>) -> Result<Vec<f32>, BackendError> {
        Ok(Self::demonstration_scores())
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_synthetic_backend_is_deterministic() {
        let backend = SyntheticBackend;
        let input = Array4::<f32>::zeros((1, 1, 64, 64));

        let a = backend.predict(input.clone()).await.unwrap();
        let b = backend.predict(input).await.unwrap();

        assert_eq!(a.len(), MODEL_CLASS_COUNT);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_synthetic_scores_peak_at_demo_characters() {
        let backend = SyntheticBackend;
        let scores = backend
            .predict(Array4::<f32>::zeros((1, 1, 64, 64)))
            .await
            .unwrap();

        // 人 (index 0) is the strongest class overall
        let max_index = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(max_index, 0);
        assert!((scores[0] - 0.92).abs() < f32::EPSILON);

        // All non-elevated classes stay at the low baseline
        assert!(scores[10..].iter().all(|&s| s <= 0.01));
    }
}
